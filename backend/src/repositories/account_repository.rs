//! Database repository for account management operations.
//!
//! Provides CRUD operations for account records. Every read and write is
//! scoped to the owning user; a record owned by someone else behaves exactly
//! like a missing one.

use crate::api::account::models::CreateAccountRequest;
use crate::database::models::Account;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

const ACCOUNT_COLUMNS: &str = "id, user_id, user_name, first_name, last_name, email_address, \
     phone_number, address_line1, address_line2, city, state, country, zip_code, created_at";

/// Parameters for a filtered, paginated listing query.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub search: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

pub struct AccountRepository<'a> {
    pool: &'a SqlitePool,
}

/// Repository for account database operations.
impl<'a> AccountRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        // Shared SQLite connection pool
        Self { pool }
    }

    /// Inserts a new account row and returns the stored record.
    pub async fn create_account(
        &self,
        id: &str,
        user_id: &str,
        payload: &CreateAccountRequest,
    ) -> Result<Account> {
        let account = Account {
            id: id.to_string(),
            user_id: user_id.to_string(),
            user_name: payload.user_name.clone(),
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            email_address: payload.email_address.clone(),
            phone_number: payload.phone_number.clone(),
            address_line1: payload.address_line1.clone(),
            address_line2: payload.address_line2.clone(),
            city: payload.city.clone(),
            state: payload.state.clone(),
            country: payload.country.clone(),
            zip_code: payload.zip_code.clone(),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO accounts (id, user_id, user_name, first_name, last_name, \
             email_address, phone_number, address_line1, address_line2, city, state, \
             country, zip_code, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&account.id)
        .bind(&account.user_id)
        .bind(&account.user_name)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.email_address)
        .bind(&account.phone_number)
        .bind(&account.address_line1)
        .bind(&account.address_line2)
        .bind(&account.city)
        .bind(&account.state)
        .bind(&account.country)
        .bind(&account.zip_code)
        .bind(account.created_at)
        .execute(self.pool)
        .await?;

        Ok(account)
    }

    /// Retrieves an account by its ID, scoped to the owning user.
    pub async fn get_account_by_id(&self, id: &str, user_id: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ? AND user_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    /// Checks whether a user name is already taken by another account.
    ///
    /// `exclude_id` lets a full-record replace keep its own user name.
    pub async fn user_name_taken(
        &self,
        user_name: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM accounts WHERE user_name = ?1 AND (?2 IS NULL OR id != ?2)",
        )
        .bind(user_name)
        .bind(exclude_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Lists the user's accounts matching the filter, newest first.
    pub async fn list_accounts(&self, user_id: &str, query: &ListQuery) -> Result<Vec<Account>> {
        let pattern = query.search.as_ref().map(|term| format!("%{}%", term));

        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts \
             WHERE user_id = ?1 \
             AND (?2 IS NULL OR created_at >= ?2) \
             AND (?3 IS NULL OR created_at <= ?3) \
             AND (?4 IS NULL OR user_name LIKE ?4 OR first_name LIKE ?4 OR last_name LIKE ?4) \
             ORDER BY created_at DESC \
             LIMIT ?5 OFFSET ?6"
        ))
        .bind(user_id)
        .bind(query.from)
        .bind(query.to)
        .bind(&pattern)
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(self.pool)
        .await?;

        Ok(accounts)
    }

    /// Counts the user's accounts matching the filter, ignoring pagination.
    pub async fn count_accounts(&self, user_id: &str, query: &ListQuery) -> Result<u64> {
        let pattern = query.search.as_ref().map(|term| format!("%{}%", term));

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM accounts \
             WHERE user_id = ?1 \
             AND (?2 IS NULL OR created_at >= ?2) \
             AND (?3 IS NULL OR created_at <= ?3) \
             AND (?4 IS NULL OR user_name LIKE ?4 OR first_name LIKE ?4 OR last_name LIKE ?4)",
        )
        .bind(user_id)
        .bind(query.from)
        .bind(query.to)
        .bind(&pattern)
        .fetch_one(self.pool)
        .await?;

        Ok(count as u64)
    }

    /// Replaces every mutable field of an account, scoped to the owning user.
    ///
    /// Returns the updated record, or `None` when no matching row exists.
    pub async fn update_account(
        &self,
        id: &str,
        user_id: &str,
        payload: &CreateAccountRequest,
    ) -> Result<Option<Account>> {
        let result = sqlx::query(
            "UPDATE accounts SET user_name = ?, first_name = ?, last_name = ?, \
             email_address = ?, phone_number = ?, address_line1 = ?, address_line2 = ?, \
             city = ?, state = ?, country = ?, zip_code = ? \
             WHERE id = ? AND user_id = ?",
        )
        .bind(&payload.user_name)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.email_address)
        .bind(&payload.phone_number)
        .bind(&payload.address_line1)
        .bind(&payload.address_line2)
        .bind(&payload.city)
        .bind(&payload.state)
        .bind(&payload.country)
        .bind(&payload.zip_code)
        .bind(id)
        .bind(user_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_account_by_id(id, user_id).await
    }

    /// Deletes an account, scoped to the owning user.
    ///
    /// Returns `true` when a row was removed.
    pub async fn delete_account(&self, id: &str, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
