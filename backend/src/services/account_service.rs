//! Account business logic service.
//!
//! Handles all account-related business operations. Every operation runs on
//! behalf of an authenticated owner; records belonging to other users are
//! never visible.

use crate::api::account::models::{AccountFilter, CreateAccountRequest, validate_account_id};
use crate::config::Config;
use crate::database::models::Account;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::account_repository::{AccountRepository, ListQuery};
use crate::utils::account_id::generate_account_id;
use chrono::Utc;
use sqlx::SqlitePool;

/// One page of a filtered account listing.
#[derive(Debug)]
pub struct AccountListing {
    pub items: Vec<Account>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

/// Service layer for account operations.
pub struct AccountService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> AccountService<'a> {
    /// Creates a new AccountService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new account owned by the calling user.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures (first violated constraint)
    /// - A user name already taken by another account
    pub async fn create_account(
        &self,
        owner_id: &str,
        payload: CreateAccountRequest,
    ) -> ServiceResult<Account> {
        let payload = payload.validated()?;

        let repo = AccountRepository::new(self.pool);

        if repo.user_name_taken(&payload.user_name, None).await? {
            return Err(ServiceError::already_exists("Account", &payload.user_name));
        }

        let id = generate_account_id();
        let account = repo.create_account(&id, owner_id, &payload).await?;

        Ok(account)
    }

    /// Lists the calling user's accounts matching the filter.
    ///
    /// The effective page size is additionally capped by the configured
    /// maximum.
    pub async fn list_accounts(
        &self,
        owner_id: &str,
        filter: AccountFilter,
        config: &Config,
    ) -> ServiceResult<AccountListing> {
        let filter = filter.validated()?;

        let per_page = filter.limit().min(config.max_page_size);
        let page = filter.page();
        let (from, to) = filter.resolve_window(Utc::now());

        let query = ListQuery {
            from,
            to,
            search: filter.search.clone(),
            limit: per_page,
            offset: page * per_page,
        };

        let repo = AccountRepository::new(self.pool);
        let total = repo.count_accounts(owner_id, &query).await?;
        let items = repo.list_accounts(owner_id, &query).await?;

        Ok(AccountListing {
            items,
            total,
            page,
            per_page,
        })
    }

    /// Retrieves one of the calling user's accounts by identifier.
    ///
    /// # Errors
    /// - `ServiceError::Validation` when the identifier is malformed
    /// - `ServiceError::NotFound` when no owned record matches
    pub async fn get_account(&self, owner_id: &str, id: &str) -> ServiceResult<Account> {
        validate_account_id(id)?;

        let repo = AccountRepository::new(self.pool);
        let account = repo
            .get_account_by_id(id, owner_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", id))?;

        Ok(account)
    }

    /// Replaces an account in full. The identifier is checked before the
    /// payload so a malformed path fails fast.
    pub async fn update_account(
        &self,
        owner_id: &str,
        id: &str,
        payload: CreateAccountRequest,
    ) -> ServiceResult<Account> {
        validate_account_id(id)?;
        let payload = payload.validated()?;

        let repo = AccountRepository::new(self.pool);

        if repo.user_name_taken(&payload.user_name, Some(id)).await? {
            return Err(ServiceError::already_exists("Account", &payload.user_name));
        }

        let account = repo
            .update_account(id, owner_id, &payload)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", id))?;

        Ok(account)
    }

    /// Deletes one of the calling user's accounts.
    pub async fn delete_account(&self, owner_id: &str, id: &str) -> ServiceResult<()> {
        let repo = AccountRepository::new(self.pool);

        if !repo.delete_account(id, owner_id).await? {
            return Err(ServiceError::not_found("Account", id));
        }

        Ok(())
    }
}
