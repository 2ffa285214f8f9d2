//! Request and filter schemas for the account API.
//!
//! Validation lives here as pure functions from raw input to a normalized
//! value or a first-violation error, independent of the HTTP layer. Handlers
//! and services call `validated()` and never apply a partially valid payload:
//! normalization (trimming, case folding, empty-string to absent) always runs
//! before constraint checks, and a single failure rejects the whole input.

use crate::api::common::{empty_to_none, first_validation_message};
use crate::errors::{ServiceError, ServiceResult};
use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Fixed message for a malformed account identifier in the request path.
pub const INVALID_ACCOUNT_ID_MESSAGE: &str = "The specified account identifier is invalid.";

/// Account creation / full-replacement payload.
///
/// Unknown fields are rejected at deserialization; required string fields
/// default to empty so that an absent field fails the length constraint with
/// the field's own message rather than a serde error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateAccountRequest {
    #[serde(default)]
    #[validate(
        length(
            min = 3,
            max = 30,
            message = "userName must be between 3-30 characters"
        ),
        custom(
            function = "validate_lowercase_alphanumeric",
            message = "userName may only contain letters and digits"
        )
    )]
    pub user_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "firstName is required"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "lastName is required"))]
    pub last_name: String,

    #[validate(email(message = "emailAddress must be a valid email"))]
    pub email_address: Option<String>,

    pub phone_number: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
}

impl CreateAccountRequest {
    /// Normalizes and validates the payload in one atomic step.
    ///
    /// Returns the normalized payload, or the first violated constraint's
    /// message as a validation error.
    pub fn validated(self) -> ServiceResult<Self> {
        let normalized = self.normalized();
        normalized
            .validate()
            .map_err(|errors| ServiceError::validation(first_validation_message(&errors)))?;
        Ok(normalized)
    }

    /// Trims every string field, folds `user_name` to lowercase, and converts
    /// empty optional fields to absent values.
    fn normalized(mut self) -> Self {
        self.user_name = self.user_name.trim().to_lowercase();
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.email_address = empty_to_none(self.email_address);
        self.phone_number = empty_to_none(self.phone_number);
        self.address_line1 = empty_to_none(self.address_line1);
        self.address_line2 = empty_to_none(self.address_line2);
        self.city = empty_to_none(self.city);
        self.state = empty_to_none(self.state);
        self.country = empty_to_none(self.country);
        self.zip_code = empty_to_none(self.zip_code);
        self
    }
}

fn validate_lowercase_alphanumeric(value: &str) -> Result<(), ValidationError> {
    if value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        Ok(())
    } else {
        Err(ValidationError::new("lowercase_alphanumeric"))
    }
}

/// Checks an account identifier from the request path.
///
/// Identifiers are exactly 24 lowercase-alphanumeric characters; anything
/// else is rejected with a fixed message before any lookup happens.
pub fn validate_account_id(id: &str) -> ServiceResult<()> {
    let well_formed = id.len() == crate::utils::account_id::ACCOUNT_ID_LENGTH
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());

    if well_formed {
        Ok(())
    } else {
        Err(ServiceError::validation(INVALID_ACCOUNT_ID_MESSAGE))
    }
}

/// Preset windows for filtering a listing by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    #[default]
    AllTime,
    Today,
    #[serde(rename = "last_7_days")]
    Last7Days,
    #[serde(rename = "last_30_days")]
    Last30Days,
    Custom,
}

/// Query parameters accepted by the account listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AccountFilter {
    pub page: Option<u32>,

    #[validate(range(min = 10, max = 100, message = "limit must be between 10-100"))]
    pub limit: Option<u32>,

    #[serde(default)]
    pub date_range: DateRange,

    /// Start of the window (inclusive), only meaningful with `custom`
    pub start_date: Option<DateTime<Utc>>,

    /// End of the window (inclusive), only meaningful with `custom`
    pub end_date: Option<DateTime<Utc>>,

    pub search: Option<String>,
}

impl AccountFilter {
    /// Normalizes and validates the filter in one atomic step.
    pub fn validated(mut self) -> ServiceResult<Self> {
        self.search = empty_to_none(self.search);
        let normalized = self;

        normalized
            .validate()
            .map_err(|errors| ServiceError::validation(first_validation_message(&errors)))?;

        if normalized.date_range == DateRange::Custom
            && (normalized.start_date.is_none() || normalized.end_date.is_none())
        {
            return Err(ServiceError::validation(
                "startDate and endDate are required when dateRange is custom",
            ));
        }

        Ok(normalized)
    }

    /// Get page number with default
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(0)
    }

    /// Get limit with default
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(20)
    }

    /// Resolves the selected date range into concrete bounds.
    ///
    /// Returns `(None, None)` for `all_time`; `custom` passes the provided
    /// bounds through (present after validation).
    pub fn resolve_window(
        &self,
        now: DateTime<Utc>,
    ) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        match self.date_range {
            DateRange::AllTime => (None, None),
            DateRange::Today => (
                Some(now.date_naive().and_time(NaiveTime::MIN).and_utc()),
                Some(now),
            ),
            DateRange::Last7Days => (Some(now - Duration::days(7)), Some(now)),
            DateRange::Last30Days => (Some(now - Duration::days(30)), Some(now)),
            DateRange::Custom => (self.start_date, self.end_date),
        }
    }
}

impl Default for AccountFilter {
    fn default() -> Self {
        Self {
            page: Some(0),
            limit: Some(20),
            date_range: DateRange::AllTime,
            start_date: None,
            end_date: None,
            search: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_payload() -> CreateAccountRequest {
        CreateAccountRequest {
            user_name: "adalovelace".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email_address: Some("ada@example.com".to_string()),
            phone_number: None,
            address_line1: None,
            address_line2: None,
            city: None,
            state: None,
            country: None,
            zip_code: None,
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(base_payload().validated().is_ok());
    }

    #[test]
    fn user_name_too_short_is_rejected() {
        let payload = CreateAccountRequest {
            user_name: "ab".to_string(),
            ..base_payload()
        };
        let error = payload.validated().unwrap_err();
        assert!(error.to_string().contains("userName"));
    }

    #[test]
    fn user_name_too_long_is_rejected() {
        let payload = CreateAccountRequest {
            user_name: "a".repeat(31),
            ..base_payload()
        };
        assert!(payload.validated().is_err());
    }

    #[test]
    fn user_name_with_symbols_is_rejected() {
        let payload = CreateAccountRequest {
            user_name: "ada_lovelace!".to_string(),
            ..base_payload()
        };
        assert!(payload.validated().is_err());
    }

    #[test]
    fn mixed_case_user_name_is_folded_to_lowercase() {
        let payload = CreateAccountRequest {
            user_name: "AdaLovelace01".to_string(),
            ..base_payload()
        };
        let validated = payload.validated().unwrap();
        assert_eq!(validated.user_name, "adalovelace01");
    }

    #[test]
    fn empty_optional_fields_become_absent() {
        let payload = CreateAccountRequest {
            email_address: Some("".to_string()),
            city: Some("   ".to_string()),
            ..base_payload()
        };
        let validated = payload.validated().unwrap();
        assert_eq!(validated.email_address, None);
        assert_eq!(validated.city, None);
    }

    #[test]
    fn malformed_email_is_rejected() {
        let payload = CreateAccountRequest {
            email_address: Some("not-an-email".to_string()),
            ..base_payload()
        };
        let error = payload.validated().unwrap_err();
        assert!(error.to_string().contains("emailAddress"));
    }

    #[test]
    fn missing_first_name_is_rejected() {
        let payload = CreateAccountRequest {
            first_name: "  ".to_string(),
            ..base_payload()
        };
        assert!(payload.validated().is_err());
    }

    #[test]
    fn account_id_format_check() {
        assert!(validate_account_id("abc").is_err());
        assert!(validate_account_id("ABCDEFGHIJKLMNOPQRSTUVWX").is_err());
        assert!(validate_account_id(&"a".repeat(25)).is_err());
        assert!(validate_account_id("a1b2c3d4e5f6a7b8c9d0e1f2").is_ok());

        let error = validate_account_id("abc").unwrap_err();
        assert!(error.to_string().contains(INVALID_ACCOUNT_ID_MESSAGE));
    }

    fn empty_filter() -> AccountFilter {
        AccountFilter {
            page: None,
            limit: None,
            date_range: DateRange::AllTime,
            start_date: None,
            end_date: None,
            search: None,
        }
    }

    #[test]
    fn filter_defaults() {
        let filter = empty_filter().validated().unwrap();
        assert_eq!(filter.page(), 0);
        assert_eq!(filter.limit(), 20);
        assert_eq!(filter.date_range, DateRange::AllTime);
    }

    #[test]
    fn limit_below_minimum_is_rejected() {
        let filter = AccountFilter {
            limit: Some(5),
            ..empty_filter()
        };
        let error = filter.validated().unwrap_err();
        assert!(error.to_string().contains("limit"));
    }

    #[test]
    fn limit_above_maximum_is_rejected() {
        let filter = AccountFilter {
            limit: Some(500),
            ..empty_filter()
        };
        assert!(filter.validated().is_err());
    }

    #[test]
    fn custom_range_requires_both_bounds() {
        let filter = AccountFilter {
            date_range: DateRange::Custom,
            ..empty_filter()
        };
        assert!(filter.validated().is_err());

        let filter = AccountFilter {
            date_range: DateRange::Custom,
            start_date: Some(Utc::now()),
            ..empty_filter()
        };
        assert!(filter.validated().is_err());

        let filter = AccountFilter {
            date_range: DateRange::Custom,
            start_date: Some(Utc::now() - Duration::days(1)),
            end_date: Some(Utc::now()),
            ..empty_filter()
        };
        assert!(filter.validated().is_ok());
    }

    #[test]
    fn empty_search_becomes_absent() {
        let filter = AccountFilter {
            search: Some("".to_string()),
            ..empty_filter()
        };
        assert_eq!(filter.validated().unwrap().search, None);
    }

    #[test]
    fn custom_window_passes_bounds_through() {
        let start = Utc::now() - Duration::days(2);
        let end = Utc::now();
        let filter = AccountFilter {
            date_range: DateRange::Custom,
            start_date: Some(start),
            end_date: Some(end),
            ..empty_filter()
        };
        assert_eq!(filter.resolve_window(Utc::now()), (Some(start), Some(end)));
    }

    #[test]
    fn all_time_window_is_unbounded() {
        assert_eq!(empty_filter().resolve_window(Utc::now()), (None, None));
    }

    #[test]
    fn date_range_query_names() {
        let range: DateRange = serde_json::from_str("\"last_7_days\"").unwrap();
        assert_eq!(range, DateRange::Last7Days);
        let range: DateRange = serde_json::from_str("\"all_time\"").unwrap();
        assert_eq!(range, DateRange::AllTime);
        assert!(serde_json::from_str::<DateRange>("\"yesterday\"").is_err());
    }
}
