//! Borrower (registry entry) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Borrower representation exposed by the API. The stored password column is
/// never selected into responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowerPublic {
    pub email: String,
    pub name: String,
    pub registered_date: DateTime<Utc>,
}

/// Create borrower request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBorrower {
    pub name: String,
    #[validate(custom(function = "validate_email_address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be longer than 7 chars"))]
    pub password: String,
}

/// Partial update request; absent fields are left untouched
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBorrower {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Borrower query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BorrowerQuery {
    /// Exact match
    pub email: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// An address must carry both "@" and "." to be accepted.
fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    if email.contains('@') && email.contains('.') {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("Please enter a valid email address".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, email: &str, password: &str) -> CreateBorrower {
        CreateBorrower {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_borrower() {
        assert!(payload("Ada", "ada@example.org", "secret-password").validate().is_ok());
    }

    #[test]
    fn rejects_email_without_at_sign() {
        assert!(payload("Ada", "ada.example.org", "secret-password").validate().is_err());
    }

    #[test]
    fn rejects_email_without_dot() {
        assert!(payload("Ada", "ada@example", "secret-password").validate().is_err());
    }

    #[test]
    fn rejects_short_password() {
        assert!(payload("Ada", "ada@example.org", "short").validate().is_err());
    }
}
