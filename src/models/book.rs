//! Book (ledger entry) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Book model (DB + API). The ISBN is the primary key and never changes once
/// the row exists.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub quantity: i32,
    pub shelf: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    #[validate(range(min = 0, message = "please input a valid quantity"))]
    pub quantity: i32,
    pub shelf: Option<String>,
}

/// Partial update request; absent fields are left untouched
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub quantity: Option<i32>,
    pub shelf: Option<String>,
}

/// Book query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BookQuery {
    /// Case-insensitive substring match
    pub title: Option<String>,
    /// Case-insensitive substring match
    pub author: Option<String>,
    /// Exact match
    pub isbn: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
