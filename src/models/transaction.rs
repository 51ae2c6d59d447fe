//! Borrow transaction (log entry) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Borrow transaction from database. Rows are created by the borrow operation
/// and mutated exactly once, by the return operation, to set `return_date`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowTransaction {
    pub id: i32,
    pub borrower_email: String,
    pub isbn: String,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

/// An open borrow joined with the book title, for the borrower check endpoint
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowedBook {
    pub isbn: String,
    pub title: String,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

/// Transaction enriched with book and borrower details, for the export reports
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TransactionExport {
    pub id: i32,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub shelf: Option<String>,
    pub borrower_email: String,
    pub borrower_name: String,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

/// Overdue query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct OverdueQuery {
    /// Narrow to one borrower
    pub email: Option<String>,
    /// Narrow to one book
    pub isbn: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
