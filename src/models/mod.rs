//! Data models for Libris

pub mod book;
pub mod borrower;
pub mod transaction;

// Re-export commonly used types
pub use book::{Book, BookQuery, CreateBook, UpdateBook};
pub use borrower::{BorrowerPublic, BorrowerQuery, CreateBorrower, UpdateBorrower};
pub use transaction::{BorrowTransaction, BorrowedBook, OverdueQuery, TransactionExport};
