//! Export report service

use crate::{
    error::{AppError, AppResult},
    models::transaction::TransactionExport,
    repository::Repository,
};

#[derive(Clone)]
pub struct ExportsService {
    repository: Repository,
}

impl ExportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Overdue borrows started within the last 30 days
    pub async fn overdue_last_month(&self) -> AppResult<Vec<TransactionExport>> {
        let rows = self.repository.transactions.overdue_last_month().await?;
        if rows.is_empty() {
            return Err(AppError::NotFound(
                "No overdue borrows found for the last 30 days".to_string(),
            ));
        }
        Ok(rows)
    }

    /// All borrows started within the last 30 days
    pub async fn borrowings_last_month(&self) -> AppResult<Vec<TransactionExport>> {
        let rows = self.repository.transactions.borrowings_last_month().await?;
        if rows.is_empty() {
            return Err(AppError::NotFound(
                "No borrowing transactions found for the last 30 days".to_string(),
            ));
        }
        Ok(rows)
    }
}
