//! Borrower registry service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::borrower::{BorrowerPublic, BorrowerQuery, CreateBorrower, UpdateBorrower},
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowersService {
    repository: Repository,
}

impl BorrowersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search borrowers; an empty result set is reported as not-found
    pub async fn search_borrowers(&self, query: &BorrowerQuery) -> AppResult<Vec<BorrowerPublic>> {
        let borrowers = self.repository.borrowers.search(query).await?;
        if borrowers.is_empty() {
            return Err(AppError::NotFound("No borrowers found".to_string()));
        }
        Ok(borrowers)
    }

    /// Register a new borrower; the email must not already be in the registry
    pub async fn create_borrower(&self, borrower: CreateBorrower) -> AppResult<()> {
        borrower
            .validate()
            .map_err(|e| AppError::Validation(format!("Validation failed: {}", e)))?;

        if self.repository.borrowers.exists(&borrower.email).await? {
            return Err(AppError::Conflict("Borrower already exists".to_string()));
        }

        self.repository.borrowers.create(&borrower).await
    }

    /// Update the provided fields of a borrower
    pub async fn update_borrower(&self, email: &str, update: UpdateBorrower) -> AppResult<()> {
        self.repository.borrowers.update(email, &update).await
    }

    /// Delete a borrower by email
    pub async fn delete_borrower(&self, email: &str) -> AppResult<()> {
        self.repository.borrowers.delete(email).await
    }
}
