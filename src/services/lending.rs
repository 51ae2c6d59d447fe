//! Borrow/return service.
//!
//! Resolves and validates due dates against the configured borrow windows and
//! delegates the atomic quantity/log mutations to the transactions repository.

use chrono::{DateTime, Duration, Utc};

use crate::{
    config::BorrowConfig,
    error::{AppError, AppResult},
    models::transaction::{BorrowTransaction, BorrowedBook, OverdueQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct LendingService {
    repository: Repository,
    config: BorrowConfig,
}

impl LendingService {
    pub fn new(repository: Repository, config: BorrowConfig) -> Self {
        Self { repository, config }
    }

    /// Borrow a book for a borrower, with an optional requested due date
    pub async fn borrow(
        &self,
        email: &str,
        isbn: &str,
        requested_due: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        let due_date = self.resolve_due_date(requested_due, Utc::now())?;
        self.repository.transactions.borrow(email, isbn, due_date).await
    }

    /// Return a borrowed book, closing the oldest open transaction
    pub async fn return_book(&self, email: &str, isbn: &str) -> AppResult<()> {
        self.repository.transactions.return_book(email, isbn).await
    }

    /// List overdue transactions, optionally narrowed by borrower/book.
    /// An empty list is a valid answer here.
    pub async fn overdue(&self, query: &OverdueQuery) -> AppResult<Vec<BorrowTransaction>> {
        self.repository.transactions.overdue(query).await
    }

    /// List the books a borrower currently has out
    pub async fn borrowed_by(&self, email: &str) -> AppResult<Vec<BorrowedBook>> {
        self.repository.transactions.open_for_borrower(email).await
    }

    /// A requested due date must be strictly in the future and at most the
    /// maximum borrow window from now; absent, the default window applies.
    fn resolve_due_date(
        &self,
        requested: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> AppResult<DateTime<Utc>> {
        match requested {
            Some(due) => {
                if due <= now {
                    return Err(AppError::Validation(
                        "Due date must be in the future".to_string(),
                    ));
                }
                if due > now + Duration::days(self.config.max_period_days) {
                    return Err(AppError::Validation(
                        "Due date exceeds the maximum borrow period".to_string(),
                    ));
                }
                Ok(due)
            }
            None => Ok(now + Duration::days(self.config.default_period_days)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn service() -> LendingService {
        let pool = PgPoolOptions::new().connect_lazy("postgres://test@localhost/test").unwrap();
        LendingService::new(
            Repository::new(pool),
            BorrowConfig {
                default_period_days: 14,
                max_period_days: 30,
            },
        )
    }

    #[tokio::test]
    async fn missing_due_date_falls_back_to_default_window() {
        let svc = service();
        let now = Utc::now();
        let due = svc.resolve_due_date(None, now).unwrap();
        assert_eq!(due, now + Duration::days(14));
    }

    #[tokio::test]
    async fn due_date_within_window_is_kept() {
        let svc = service();
        let now = Utc::now();
        let requested = now + Duration::days(7);
        let due = svc.resolve_due_date(Some(requested), now).unwrap();
        assert_eq!(due, requested);
    }

    #[tokio::test]
    async fn due_date_in_the_past_is_rejected() {
        let svc = service();
        let now = Utc::now();
        let err = svc.resolve_due_date(Some(now - Duration::days(1)), now);
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn due_date_equal_to_now_is_rejected() {
        let svc = service();
        let now = Utc::now();
        let err = svc.resolve_due_date(Some(now), now);
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn due_date_beyond_maximum_window_is_rejected() {
        let svc = service();
        let now = Utc::now();
        let err = svc.resolve_due_date(Some(now + Duration::days(31)), now);
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn due_date_at_exactly_the_maximum_window_is_kept() {
        let svc = service();
        let now = Utc::now();
        let requested = now + Duration::days(30);
        let due = svc.resolve_due_date(Some(requested), now).unwrap();
        assert_eq!(due, requested);
    }
}
