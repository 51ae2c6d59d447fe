//! Borrow-transaction repository for database operations.
//!
//! The borrow and return operations are the only multi-statement writes in the
//! system; both run inside a database transaction so the quantity mutation and
//! the log mutation commit or roll back together. The database's isolation
//! level is the sole concurrency guarantee.

use chrono::{DateTime, Duration, Utc};
use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::transaction::{BorrowTransaction, BorrowedBook, OverdueQuery, TransactionExport},
};

/// Export reports cover a fixed trailing window on the borrow date
const EXPORT_WINDOW_DAYS: i64 = 30;

#[derive(Clone)]
pub struct TransactionsRepository {
    pool: Pool<Postgres>,
}

impl TransactionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Borrow a book: decrement its quantity by 1 and open a transaction row,
    /// atomically. Fails without state change if the book is absent or has no
    /// available copies.
    pub async fn borrow(
        &self,
        email: &str,
        isbn: &str,
        due_date: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let quantity: i32 = sqlx::query_scalar("SELECT quantity FROM books WHERE isbn = $1")
            .bind(isbn)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        if quantity < 1 {
            return Err(AppError::Validation(
                "No available copies to borrow".to_string(),
            ));
        }

        sqlx::query("UPDATE books SET quantity = quantity - 1, updated_at = NOW() WHERE isbn = $1")
            .bind(isbn)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO borrow_transactions (borrower_email, isbn, borrow_date, due_date)
            VALUES ($1, $2, NOW(), $3)
            "#,
        )
        .bind(email)
        .bind(isbn)
        .bind(due_date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Return a book: close the oldest open transaction for (email, isbn) and
    /// increment the book quantity by 1, atomically. The open transaction is
    /// located before any mutation so a failed lookup leaves the quantity
    /// untouched.
    pub async fn return_book(&self, email: &str, isbn: &str) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let transaction_id: i32 = sqlx::query_scalar(
            r#"
            SELECT id FROM borrow_transactions
            WHERE borrower_email = $1 AND isbn = $2 AND return_date IS NULL
            ORDER BY borrow_date ASC
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(isbn)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("No open borrow found for this book".to_string()))?;

        let result = sqlx::query(
            "UPDATE books SET quantity = quantity + 1, updated_at = NOW() WHERE isbn = $1",
        )
        .bind(isbn)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Book not found".to_string()));
        }

        sqlx::query("UPDATE borrow_transactions SET return_date = NOW() WHERE id = $1")
            .bind(transaction_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Open transactions for a borrower, joined with the book title
    pub async fn open_for_borrower(&self, email: &str) -> AppResult<Vec<BorrowedBook>> {
        let borrowed = sqlx::query_as::<_, BorrowedBook>(
            r#"
            SELECT t.isbn, b.title, t.borrow_date, t.due_date
            FROM borrow_transactions t
            JOIN books b ON b.isbn = t.isbn
            WHERE t.borrower_email = $1 AND t.return_date IS NULL
            ORDER BY t.borrow_date
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(borrowed)
    }

    /// Transactions past their due date and not yet returned, optionally
    /// narrowed to one borrower and/or one book
    pub async fn overdue(&self, query: &OverdueQuery) -> AppResult<Vec<BorrowTransaction>> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, borrower_email, isbn, borrow_date, due_date, return_date \
             FROM borrow_transactions \
             WHERE due_date < NOW() AND return_date IS NULL",
        );

        if let Some(ref email) = query.email {
            qb.push(" AND borrower_email = ");
            qb.push_bind(email);
        }
        if let Some(ref isbn) = query.isbn {
            qb.push(" AND isbn = ");
            qb.push_bind(isbn);
        }

        qb.push(" ORDER BY due_date");

        if let Some(limit) = query.limit {
            qb.push(" LIMIT ");
            qb.push_bind(limit);
        }
        if let Some(offset) = query.offset {
            qb.push(" OFFSET ");
            qb.push_bind(offset);
        }

        let overdue = qb
            .build_query_as::<BorrowTransaction>()
            .fetch_all(&self.pool)
            .await?;
        Ok(overdue)
    }

    /// Overdue transactions borrowed within the trailing export window,
    /// enriched with book and borrower details
    pub async fn overdue_last_month(&self) -> AppResult<Vec<TransactionExport>> {
        let window_start = Utc::now() - Duration::days(EXPORT_WINDOW_DAYS);

        let rows = sqlx::query_as::<_, TransactionExport>(
            r#"
            SELECT t.id, t.isbn, b.title, b.author, b.shelf,
                   t.borrower_email, u.name AS borrower_name,
                   t.borrow_date, t.due_date, t.return_date
            FROM borrow_transactions t
            JOIN books b ON b.isbn = t.isbn
            JOIN borrowers u ON u.email = t.borrower_email
            WHERE t.return_date IS NULL
              AND t.due_date < NOW()
              AND t.borrow_date BETWEEN $1 AND NOW()
            ORDER BY t.borrow_date
            "#,
        )
        .bind(window_start)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// All transactions borrowed within the trailing export window, enriched
    /// with book and borrower details
    pub async fn borrowings_last_month(&self) -> AppResult<Vec<TransactionExport>> {
        let window_start = Utc::now() - Duration::days(EXPORT_WINDOW_DAYS);

        let rows = sqlx::query_as::<_, TransactionExport>(
            r#"
            SELECT t.id, t.isbn, b.title, b.author, b.shelf,
                   t.borrower_email, u.name AS borrower_name,
                   t.borrow_date, t.due_date, t.return_date
            FROM borrow_transactions t
            JOIN books b ON b.isbn = t.isbn
            JOIN borrowers u ON u.email = t.borrower_email
            WHERE t.borrow_date BETWEEN $1 AND NOW()
            ORDER BY t.borrow_date
            "#,
        )
        .bind(window_start)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
