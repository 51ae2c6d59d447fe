//! Borrowers repository for database operations

use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::borrower::{BorrowerPublic, BorrowerQuery, CreateBorrower, UpdateBorrower},
};

#[derive(Clone)]
pub struct BorrowersRepository {
    pool: Pool<Postgres>,
}

impl BorrowersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Check if a borrower with the given email already exists
    pub async fn exists(&self, email: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM borrowers WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Search borrowers with an optional exact email filter and pagination.
    /// The password column is never selected.
    pub async fn search(&self, query: &BorrowerQuery) -> AppResult<Vec<BorrowerPublic>> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT email, name, registered_date FROM borrowers WHERE 1=1",
        );

        if let Some(ref email) = query.email {
            qb.push(" AND email = ");
            qb.push_bind(email);
        }

        qb.push(" ORDER BY registered_date");

        if let Some(limit) = query.limit {
            qb.push(" LIMIT ");
            qb.push_bind(limit);
        }
        if let Some(offset) = query.offset {
            qb.push(" OFFSET ");
            qb.push_bind(offset);
        }

        let borrowers = qb
            .build_query_as::<BorrowerPublic>()
            .fetch_all(&self.pool)
            .await?;
        Ok(borrowers)
    }

    /// Create a new borrower
    pub async fn create(&self, borrower: &CreateBorrower) -> AppResult<()> {
        sqlx::query("INSERT INTO borrowers (email, name, password) VALUES ($1, $2, $3)")
            .bind(&borrower.email)
            .bind(&borrower.name)
            .bind(&borrower.password)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Update the provided fields of a borrower
    pub async fn update(&self, email: &str, update: &UpdateBorrower) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE borrowers
            SET name = COALESCE($1, name), password = COALESCE($2, password)
            WHERE email = $3
            "#,
        )
        .bind(&update.name)
        .bind(&update.password)
        .bind(email)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Borrower not found".to_string()));
        }

        Ok(())
    }

    /// Delete a borrower by email
    pub async fn delete(&self, email: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM borrowers WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Borrower not found".to_string()));
        }

        Ok(())
    }
}
