//! Books repository for database operations

use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ISBN
    pub async fn get_by_isbn(&self, isbn: &str) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE isbn = $1")
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Check if a book with the given ISBN already exists
    pub async fn exists(&self, isbn: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1)")
            .bind(isbn)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Search books with optional filters and pagination. Title and author are
    /// case-insensitive substring matches, ISBN is exact.
    pub async fn search(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT isbn, title, author, quantity, shelf, created_at, updated_at \
             FROM books WHERE 1=1",
        );

        if let Some(ref title) = query.title {
            qb.push(" AND title ILIKE ");
            qb.push_bind(format!("%{}%", title));
        }
        if let Some(ref author) = query.author {
            qb.push(" AND author ILIKE ");
            qb.push_bind(format!("%{}%", author));
        }
        if let Some(ref isbn) = query.isbn {
            qb.push(" AND isbn = ");
            qb.push_bind(isbn);
        }

        qb.push(" ORDER BY title");

        if let Some(limit) = query.limit {
            qb.push(" LIMIT ");
            qb.push_bind(limit);
        }
        if let Some(offset) = query.offset {
            qb.push(" OFFSET ");
            qb.push_bind(offset);
        }

        let books = qb.build_query_as::<Book>().fetch_all(&self.pool).await?;
        Ok(books)
    }

    /// Create a new book
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (isbn, title, author, quantity, shelf)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.quantity)
        .bind(&book.shelf)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update the provided fields of a book. A negative quantity in the
    /// payload is ignored, never persisted.
    pub async fn update(&self, isbn: &str, update: &UpdateBook) -> AppResult<Book> {
        let book = self.get_by_isbn(isbn).await?;

        let title = update.title.as_ref().unwrap_or(&book.title);
        let author = update.author.as_ref().unwrap_or(&book.author);
        let quantity = match update.quantity {
            Some(q) if q >= 0 => q,
            _ => book.quantity,
        };
        let shelf = update.shelf.as_ref().or(book.shelf.as_ref());

        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $1, author = $2, quantity = $3, shelf = $4, updated_at = NOW()
            WHERE isbn = $5
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(author)
        .bind(quantity)
        .bind(shelf)
        .bind(isbn)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a book by ISBN
    pub async fn delete(&self, isbn: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(isbn)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Book not found".to_string()));
        }

        Ok(())
    }
}
