//! Book ledger service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search books; an empty result set is reported as not-found
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let books = self.repository.books.search(query).await?;
        if books.is_empty() {
            return Err(AppError::NotFound("No books found".to_string()));
        }
        Ok(books)
    }

    /// Create a new book; the ISBN must not already be in the ledger
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(format!("Validation failed: {}", e)))?;

        if self.repository.books.exists(&book.isbn).await? {
            return Err(AppError::Conflict("Book already exists".to_string()));
        }

        self.repository.books.create(&book).await
    }

    /// Update the provided fields of a book
    pub async fn update_book(&self, isbn: &str, update: UpdateBook) -> AppResult<Book> {
        self.repository.books.update(isbn, &update).await
    }

    /// Delete a book by ISBN
    pub async fn delete_book(&self, isbn: &str) -> AppResult<()> {
        self.repository.books.delete(isbn).await
    }
}
