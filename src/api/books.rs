//! Book ledger and lending endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookQuery, CreateBook, UpdateBook},
        transaction::{BorrowTransaction, OverdueQuery},
    },
};

use super::{Json, MessageResponse};

/// Borrow request
#[derive(Deserialize, ToSchema)]
pub struct BorrowRequest {
    /// Borrower email
    pub email: String,
    /// Book ISBN
    pub isbn: String,
    /// Requested due date; defaults to the configured borrow window
    pub due_date: Option<DateTime<Utc>>,
}

/// Return request
#[derive(Deserialize, ToSchema)]
pub struct ReturnRequest {
    /// Borrower email
    pub email: String,
    /// Book ISBN
    pub isbn: String,
}

/// List books, filtered by title/author/ISBN
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "List of books", body = Vec<Book>),
        (status = 404, description = "No books found")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.search_books(&query).await?;
    Ok(Json(books))
}

/// Add a new book to the ledger
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input or ISBN already exists")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.catalog.create_book(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a book's details by ISBN
#[utoipa::path(
    put,
    path = "/books/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
    Json(update): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    let updated = state.services.catalog.update_book(&isbn, update).await?;
    Ok(Json(updated))
}

/// Delete a book by ISBN
#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_book(&isbn).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/books/borrow",
    tag = "lending",
    request_body = BorrowRequest,
    responses(
        (status = 201, description = "Book borrowed", body = MessageResponse),
        (status = 400, description = "No available copies or invalid due date"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Json(request): Json<BorrowRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state
        .services
        .lending
        .borrow(&request.email, &request.isbn, request.due_date)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Book borrowed successfully")),
    ))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/books/return",
    tag = "lending",
    request_body = ReturnRequest,
    responses(
        (status = 200, description = "Book returned", body = MessageResponse),
        (status = 404, description = "Book or open borrow not found")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Json(request): Json<ReturnRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .lending
        .return_book(&request.email, &request.isbn)
        .await?;

    Ok(Json(MessageResponse::new("Book returned successfully")))
}

/// List overdue borrows
#[utoipa::path(
    get,
    path = "/books/overdue",
    tag = "lending",
    params(OverdueQuery),
    responses(
        (status = 200, description = "Overdue transactions", body = Vec<BorrowTransaction>)
    )
)]
pub async fn list_overdue(
    State(state): State<crate::AppState>,
    Query(query): Query<OverdueQuery>,
) -> AppResult<Json<Vec<BorrowTransaction>>> {
    let overdue = state.services.lending.overdue(&query).await?;
    Ok(Json(overdue))
}
