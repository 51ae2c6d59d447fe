//! Borrower registry endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        borrower::{BorrowerPublic, BorrowerQuery, CreateBorrower, UpdateBorrower},
        transaction::BorrowedBook,
    },
};

use super::{Json, MessageResponse};

/// Borrower check request
#[derive(Deserialize, ToSchema)]
pub struct CheckRequest {
    /// Borrower email
    pub email: String,
}

/// List borrowers, optionally filtered by email
#[utoipa::path(
    get,
    path = "/borrower",
    tag = "borrowers",
    params(BorrowerQuery),
    responses(
        (status = 200, description = "List of borrowers", body = Vec<BorrowerPublic>),
        (status = 404, description = "No borrowers found")
    )
)]
pub async fn list_borrowers(
    State(state): State<crate::AppState>,
    Query(query): Query<BorrowerQuery>,
) -> AppResult<Json<Vec<BorrowerPublic>>> {
    let borrowers = state.services.borrowers.search_borrowers(&query).await?;
    Ok(Json(borrowers))
}

/// Register a new borrower
#[utoipa::path(
    post,
    path = "/borrower",
    tag = "borrowers",
    request_body = CreateBorrower,
    responses(
        (status = 201, description = "Borrower created", body = MessageResponse),
        (status = 400, description = "Invalid input or email already exists")
    )
)]
pub async fn create_borrower(
    State(state): State<crate::AppState>,
    Json(borrower): Json<CreateBorrower>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.services.borrowers.create_borrower(borrower).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Borrower created successfully")),
    ))
}

/// Update a borrower's details by email
#[utoipa::path(
    put,
    path = "/borrower/{email}",
    tag = "borrowers",
    params(
        ("email" = String, Path, description = "Borrower email")
    ),
    request_body = UpdateBorrower,
    responses(
        (status = 200, description = "Borrower updated", body = MessageResponse),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn update_borrower(
    State(state): State<crate::AppState>,
    Path(email): Path<String>,
    Json(update): Json<UpdateBorrower>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .borrowers
        .update_borrower(&email, update)
        .await?;

    Ok(Json(MessageResponse::new("Borrower updated successfully")))
}

/// Delete a borrower by email
#[utoipa::path(
    delete,
    path = "/borrower/{email}",
    tag = "borrowers",
    params(
        ("email" = String, Path, description = "Borrower email")
    ),
    responses(
        (status = 204, description = "Borrower deleted"),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn delete_borrower(
    State(state): State<crate::AppState>,
    Path(email): Path<String>,
) -> AppResult<StatusCode> {
    state.services.borrowers.delete_borrower(&email).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the books a borrower currently has out
#[utoipa::path(
    post,
    path = "/borrower/check",
    tag = "borrowers",
    request_body = CheckRequest,
    responses(
        (status = 200, description = "Open borrows with book titles", body = Vec<BorrowedBook>)
    )
)]
pub async fn check_borrowed(
    State(state): State<crate::AppState>,
    Json(request): Json<CheckRequest>,
) -> AppResult<Json<Vec<BorrowedBook>>> {
    let borrowed = state.services.lending.borrowed_by(&request.email).await?;
    Ok(Json(borrowed))
}
