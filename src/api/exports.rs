//! Export report endpoints

use axum::{extract::State, Json};

use crate::{error::AppResult, models::transaction::TransactionExport};

/// Export overdue borrows from the last 30 days
#[utoipa::path(
    get,
    path = "/exports/overdue-last-month",
    tag = "exports",
    responses(
        (status = 200, description = "Overdue borrows with book and borrower details", body = Vec<TransactionExport>),
        (status = 404, description = "No overdue borrows in the window")
    )
)]
pub async fn overdue_last_month(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<TransactionExport>>> {
    let rows = state.services.exports.overdue_last_month().await?;
    Ok(Json(rows))
}

/// Export all borrows from the last 30 days
#[utoipa::path(
    get,
    path = "/exports/borrowings-last-month",
    tag = "exports",
    responses(
        (status = 200, description = "Borrows with book and borrower details", body = Vec<TransactionExport>),
        (status = 404, description = "No borrows in the window")
    )
)]
pub async fn borrowings_last_month(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<TransactionExport>>> {
    let rows = state.services.exports.borrowings_last_month().await?;
    Ok(Json(rows))
}
