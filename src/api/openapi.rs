//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, borrowers, exports, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.1.0",
        description = "Library Lending System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        // Books
        books::list_books,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Lending
        books::borrow_book,
        books::return_book,
        books::list_overdue,
        // Borrowers
        borrowers::list_borrowers,
        borrowers::create_borrower,
        borrowers::update_borrower,
        borrowers::delete_borrower,
        borrowers::check_borrowed,
        // Exports
        exports::overdue_last_month,
        exports::borrowings_last_month,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Borrowers
            crate::models::borrower::BorrowerPublic,
            crate::models::borrower::CreateBorrower,
            crate::models::borrower::UpdateBorrower,
            borrowers::CheckRequest,
            // Lending
            crate::models::transaction::BorrowTransaction,
            crate::models::transaction::BorrowedBook,
            crate::models::transaction::TransactionExport,
            books::BorrowRequest,
            books::ReturnRequest,
            // Shared
            crate::api::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book ledger management"),
        (name = "lending", description = "Borrow and return operations"),
        (name = "borrowers", description = "Borrower registry management"),
        (name = "exports", description = "Last-month export reports")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
