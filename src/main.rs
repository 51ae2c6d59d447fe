//! Libris Server - Library Lending System
//!
//! A Rust REST API server for managing books, borrowers and borrow/return
//! transactions.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use libris_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing: console output plus an append-only error log file
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("libris_server={},tower_http=debug", config.logging.level).into());

    let error_log = tracing_appender::rolling::never("logs", "errors.log");
    let (error_writer, _error_guard) = tracing_appender::non_blocking(error_log);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(error_writer)
                .with_ansi(false)
                .with_filter(LevelFilter::ERROR),
        )
        .init();

    tracing::info!("Starting Libris Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url())
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.borrow);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Per-IP rate cap: 100 requests per 15 minutes, i.e. a burst of 100
    // replenished at one request per 9 seconds
    let governor_conf = Box::new(
        GovernorConfigBuilder::default()
            .per_second(9)
            .burst_size(100)
            .finish()
            .expect("Invalid rate limiter configuration"),
    );

    let routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Books
        .route("/books", get(api::books::list_books))
        .route("/books", post(api::books::create_book))
        .route("/books/:isbn", put(api::books::update_book))
        .route("/books/:isbn", delete(api::books::delete_book))
        // Lending
        .route("/books/borrow", post(api::books::borrow_book))
        .route("/books/return", post(api::books::return_book))
        .route("/books/overdue", get(api::books::list_overdue))
        // Borrowers
        .route("/borrower", get(api::borrowers::list_borrowers))
        .route("/borrower", post(api::borrowers::create_borrower))
        .route("/borrower/:email", put(api::borrowers::update_borrower))
        .route("/borrower/:email", delete(api::borrowers::delete_borrower))
        .route("/borrower/check", post(api::borrowers::check_borrowed))
        // Exports
        .route("/exports/overdue-last-month", get(api::exports::overdue_last_month))
        .route("/exports/borrowings-last-month", get(api::exports::borrowings_last_month))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .merge(routes)
        .merge(openapi)
        .layer(GovernorLayer {
            config: Box::leak(governor_conf),
        })
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
