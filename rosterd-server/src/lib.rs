//! rosterd-server: HTTP server for the employee roster
//!
//! Serves the roster over HTTP: session auth, employee CRUD, inventory
//! assignments, dashboard statistics and document storage. Pages answer
//! with the JSON payload they would have been rendered from.

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod sessions;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use rosterd_core::notify::LogListener;

pub use db::Database;
pub use error::{ServerError, ServerResult};
pub use sessions::SessionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub sessions: SessionStore,
    pub uploads_dir: PathBuf,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(db: Database, uploads_dir: PathBuf) -> Self {
        Self {
            db,
            sessions: SessionStore::new(),
            uploads_dir,
            start_time: Instant::now(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub uploads_dir: PathBuf,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8080,
            db_path: PathBuf::from("roster.db"),
            uploads_dir: PathBuf::from("uploads"),
            timeout_secs: 30,
        }
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState, timeout_secs: u64) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health_check))
        .route("/signup", get(routes::signup_page).post(routes::signup))
        .route("/login", get(routes::login_page).post(routes::login))
        .route("/logout", get(routes::logout))
        .route(
            "/add_employee",
            get(routes::add_employee_page).post(routes::add_employee),
        )
        .route(
            "/employee/{id}",
            get(routes::get_employee).post(routes::update_employee),
        )
        .route(
            "/employee/edit/{id}",
            get(routes::edit_employee_page).post(routes::update_employee),
        )
        .route("/delete_employee/{id}", post(routes::delete_employee))
        .route("/list_employees", get(routes::list_employees))
        .route("/dashboard_data", get(routes::dashboard_data))
        .route("/statistics", get(routes::statistics))
        .route("/chart", get(routes::chart))
        .route("/inventory", get(routes::inventory_page))
        .route(
            "/add_inventory",
            get(routes::add_inventory_page).post(routes::add_inventory),
        )
        .route("/inventory_list", get(routes::inventory_list))
        .route(
            "/assign_inventory",
            get(routes::assign_inventory_page).post(routes::assign_inventory),
        )
        .route(
            "/employee_inventory_list",
            get(routes::employee_inventory_list),
        )
        .route("/document_management", get(routes::document_management))
        .route(
            "/document_storage",
            get(routes::document_storage_page).post(routes::store_document),
        )
        .route(
            "/document_sharing",
            get(routes::document_sharing_page).post(routes::share_document),
        )
        .route("/compliance", get(routes::compliance))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(timeout_secs)))
                .layer(cors),
        )
        .with_state(state)
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let db = Database::open(&config.db_path)?;
    db.register_listener(Arc::new(LogListener));

    let state = AppState::new(db, config.uploads_dir.clone());
    let app = build_router(state, config.timeout_secs);

    let addr: SocketAddr = format!("{}:{}", config.bind, config.port).parse()?;
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
