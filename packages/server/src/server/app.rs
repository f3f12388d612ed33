//! Application setup and server configuration.

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::{Factory, Machine, Worker};
use crate::server::routes::{health_handler, resource_routes};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

/// Build the Axum application router.
///
/// The three resources share one generic route set, registered once per
/// entity type.
pub fn build_app(pool: SqlitePool) -> Router {
    let app_state = AppState { db_pool: pool };

    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .merge(resource_routes::<Factory>("/factories"))
        .merge(resource_routes::<Machine>("/machines"))
        .merge(resource_routes::<Worker>("/workers"))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
