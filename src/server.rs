// Server module - reusable router construction and port selection,
// shared by main.rs and the integration tests.

use axum::Router;
use sea_orm::DatabaseConnection;
use std::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::api;

/// Build the application router with a permissive CORS layer.
pub fn build_router(db: DatabaseConnection) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new().nest("/api", api::api_router(db)).layer(cors)
}

/// Find an available port starting from the preferred port
pub fn find_available_port(preferred_port: u16) -> Option<u16> {
    // Try preferred port first
    if TcpListener::bind(("0.0.0.0", preferred_port)).is_ok() {
        return Some(preferred_port);
    }

    // Scan next 100 ports
    ((preferred_port + 1)..(preferred_port + 100))
        .find(|&port| TcpListener::bind(("0.0.0.0", port)).is_ok())
}
