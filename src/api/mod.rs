pub mod export;
pub mod health;
pub mod migrate;
pub mod quotes;
pub mod settings;
pub mod stats;

use axum::{
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;

pub fn api_router(db: DatabaseConnection) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Quotes
        .route(
            "/quotes",
            get(quotes::list_quotes).post(quotes::create_quote),
        )
        .route(
            "/quotes/:id",
            axum::routing::put(quotes::update_quote).delete(quotes::delete_quote),
        )
        // Settings (singleton)
        .route(
            "/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        // Bulk migration from a backup or legacy snapshot
        .route("/migrate", post(migrate::migrate))
        // Dashboard
        .route("/stats", get(stats::get_stats))
        // Backup
        .route("/export", get(export::export_data))
        .with_state(db)
}
