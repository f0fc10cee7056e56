use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::services::quote_service;

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Pipeline aggregates for the dashboard")
    )
)]
pub async fn get_stats(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match quote_service::quote_stats(&db).await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "error": format!("{:?}", e)
            })),
        )
            .into_response(),
    }
}
