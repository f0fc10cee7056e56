use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::models::SettingsPatch;
use crate::services::settings_service;

#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "The singleton pricing settings")
    )
)]
pub async fn get_settings(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match settings_service::get_settings(&db).await {
        Ok(settings) => (
            StatusCode::OK,
            Json(json!({
                "settings": settings
            })),
        )
            .into_response(),
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

#[utoipa::path(
    put,
    path = "/api/settings",
    responses(
        (status = 200, description = "Settings updated; omitted fields keep their stored values")
    )
)]
pub async fn update_settings(
    State(db): State<DatabaseConnection>,
    Json(patch): Json<SettingsPatch>,
) -> impl IntoResponse {
    match settings_service::update_settings(&db, patch).await {
        Ok(settings) => (
            StatusCode::OK,
            Json(json!({
                "settings": settings
            })),
        )
            .into_response(),
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
