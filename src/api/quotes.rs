use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::models::{Quote, QuotePatch};
use crate::services::{quote_service, ServiceError};

#[utoipa::path(
    get,
    path = "/api/quotes",
    responses(
        (status = 200, description = "All quotes, newest-created first")
    )
)]
pub async fn list_quotes(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match quote_service::list_quotes(&db).await {
        Ok(quotes) => (
            StatusCode::OK,
            Json(json!({
                "quotes": quotes,
                "count": quotes.len()
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
    post,
    path = "/api/quotes",
    responses(
        (status = 201, description = "Quote created"),
        (status = 500, description = "Insert failed")
    )
)]
pub async fn create_quote(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<Quote>,
) -> impl IntoResponse {
    match quote_service::create_quote(&db, payload).await {
        Ok(quote) => (
            StatusCode::CREATED,
            Json(json!({
                "quote": quote
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
    path = "/api/quotes/{id}",
    params(
        ("id" = String, Path, description = "Quote identifier")
    ),
    responses(
        (status = 200, description = "Quote updated"),
        (status = 404, description = "No quote with this identifier")
    )
)]
pub async fn update_quote(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
    Json(patch): Json<QuotePatch>,
) -> impl IntoResponse {
    match quote_service::update_quote(&db, &id, patch).await {
        Ok(quote) => (
            StatusCode::OK,
            Json(json!({
                "quote": quote
            })),
        )
            .into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "error": "Quote not found"
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
    delete,
    path = "/api/quotes/{id}",
    params(
        ("id" = String, Path, description = "Quote identifier")
    ),
    responses(
        (status = 200, description = "Quote deleted"),
        (status = 404, description = "No quote with this identifier")
    )
)]
pub async fn delete_quote(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match quote_service::delete_quote(&db, &id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "error": "Quote not found"
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
