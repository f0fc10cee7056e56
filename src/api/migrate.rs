use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

use crate::models::{Quote, Settings};
use crate::services::{quote_service, settings_service};

/// Batch payload produced by the backup export (or a legacy local snapshot).
#[derive(Debug, Deserialize)]
pub struct MigrateRequest {
    #[serde(default)]
    pub quotes: Vec<Quote>,
    pub settings: Option<Settings>,
}

#[utoipa::path(
    post,
    path = "/api/migrate",
    responses(
        (status = 200, description = "Batch imported; duplicate quote ids are skipped"),
        (status = 500, description = "Settings restore failed")
    )
)]
pub async fn migrate(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<MigrateRequest>,
) -> impl IntoResponse {
    if let Some(settings) = payload.settings {
        if let Err(e) = settings_service::restore_settings(&db, settings).await {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": format!("{:?}", e)
                })),
            )
                .into_response();
        }
    }

    // Row-by-row, each success/failure independent. An insert that conflicts
    // on the quote id counts as skipped, not as an error.
    let mut imported = 0;
    let mut skipped = 0;
    for quote in payload.quotes {
        match quote_service::create_quote(&db, quote).await {
            Ok(_) => imported += 1,
            Err(_) => skipped += 1,
        }
    }

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "imported": imported,
            "skipped": skipped
        })),
    )
        .into_response()
}
