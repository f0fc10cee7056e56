use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::models::{Quote, Settings};
use crate::services::{quote_service, settings_service};

/// Full backup of the studio. The same shape feeds `/api/migrate` on restore.
#[derive(Serialize)]
pub struct BackupData {
    pub version: String,
    pub exported_at: String,
    pub settings: Settings,
    pub quotes: Vec<Quote>,
}

#[utoipa::path(
    get,
    path = "/api/export",
    responses(
        (status = 200, description = "JSON backup of all quotes and settings")
    )
)]
pub async fn export_data(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    let settings = settings_service::get_settings(&db)
        .await
        .unwrap_or_default();
    let quotes = quote_service::list_quotes(&db).await.unwrap_or_default();

    let backup = BackupData {
        version: "1.0".to_string(),
        exported_at: chrono::Utc::now().to_rfc3339(),
        settings,
        quotes,
    };

    let filename = format!(
        "pricing_studio_backup_{}.json",
        chrono::Utc::now().format("%Y-%m-%d")
    );

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
    headers.insert(
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{}\"", filename)
            .parse()
            .unwrap(),
    );

    (StatusCode::OK, headers, Json(backup))
}
