use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use pricing_studio::db;
use pricing_studio::models::{DiscountType, Plugin, Quote, QuotePatch, QuoteStatus};
use pricing_studio::services::{quote_service, settings_service, ServiceError};
use pricing_studio::{models::SettingsPatch, server};
use sea_orm::DatabaseConnection;
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    // In-memory SQLite for testing
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

// Helper to build a quote payload with a fixed creation time
fn sample_quote(id: &str, created_at: &str) -> Quote {
    Quote {
        id: id.to_string(),
        client_name: "Acme Ltd".to_string(),
        project_name: "Site Relaunch".to_string(),
        pages: 5,
        include_design: true,
        include_dev: true,
        include_pm: true,
        include_contingency: true,
        total: 2450,
        created_at: created_at.to_string(),
        ..Default::default()
    }
}

async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body was not JSON")
}

#[tokio::test]
async fn test_quote_crud() {
    let db = setup_test_db().await;

    // Create
    let created = quote_service::create_quote(&db, sample_quote("q-1", "2025-01-10T10:00:00Z"))
        .await
        .expect("Create failed");
    assert_eq!(created.id, "q-1");
    assert_eq!(created.status, QuoteStatus::Draft);

    // Fetch
    let fetched = quote_service::get_quote(&db, "q-1").await.expect("Get failed");
    assert_eq!(fetched, created);

    // Partial update: only the status changes, pricing fields survive
    let updated = quote_service::update_quote(
        &db,
        "q-1",
        QuotePatch {
            status: Some(QuoteStatus::Sent),
            ..Default::default()
        },
    )
    .await
    .expect("Update failed");
    assert_eq!(updated.status, QuoteStatus::Sent);
    assert_eq!(updated.pages, 5);
    assert_eq!(updated.client_name, "Acme Ltd");
    assert_eq!(updated.created_at, "2025-01-10T10:00:00Z");

    // Delete
    quote_service::delete_quote(&db, "q-1")
        .await
        .expect("Delete failed");
    assert!(matches!(
        quote_service::delete_quote(&db, "q-1").await,
        Err(ServiceError::NotFound)
    ));
}

#[tokio::test]
async fn test_quotes_list_newest_first() {
    let db = setup_test_db().await;

    quote_service::create_quote(&db, sample_quote("older", "2025-01-01T00:00:00Z"))
        .await
        .unwrap();
    quote_service::create_quote(&db, sample_quote("newer", "2025-06-01T00:00:00Z"))
        .await
        .unwrap();

    let quotes = quote_service::list_quotes(&db).await.unwrap();
    let ids: Vec<&str> = quotes.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["newer", "older"]);
}

#[tokio::test]
async fn test_list_json_columns_round_trip() {
    let db = setup_test_db().await;

    let quote = Quote {
        plugins: vec![Plugin {
            id: "p-1".to_string(),
            name: "SEO Suite".to_string(),
            cost: 100,
            frequency: pricing_studio::models::Frequency::Monthly,
        }],
        custom_post_types: vec![pricing_studio::models::CustomPostType {
            id: "c-1".to_string(),
            name: "Case Studies".to_string(),
        }],
        ..sample_quote("q-json", "2025-02-02T00:00:00Z")
    };
    quote_service::create_quote(&db, quote.clone()).await.unwrap();

    let fetched = quote_service::get_quote(&db, "q-json").await.unwrap();
    assert_eq!(fetched.plugins, quote.plugins);
    assert_eq!(fetched.custom_post_types, quote.custom_post_types);
}

#[tokio::test]
async fn test_settings_partial_update_coalesces() {
    let db = setup_test_db().await;

    // The migration seeds the singleton with defaults
    let initial = settings_service::get_settings(&db).await.unwrap();
    assert_eq!(initial.rate, 175);
    assert_eq!(initial.min_project, 1750);
    assert_eq!(initial.landing_page_price, 700);
    assert_eq!(initial.theme, "dark");

    // Only the provided field changes
    let updated = settings_service::update_settings(
        &db,
        SettingsPatch {
            rate: Some(200),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.rate, 200);
    assert_eq!(updated.min_project, 1750);
    assert_eq!(updated.theme, "dark");

    let reread = settings_service::get_settings(&db).await.unwrap();
    assert_eq!(reread, updated);
}

#[tokio::test]
async fn test_quote_endpoints_over_http() {
    let db = setup_test_db().await;
    let app = server::build_router(db);

    // Create
    let payload = sample_quote("q-http", "2025-03-03T00:00:00Z");
    let req = Request::builder()
        .uri("/api/quotes")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["quote"]["id"], "q-http");

    // List
    let req = Request::builder()
        .uri("/api/quotes")
        .method("GET")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["quotes"][0]["client_name"], "Acme Ltd");

    // Partial update through the wire
    let req = Request::builder()
        .uri("/api/quotes/q-http")
        .method("PUT")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"status":"Accepted"}"#))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["quote"]["status"], "Accepted");
    assert_eq!(body["quote"]["pages"], 5);

    // Unknown id is a 404
    let req = Request::builder()
        .uri("/api/quotes/missing")
        .method("PUT")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"status":"Sent"}"#))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Delete, then delete again
    let req = Request::builder()
        .uri("/api/quotes/q-http")
        .method("DELETE")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let req = Request::builder()
        .uri("/api/quotes/q-http")
        .method("DELETE")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_migrate_skips_duplicates() {
    let db = setup_test_db().await;

    // One quote already exists
    quote_service::create_quote(&db, sample_quote("dup", "2025-01-01T00:00:00Z"))
        .await
        .unwrap();

    let app = server::build_router(db.clone());
    let payload = serde_json::json!({
        "quotes": [
            sample_quote("dup", "2025-01-01T00:00:00Z"),
            sample_quote("fresh", "2025-04-04T00:00:00Z"),
        ],
        "settings": {
            "rate": 190,
            "min_project": 0,
            "landing_page_price": 650,
            "show_internal_costs": true,
            "theme": "light"
        }
    });

    let req = Request::builder()
        .uri("/api/migrate")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["imported"], 1);
    assert_eq!(body["skipped"], 1);

    // Settings were upserted; the zeroed minimum fell back to the default
    let settings = settings_service::get_settings(&db).await.unwrap();
    assert_eq!(settings.rate, 190);
    assert_eq!(settings.min_project, 1750);
    assert_eq!(settings.landing_page_price, 650);
    assert!(settings.show_internal_costs);
    assert_eq!(settings.theme, "light");
}

#[tokio::test]
async fn test_stats_recompute_totals_from_settings() {
    let db = setup_test_db().await;

    // 5 pages x 2 services x 175 = 1750, +20% +20% => 2450
    quote_service::create_quote(&db, sample_quote("s-1", "2025-01-01T00:00:00Z"))
        .await
        .unwrap();
    let accepted = Quote {
        status: QuoteStatus::Accepted,
        ..sample_quote("s-2", "2025-02-01T00:00:00Z")
    };
    quote_service::create_quote(&db, accepted).await.unwrap();

    let app = server::build_router(db);
    let req = Request::builder()
        .uri("/api/stats")
        .method("GET")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["total_quotes"], 2);
    assert_eq!(body["total_quoted"], 4900);
    assert_eq!(body["accepted_quotes"], 1);
    assert_eq!(body["accepted_total"], 2450);
}

#[tokio::test]
async fn test_export_matches_migrate_shape() {
    let db = setup_test_db().await;
    quote_service::create_quote(&db, sample_quote("e-1", "2025-01-01T00:00:00Z"))
        .await
        .unwrap();

    let app = server::build_router(db);
    let req = Request::builder()
        .uri("/api/export")
        .method("GET")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["version"], "1.0");
    assert_eq!(body["quotes"].as_array().unwrap().len(), 1);
    assert_eq!(body["settings"]["rate"], 175);
}

#[tokio::test]
async fn test_permissive_payload_coercion() {
    let db = setup_test_db().await;
    let app = server::build_router(db);

    // A bare payload: everything except the id is defaulted, not rejected
    let req = Request::builder()
        .uri("/api/quotes")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"id":"bare"}"#))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["quote"]["pages"], 0);
    assert_eq!(body["quote"]["status"], "Draft");
    assert_eq!(body["quote"]["discount_type"], "percent");
    // The server stamps the creation time
    assert_ne!(body["quote"]["created_at"], "");
}

#[tokio::test]
async fn test_discount_fields_round_trip() {
    let db = setup_test_db().await;

    let quote = Quote {
        discount_type: DiscountType::Fixed,
        discount_value: 150.0,
        ..sample_quote("d-1", "2025-05-05T00:00:00Z")
    };
    quote_service::create_quote(&db, quote).await.unwrap();

    let fetched = quote_service::get_quote(&db, "d-1").await.unwrap();
    assert_eq!(fetched.discount_type, DiscountType::Fixed);
    assert_eq!(fetched.discount_value, 150.0);
}
