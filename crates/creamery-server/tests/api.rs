//! End-to-end tests for the flavor routes, driven through the router
//! with `tower::ServiceExt::oneshot` against a temp-file database.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use creamery_db::{create_pool, run_migrations, PoolSettings};
use creamery_server::{app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app(dir: &tempfile::TempDir) -> Router {
    let db_path = dir.path().join("creamery.db");
    let pool = create_pool(
        db_path.to_str().expect("temp path should be utf-8"),
        PoolSettings::default(),
    )
    .expect("should create pool");
    {
        let conn = pool.get().expect("should get connection");
        run_migrations(&conn).expect("migrations should succeed");
    }
    app(AppState { pool })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("should build request"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("should build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should complete");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("should read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    (status, json)
}

#[tokio::test]
async fn list_after_startup_returns_seed_catalog() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let app = test_app(&dir);

    let (status, body) = send(&app, "GET", "/api/flavors", None).await;
    assert_eq!(status, StatusCode::OK);

    let flavors = body.as_array().expect("body should be an array");
    assert_eq!(flavors.len(), 6);

    let names: Vec<&str> = flavors
        .iter()
        .map(|f| f["name"].as_str().expect("name should be a string"))
        .collect();
    assert!(names.contains(&"French Vanilla"));
    assert!(names.contains(&"Coffee"));

    for flavor in flavors {
        assert!(flavor["id"].as_i64().expect("id should be an integer") > 0);
        assert!(flavor["is_favorite"].is_boolean());
        assert!(flavor["created_at"].is_string());
        assert!(flavor["updated_at"].is_string());
    }
}

#[tokio::test]
async fn create_fetch_update_delete_lifecycle() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let app = test_app(&dir);

    // POST
    let (status, created) = send(
        &app,
        "POST",
        "/api/flavors",
        Some(json!({"name": "Pistachio", "is_favorite": true})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Pistachio");
    assert_eq!(created["is_favorite"], true);
    let id = created["id"].as_i64().expect("id should be an integer");
    assert!(id > 0);

    // GET round trip
    let (status, fetched) = send(&app, "GET", &format!("/api/flavors/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    // PUT
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/flavors/{id}"),
        Some(json!({"name": "Pistachio Deluxe", "is_favorite": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "Pistachio Deluxe");
    assert_eq!(updated["is_favorite"], false);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert!(
        updated["updated_at"].as_str().expect("updated_at string")
            > created["updated_at"].as_str().expect("updated_at string")
    );

    // DELETE
    let (status, body) = send(&app, "DELETE", &format!("/api/flavors/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    // Gone afterwards
    let (status, _) = send(&app, "GET", &format!("/api/flavors/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_without_is_favorite_defaults_to_false() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let app = test_app(&dir);

    let (status, created) = send(
        &app,
        "POST",
        "/api/flavors",
        Some(json!({"name": "Lemon Sorbet"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["is_favorite"], false);

    // Explicit null behaves the same as absent.
    let (status, created) = send(
        &app,
        "POST",
        "/api/flavors",
        Some(json!({"name": "Stracciatella", "is_favorite": null})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["is_favorite"], false);
}

#[tokio::test]
async fn created_ids_are_previously_unseen() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let app = test_app(&dir);

    let (_, before) = send(&app, "GET", "/api/flavors", None).await;
    let seen: Vec<i64> = before
        .as_array()
        .expect("array")
        .iter()
        .map(|f| f["id"].as_i64().expect("id"))
        .collect();

    let (_, first) = send(
        &app,
        "POST",
        "/api/flavors",
        Some(json!({"name": "Mango"})),
    )
    .await;
    let (_, second) = send(
        &app,
        "POST",
        "/api/flavors",
        Some(json!({"name": "Raspberry Ripple"})),
    )
    .await;

    let first_id = first["id"].as_i64().expect("id");
    let second_id = second["id"].as_i64().expect("id");
    assert!(!seen.contains(&first_id));
    assert!(!seen.contains(&second_id));
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn missing_rows_answer_404() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let app = test_app(&dir);

    let (status, _) = send(&app, "GET", "/api/flavors/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/flavors/9999",
        Some(json!({"name": "Ghost", "is_favorite": false})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/api/flavors/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_requests_are_rejected() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let app = test_app(&dir);

    // Non-numeric id fails path extraction.
    let (status, _) = send(&app, "GET", "/api/flavors/vanilla", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // PUT requires both fields; a missing is_favorite is a malformed body.
    let (status, _) = send(
        &app,
        "PUT",
        "/api/flavors/1",
        Some(json!({"name": "Chocolate"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // POST requires a name.
    let (status, _) = send(&app, "POST", "/api/flavors", Some(json!({"is_favorite": true}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
