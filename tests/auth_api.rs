//! End-to-end tests: real router, real migrations, in-memory SQLite.

use auth_service::infrastructure::database::migrator::Migrator;
use auth_service::server::build_app;
use auth_service::{init_database, DatabaseConfig};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> Router {
    let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    build_app(db, None)
}

fn user(username: &str, password: &str) -> Value {
    json!({
        "username": username,
        "password": password,
        "client_id": "test_client_id",
        "client_secret": "test_client_secret",
        "token_url": "https://test.token.url",
        "tenant_url": "https://test.tenant.url",
        "organization": "test_org"
    })
}

async fn post(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    send(app, req).await
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn register_success() {
    let app = app().await;

    let (status, body) = post(&app, "/auth/register", &user("testuser", "password123")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Registration Successful");
    assert_eq!(body["username"], "testuser");
}

#[tokio::test]
async fn register_duplicate_username_is_400() {
    let app = app().await;

    let (first, _) = post(&app, "/auth/register", &user("duplicateuser", "password123")).await;
    assert_eq!(first, StatusCode::OK);

    // Different payload, same username
    let (second, body) =
        post(&app, "/auth/register", &user("duplicateuser", "another-password")).await;
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Username already exists");
}

#[tokio::test]
async fn login_success() {
    let app = app().await;
    post(&app, "/auth/register", &user("loginuser", "password123")).await;

    let (status, body) = post(
        &app,
        "/auth/login",
        &json!({"username": "loginuser", "password": "password123"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login Successful");
    assert_eq!(body["username"], "loginuser");
}

#[tokio::test]
async fn wrong_password_and_unknown_user_are_indistinguishable() {
    let app = app().await;
    post(&app, "/auth/register", &user("validuser", "password123")).await;

    let (wrong_status, wrong_body) = post(
        &app,
        "/auth/login",
        &json!({"username": "validuser", "password": "wrongpassword"}),
    )
    .await;
    let (unknown_status, unknown_body) = post(
        &app,
        "/auth/login",
        &json!({"username": "nonexistentuser", "password": "password123"}),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn short_password_is_422_and_not_stored() {
    let app = app().await;

    let (status, body) = post(&app, "/auth/register", &user("shortpassuser", "short")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("password"));

    // Username is still free
    let (status, _) = post(&app, "/auth/register", &user("shortpassuser", "long-enough")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_fields_are_422() {
    let app = app().await;

    let (status, _) = post(
        &app,
        "/auth/register",
        &json!({"username": "incompleteuser", "password": "password123"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = post(&app, "/auth/login", &json!({"username": "incompleteuser"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn empty_required_field_is_422() {
    let app = app().await;
    let mut payload = user("emptyorg", "password123");
    payload["organization"] = json!("");

    let (status, body) = post(&app, "/auth/register", &payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "organization: organization is required");
}

#[tokio::test]
async fn alice_scenario() {
    let app = app().await;

    let (status, body) = post(&app, "/auth/register", &user("alice", "password123")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "Registration Successful", "username": "alice"})
    );

    let (status, body) = post(
        &app,
        "/auth/login",
        &json!({"username": "alice", "password": "password123"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Login Successful", "username": "alice"}));

    let (status, _) = post(
        &app,
        "/auth/login",
        &json!({"username": "alice", "password": "wrong"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post(&app, "/auth/register", &user("alice", "password123")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn root_and_health() {
    let app = app().await;

    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Hello World"}));

    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn health_is_degraded_when_the_database_is_gone() {
    let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let app = build_app(db.clone(), None);
    db.close().await.unwrap();

    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"]["status"], "error");
    assert!(body["database"]["latency_ms"].is_null());
}

#[tokio::test]
async fn long_usernames_are_accepted() {
    let app = app().await;
    let name = "u".repeat(300);

    let (status, body) = post(&app, "/auth/register", &user(&name, "password123")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], name.as_str());

    let (status, _) = post(
        &app,
        "/auth/login",
        &json!({"username": name, "password": "password123"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let app = app().await;

    let req = Request::builder()
        .uri("/")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.headers()["x-request-id"], "req-42");

    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let generated = resp.headers()["x-request-id"].to_str().unwrap();
    assert_eq!(generated.len(), 36);
}

#[tokio::test]
async fn openapi_document_lists_auth_routes() {
    let app = app().await;

    let req = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/auth/login"]["post"].is_object());
    assert!(body["paths"]["/auth/register"]["post"].is_object());
}
