use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use zikr_api::config::ServerConfig;
use zikr_api::router::build_app_router;
use zikr_api::state::AppState;
use zikr_core::timezone::DHAKA_OFFSET_MINUTES;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        default_timezone_offset_minutes: DHAKA_OFFSET_MINUTES,
        retention_days: 365,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: sqlx::PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Build a router backed by a lazy pool that never connects.
///
/// Suitable for tests that exercise request validation, identity checks,
/// and error mapping: those paths reject before touching the database.
pub fn build_offline_app() -> Router {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        // Fail fast instead of retrying for sqlx's default 30s, which would
        // otherwise trip the request-timeout middleware before the health
        // handler can report "degraded".
        .acquire_timeout(std::time::Duration::from_secs(1))
        .connect_lazy("postgres://localhost/unreachable")
        .expect("lazy pool");
    build_test_app(pool)
}

/// Send a GET request without an identity header.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request as the given user.
#[allow(dead_code)]
pub async fn get_as(app: Router, user_id: &str, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("x-user-id", user_id)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body as the given user.
#[allow(dead_code)]
pub async fn post_json_as(
    app: Router,
    user_id: &str,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-user-id", user_id)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
