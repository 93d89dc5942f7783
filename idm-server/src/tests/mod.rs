mod handlers;

use crate::AppState;

use idm_auth::{TokenIssuer, TokenValidator};
use idm_core::User;
use idm_db::UserRepository;

use std::sync::Arc;

use axum::body::Body;
use axum::response::Response;
use http::Request;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http_body_util::BodyExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

/// In-memory state with migrations applied and test keys installed
pub(crate) async fn test_state() -> AppState {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    idm_db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    AppState {
        pool,
        validator: Arc::new(TokenValidator::with_hs256(TEST_SECRET)),
        issuer: Arc::new(TokenIssuer::with_hs256(TEST_SECRET, 3600)),
    }
}

/// Insert a user directly, bypassing the register endpoint's bcrypt cost
pub(crate) async fn seed_user(state: &AppState, username: &str, email: &str) -> User {
    let user = User::new(username, email, "$2b$12$seeded-hash-not-a-real-one");
    UserRepository::new(state.pool.clone())
        .create(&user)
        .await
        .expect("Failed to seed user");
    user
}

pub(crate) fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub(crate) fn get_authed(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub(crate) fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub(crate) async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub(crate) async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
