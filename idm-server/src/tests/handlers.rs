use super::{body_json, body_string, get_authed, get_request, post_json, test_state};
use crate::build_router;

use http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn given_valid_registration_when_posted_then_201_with_profile() {
    let state = test_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(post_json(
            "/api/v1/auth/register",
            json!({"username": "alice", "email": "alice@example.com", "password": "correct horse"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["roles"][0], "user");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn given_duplicate_email_when_registered_then_409_naming_email() {
    let state = test_state().await;

    let first = build_router(state.clone())
        .oneshot(post_json(
            "/api/v1/auth/register",
            json!({"username": "bob", "email": "bob@example.com", "password": "hunter22"}),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = build_router(state)
        .oneshot(post_json(
            "/api/v1/auth/register",
            json!({"username": "robert", "email": "bob@example.com", "password": "hunter22"}),
        ))
        .await
        .unwrap();

    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = body_json(second).await;
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(body["error"]["field"], "email");
}

#[tokio::test]
async fn given_duplicate_username_when_registered_then_409_naming_username() {
    let state = test_state().await;

    build_router(state.clone())
        .oneshot(post_json(
            "/api/v1/auth/register",
            json!({"username": "carol", "email": "carol@example.com", "password": "hunter22"}),
        ))
        .await
        .unwrap();

    let response = build_router(state)
        .oneshot(post_json(
            "/api/v1/auth/register",
            json!({"username": "carol", "email": "other@example.com", "password": "hunter22"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"]["field"], "username");
}

#[tokio::test]
async fn given_blank_username_when_registered_then_400_validation_error() {
    let state = test_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(post_json(
            "/api/v1/auth/register",
            json!({"username": "  ", "email": "x@example.com", "password": "hunter22"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "username");
}

#[tokio::test]
async fn given_registered_user_when_logged_in_then_token_grants_access() {
    let state = test_state().await;

    build_router(state.clone())
        .oneshot(post_json(
            "/api/v1/auth/register",
            json!({"username": "dave", "email": "dave@example.com", "password": "open sesame"}),
        ))
        .await
        .unwrap();

    let login = build_router(state.clone())
        .oneshot(post_json(
            "/api/v1/auth/login",
            json!({"email": "dave@example.com", "password": "open sesame"}),
        ))
        .await
        .unwrap();

    assert_eq!(login.status(), StatusCode::OK);
    let body = body_json(login).await;
    let token = body["token"].as_str().unwrap().to_string();
    assert!(body["expires_at"].is_string());
    assert_eq!(body["user"]["username"], "dave");

    let me = build_router(state)
        .oneshot(get_authed("/api/v1/auth/me", &token))
        .await
        .unwrap();

    assert_eq!(me.status(), StatusCode::OK);
    let body = body_json(me).await;
    assert_eq!(body["user"]["username"], "dave");
}

#[tokio::test]
async fn given_wrong_password_and_unknown_email_when_logged_in_then_responses_are_identical() {
    let state = test_state().await;

    build_router(state.clone())
        .oneshot(post_json(
            "/api/v1/auth/register",
            json!({"username": "erin", "email": "erin@example.com", "password": "right-password"}),
        ))
        .await
        .unwrap();

    let wrong_password = build_router(state.clone())
        .oneshot(post_json(
            "/api/v1/auth/login",
            json!({"email": "erin@example.com", "password": "wrong-password"}),
        ))
        .await
        .unwrap();
    let unknown_email = build_router(state)
        .oneshot(post_json(
            "/api/v1/auth/login",
            json!({"email": "nobody@example.com", "password": "whatever"}),
        ))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    // Same body either way, so account existence does not leak
    let first = body_string(wrong_password).await;
    let second = body_string(unknown_email).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn given_users_when_listed_with_valid_token_then_profiles_without_hashes() {
    let state = test_state().await;
    let user = super::seed_user(&state, "frank", "frank@example.com").await;
    super::seed_user(&state, "grace", "grace@example.com").await;
    let issued = state.issuer.issue(user.id, &user.roles).unwrap();

    let response = build_router(state)
        .oneshot(get_authed("/api/v1/users", &issued.token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let raw = body_string(response).await;
    assert!(raw.contains("frank"));
    assert!(raw.contains("grace"));
    assert!(!raw.contains("password_hash"));
    assert!(!raw.contains("seeded-hash"));

    let body: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(body["users"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn given_list_endpoint_when_called_without_token_then_401() {
    let state = test_state().await;
    let app = build_router(state);

    let response = app.oneshot(get_request("/api/v1/users")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn given_running_server_when_probes_called_then_ok() {
    let state = test_state().await;

    let live = build_router(state.clone())
        .oneshot(get_request("/live"))
        .await
        .unwrap();
    assert_eq!(live.status(), StatusCode::OK);

    let ready = build_router(state.clone())
        .oneshot(get_request("/ready"))
        .await
        .unwrap();
    assert_eq!(ready.status(), StatusCode::OK);

    let health = build_router(state)
        .oneshot(get_request("/health"))
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    let body = body_json(health).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["components"]["database"], "operational");
}
