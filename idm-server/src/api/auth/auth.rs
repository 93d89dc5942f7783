//! Registration / login / current-user REST handlers

use crate::{
    ApiError, ApiResult, AppState, AuthUser, LoginRequest, LoginResponse, RegisterRequest,
    UserResponse,
};

use idm_core::User;
use idm_db::UserRepository;

use std::panic::Location;

use axum::{Json, extract::State, http::StatusCode};
use error_location::ErrorLocation;

/// POST /api/v1/auth/register
///
/// Create an account. Duplicate username or email yields 409 with the
/// offending field named.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    request.validate()?;

    let password_hash =
        bcrypt::hash(&request.password, bcrypt::DEFAULT_COST).map_err(|e| {
            log::error!("Password hashing failed: {}", e);
            ApiError::Internal {
                message: "Password hashing failed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

    let user = User::new(request.username.trim(), request.email.trim(), &password_hash);

    let repo = UserRepository::new(state.pool.clone());
    repo.create(&user).await?;

    log::info!("Registered user {} ({})", user.username, user.id);

    Ok((StatusCode::CREATED, Json(UserResponse { user: user.into() })))
}

/// POST /api/v1/auth/login
///
/// Verify the password and mint a credential token. Unknown email and wrong
/// password produce the identical response, so the endpoint does not leak
/// which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let repo = UserRepository::new(state.pool.clone());

    let user = repo
        .find_by_email(request.email.trim())
        .await?
        .ok_or_else(invalid_credentials)?;

    let verified = bcrypt::verify(&request.password, &user.password_hash).map_err(|e| {
        log::error!("Password verification failed for user {}: {}", user.id, e);
        ApiError::Internal {
            message: "Credential verification failed".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    })?;

    if !verified {
        return Err(invalid_credentials());
    }

    let issued = state.issuer.issue(user.id, &user.roles)?;

    log::info!("Issued token for user {}", user.id);

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        user: user.into(),
    }))
}

/// GET /api/v1/auth/me
///
/// Return the gate-resolved identity.
pub async fn me(AuthUser(profile): AuthUser) -> Json<UserResponse> {
    Json(UserResponse { user: profile })
}

#[track_caller]
fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized {
        code: "INVALID_CREDENTIALS",
        message: "Invalid email or password".to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
