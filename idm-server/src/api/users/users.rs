//! User listing REST handlers
//!
//! Mounted behind the gate; responses carry profile projections only,
//! never credential hashes.

use crate::{ApiResult, AppState, AuthUser, UserListResponse};

use idm_core::UserProfile;
use idm_db::UserRepository;

use axum::{Json, extract::State};

/// GET /api/v1/users
///
/// List all users as safe projections.
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(_profile): AuthUser,
) -> ApiResult<Json<UserListResponse>> {
    let repo = UserRepository::new(state.pool.clone());
    let users = repo.list().await?;

    Ok(Json(UserListResponse {
        users: users.into_iter().map(UserProfile::from).collect(),
    }))
}
