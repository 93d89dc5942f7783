//! Axum extractor for the gate-resolved identity

use crate::{ApiError, AppState};

use idm_core::UserProfile;

use std::future::Future;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use error_location::ErrorLocation;

/// Extracts the authenticated user's profile from request extensions.
///
/// The gate middleware inserts the profile; a handler reached without it
/// (mounted outside the gate) gets a 401, not a panic.
pub struct AuthUser(pub UserProfile);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            parts
                .extensions
                .get::<UserProfile>()
                .cloned()
                .map(AuthUser)
                .ok_or_else(|| ApiError::Unauthorized {
                    code: "MISSING_CREDENTIAL",
                    message: "Request did not pass the authentication gate".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })
        }
    }
}
