//! The authentication gate.
//!
//! Runs ahead of every protected handler: extracts the bearer credential,
//! verifies it against the process-wide secret, re-resolves the subject
//! against the identity store, and attaches the resulting profile to the
//! request. Any failure terminates the request with exactly one response
//! and the downstream handler never runs.
//!
//! Re-resolving on every request trades a store lookup for correctness
//! under deletion: tokens are not revocable, so a deleted account must be
//! caught here.

use crate::{ApiError, ApiResult, AppState};

use idm_auth::{AuthError, extract_bearer};
use idm_core::{Role, UserProfile, authorize};
use idm_db::UserRepository;

use std::panic::Location;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use error_location::ErrorLocation;
use uuid::Uuid;

/// Gate middleware for protected routes.
///
/// Stateless per invocation; nothing is retained between requests.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    // Step 1: extraction
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());
    let token = extract_bearer(header)?;

    // Step 2: verification (signature, structure, expiry)
    let claims = state.validator.validate(token)?;
    let user_id = claims.subject_id()?;

    // Step 3: re-resolution against the identity store
    let repo = UserRepository::new(state.pool.clone());
    let user = match repo.find_by_id(user_id).await {
        Ok(user) => user,
        Err(e) => {
            // Correlation id lets operators match this response to the log
            // line; the token itself is never logged.
            let correlation = Uuid::new_v4();
            log::error!(
                "[{}] identity store failure during authentication of {} {}: {}",
                correlation,
                request.method(),
                request.uri().path(),
                e
            );
            return Err(ApiError::Dependency {
                correlation,
                location: ErrorLocation::from(Location::caller()),
            });
        }
    };

    let user = user.ok_or_else(|| AuthError::StaleCredential {
        user_id: user_id.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    // Step 4: attach the safe projection and delegate
    request.extensions_mut().insert(UserProfile::from(user));

    Ok(next.run(request).await)
}

/// Role check for handlers that need more than authentication.
///
/// A plain function over the resolved profile and the allowed roles; deny
/// maps to 403.
#[track_caller]
pub fn require_role(profile: &UserProfile, allowed: &[Role]) -> ApiResult<()> {
    if authorize(&profile.roles, allowed) {
        Ok(())
    } else {
        Err(ApiError::Forbidden {
            message: format!(
                "user {} lacks the required role",
                profile.id
            ),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
