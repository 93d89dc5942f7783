use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Pull the token out of an `Authorization: Bearer <token>` header value.
///
/// An absent header, a missing second segment, or a non-Bearer scheme all
/// collapse to `MissingCredential`: the request simply does not carry a
/// usable credential.
#[track_caller]
pub fn extract_bearer(header: Option<&str>) -> AuthErrorResult<&str> {
    let header = header.ok_or_else(|| AuthError::MissingCredential {
        location: ErrorLocation::from(Location::caller()),
    })?;

    let mut segments = header.split_whitespace();
    match (segments.next(), segments.next()) {
        (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthError::MissingCredential {
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}
