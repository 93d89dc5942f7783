use error_location::ErrorLocation;
use thiserror::Error;

/// Gate rejection taxonomy. The four credential variants all surface as 401
/// to the client, but with distinct machine-readable codes so callers can
/// tell "log in again" from "credential is bogus".
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing or malformed Authorization header {location}")]
    MissingCredential { location: ErrorLocation },

    #[error("Malformed or tampered credential: {source} {location}")]
    MalformedCredential {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Credential expired {location}")]
    ExpiredCredential { location: ErrorLocation },

    #[error("Credential subject {user_id} no longer exists {location}")]
    StaleCredential {
        user_id: String,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Token encoding failed: {source} {location}")]
    Encoding {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Machine-readable code for client responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingCredential { .. } => "MISSING_CREDENTIAL",
            // An unparseable claim is a structurally bad token
            Self::MalformedCredential { .. } | Self::InvalidClaim { .. } => "MALFORMED_CREDENTIAL",
            Self::ExpiredCredential { .. } => "EXPIRED_CREDENTIAL",
            Self::StaleCredential { .. } => "STALE_CREDENTIAL",
            Self::Encoding { .. } => "TOKEN_ENCODING_FAILED",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
