use crate::{AuthError, Claims, Result as AuthErrorResult};

use idm_core::Role;

use std::panic::Location;

use chrono::{DateTime, Duration, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

/// A freshly minted credential and its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Mints time-bounded HS256 credentials at login
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl_secs: u64,
}

impl TokenIssuer {
    pub fn with_hs256(secret: &[u8], ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    /// Issue a token for `user_id`, expiring `ttl_secs` from now
    #[track_caller]
    pub fn issue(&self, user_id: Uuid, roles: &[Role]) -> AuthErrorResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.ttl_secs as i64);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            roles: roles.iter().map(|role| role.to_string()).collect(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| AuthError::Encoding {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            },
        )?;

        Ok(IssuedToken { token, expires_at })
    }
}
