use crate::{ConfigError, ConfigErrorResult, DEFAULT_TOKEN_TTL_SECS, MIN_JWT_SECRET_BYTES};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Symmetric HS256 signing secret. Usually supplied via the
    /// IDM_AUTH_JWT_SECRET environment variable rather than on disk.
    pub jwt_secret: Option<String>,
    /// Lifetime of minted tokens, in seconds.
    pub token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let secret = self
            .jwt_secret
            .as_deref()
            .ok_or_else(|| ConfigError::auth("auth.jwt_secret is required (set IDM_AUTH_JWT_SECRET)"))?;

        if secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ConfigError::auth(format!(
                "auth.jwt_secret must be at least {} bytes",
                MIN_JWT_SECRET_BYTES
            )));
        }

        if self.token_ttl_secs == 0 {
            return Err(ConfigError::auth("auth.token_ttl_secs must be greater than 0"));
        }

        Ok(())
    }
}
