use idm_auth::{TokenIssuer, TokenValidator};

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared application state.
///
/// The signing secret is baked into the issuer and validator at startup and
/// immutable afterwards; the gate and handlers receive both through this
/// state rather than any global.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub validator: Arc<TokenValidator>,
    pub issuer: Arc<TokenIssuer>,
}
