pub mod api;
pub mod error;
pub mod gate;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{
        auth::{login, me, register},
        login_request::LoginRequest,
        login_response::LoginResponse,
        register_request::RegisterRequest,
        user_response::UserResponse,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::auth_user::AuthUser,
    users::{user_list_response::UserListResponse, users::list_users},
};

pub use crate::routes::build_router;
pub use crate::state::AppState;
