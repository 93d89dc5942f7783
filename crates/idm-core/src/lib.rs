pub mod authorize;
pub mod error;
pub mod models;

pub use authorize::authorize;
pub use error::{CoreError, Result};
pub use models::role::Role;
pub use models::user::{User, UserProfile};

#[cfg(test)]
mod tests;
