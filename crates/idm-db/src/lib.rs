pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::connect;
pub use error::{DbError, Result};
pub use repositories::user_repository::UserRepository;

/// Embedded migrations, run by the server at startup and by tests against
/// in-memory databases.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
