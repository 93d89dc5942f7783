use std::panic::Location;

use error_location::ErrorLocation;
use sqlx::error::DatabaseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Unique constraint violated on column '{column}' {location}")]
    UniqueViolation {
        column: String,
        location: ErrorLocation,
    },

    #[error("Corrupt row: {message} {location}")]
    Corrupt {
        message: String,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        // Sqlite reports duplicates as "UNIQUE constraint failed: users.<column>"
        if let sqlx::Error::Database(ref db_err) = source {
            if db_err.is_unique_violation() {
                let column = db_err
                    .message()
                    .rsplit('.')
                    .next()
                    .unwrap_or("unknown")
                    .trim()
                    .to_string();
                return Self::UniqueViolation {
                    column,
                    location: ErrorLocation::from(Location::caller()),
                };
            }
        }

        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    #[track_caller]
    fn from(source: sqlx::migrate::MigrateError) -> Self {
        Self::Migration {
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
