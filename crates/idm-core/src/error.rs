use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown role: {name} {location}")]
    UnknownRole {
        name: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
