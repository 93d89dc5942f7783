use crate::{ApiError, ApiResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    #[track_caller]
    pub fn validate(&self) -> ApiResult<()> {
        for (value, field) in [
            (&self.username, "username"),
            (&self.email, "email"),
            (&self.password, "password"),
        ] {
            if value.trim().is_empty() {
                return Err(ApiError::Validation {
                    message: format!("{} cannot be empty", field),
                    field: Some(field.to_string()),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        if !self.email.contains('@') {
            return Err(ApiError::Validation {
                message: "email is not a valid address".to_string(),
                field: Some("email".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
