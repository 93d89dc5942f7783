pub mod bearer;
pub mod claims;
pub mod error;
pub mod issuer;
pub mod validator;

pub use bearer::extract_bearer;
pub use claims::Claims;
pub use error::{AuthError, Result};
pub use issuer::{IssuedToken, TokenIssuer};
pub use validator::TokenValidator;
