use idm_core::UserProfile;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserProfile,
}
