use serde::{Deserialize, Serialize};

use crate::shared::lenient;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration takes the same fields as login
pub type RegisterRequest = LoginRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub username: String,
    #[serde(rename = "currentPassword")]
    pub current_password: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub username: String,
}

impl UserInfo {
    /// Login answers must carry both an id and a username
    pub fn is_complete(&self) -> bool {
        !self.id.trim().is_empty() && !self.username.trim().is_empty()
    }
}

/// Entry of the `/login_id` listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginIdEntry {
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub username: String,
}
