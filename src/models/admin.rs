use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored credential row. Serialized in full into the backing store; never
/// returned over HTTP directly — responses go through [`AdminProfile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCredential {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub role: String,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Public view of an admin account (no hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub username: String,
    pub email: String,
    pub role: String,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&AdminCredential> for AdminProfile {
    fn from(a: &AdminCredential) -> Self {
        Self {
            username: a.username.clone(),
            email: a.email.clone(),
            role: a.role.clone(),
            last_login: a.last_login,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeUsernameRequest {
    pub current_password: String,
    pub new_username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}
