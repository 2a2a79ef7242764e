use serde::{Deserialize, Serialize};

use super::admin::AdminProfile;

/// Claims embedded in the JWT bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // admin username
    pub role: String,
    pub iat: usize,
    pub exp: usize,
}

/// Extracted from a validated JWT — available via the axum extractor.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub username: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub admin: AdminProfile,
}
