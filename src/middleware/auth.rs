use axum::{extract::FromRequestParts, http::request::Parts};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::error::ApiError;
use crate::models::auth::{AuthenticatedAdmin, Claims};

impl<S> FromRequestParts<S> for AuthenticatedAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Auth("Acceso denegado. No hay token.".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Auth("Formato de autorización inválido".to_string()))?;

        let secret = parts
            .extensions
            .get::<JwtSecret>()
            .ok_or_else(|| ApiError::Storage(anyhow::anyhow!("JWT secret not configured")))?;

        decode_token(token, &secret.0)
            .map_err(|_| ApiError::Auth("Acceso denegado. Token inválido.".to_string()))
    }
}

/// Extension type to carry the JWT secret through request extensions.
#[derive(Clone)]
pub struct JwtSecret(pub String);

pub fn decode_token(token: &str, secret: &str) -> Result<AuthenticatedAdmin, anyhow::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let data = decode::<Claims>(token, &key, &validation)?;
    let claims = data.claims;

    Ok(AuthenticatedAdmin {
        username: claims.sub,
        role: claims.role,
    })
}
