use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::error::ApiError;
use crate::models::{
    admin::{AdminCredential, AdminProfile},
    auth::{Claims, LoginResponse},
};
use crate::store::JsonStore;

const BCRYPT_COST: u32 = 12;

/// Same message for unknown username and wrong password, so responses do not
/// reveal which accounts exist.
fn invalid_credentials() -> ApiError {
    ApiError::Auth("Credenciales incorrectas".to_string())
}

pub struct AuthService;

impl AuthService {
    /// Validate credentials, stamp lastLogin and issue a signed bearer token.
    pub async fn login(
        store: &JsonStore,
        username: &str,
        password: &str,
        jwt_secret: &str,
        expiry_hours: u64,
    ) -> Result<LoginResponse, ApiError> {
        let jwt_secret = jwt_secret.to_string();
        let username = username.to_string();
        let password = password.to_string();

        let (profile, token) = store
            .update(move |doc| {
                let admin = doc
                    .admins
                    .iter_mut()
                    .find(|a| a.username == username)
                    .ok_or_else(invalid_credentials)?;

                let valid = bcrypt::verify(&password, &admin.password_hash)
                    .map_err(|_| invalid_credentials())?;
                if !valid {
                    return Err(invalid_credentials());
                }

                admin.last_login = Some(Utc::now());
                let token =
                    Self::generate_token(&admin.username, &admin.role, &jwt_secret, expiry_hours)?;
                Ok((AdminProfile::from(&*admin), token))
            })
            .await?;

        Ok(LoginResponse {
            success: true,
            token,
            admin: profile,
        })
    }

    /// Look up the profile behind a validated token.
    pub async fn profile(store: &JsonStore, username: &str) -> Result<AdminProfile, ApiError> {
        let doc = store.read().await;
        doc.admins
            .iter()
            .find(|a| a.username == username)
            .map(AdminProfile::from)
            .ok_or_else(|| ApiError::Auth("Acceso denegado. Usuario no encontrado.".to_string()))
    }

    /// Rename the account after re-proving the current password. Reissues a
    /// token because the old one carries the old username.
    pub async fn change_username(
        store: &JsonStore,
        username: &str,
        current_password: &str,
        new_username: &str,
        jwt_secret: &str,
        expiry_hours: u64,
    ) -> Result<LoginResponse, ApiError> {
        let new_username = new_username.trim().to_string();
        if new_username.is_empty() {
            return Err(ApiError::Validation(
                "El nombre de usuario no puede estar vacío".to_string(),
            ));
        }

        let jwt_secret = jwt_secret.to_string();
        let username = username.to_string();
        let current_password = current_password.to_string();

        let (profile, token) = store
            .update(move |doc| {
                if doc
                    .admins
                    .iter()
                    .any(|a| a.username == new_username && a.username != username)
                {
                    return Err(ApiError::Conflict(
                        "El nombre de usuario ya está en uso".to_string(),
                    ));
                }

                let admin = doc
                    .admins
                    .iter_mut()
                    .find(|a| a.username == username)
                    .ok_or_else(|| {
                        ApiError::Auth("Acceso denegado. Usuario no encontrado.".to_string())
                    })?;

                let valid = bcrypt::verify(&current_password, &admin.password_hash)
                    .map_err(|e| ApiError::Storage(e.into()))?;
                if !valid {
                    return Err(ApiError::Auth("Contraseña actual incorrecta".to_string()));
                }

                admin.username = new_username;
                let token =
                    Self::generate_token(&admin.username, &admin.role, &jwt_secret, expiry_hours)?;
                Ok((AdminProfile::from(&*admin), token))
            })
            .await?;

        Ok(LoginResponse {
            success: true,
            token,
            admin: profile,
        })
    }

    /// Replace the password after re-proving the current one. The new value
    /// is stored bcrypt-hashed, never in clear text.
    pub async fn change_password(
        store: &JsonStore,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        if new_password.chars().count() < 6 {
            return Err(ApiError::Validation(
                "La nueva contraseña debe tener al menos 6 caracteres".to_string(),
            ));
        }

        let username = username.to_string();
        let current_password = current_password.to_string();
        let new_password = new_password.to_string();

        store
            .update(move |doc| {
                let admin = doc
                    .admins
                    .iter_mut()
                    .find(|a| a.username == username)
                    .ok_or_else(|| {
                        ApiError::Auth("Acceso denegado. Usuario no encontrado.".to_string())
                    })?;

                let valid = bcrypt::verify(&current_password, &admin.password_hash)
                    .map_err(|e| ApiError::Storage(e.into()))?;
                if !valid {
                    return Err(ApiError::Auth("Contraseña actual incorrecta".to_string()));
                }

                admin.password_hash =
                    bcrypt::hash(&new_password, BCRYPT_COST).map_err(|e| ApiError::Storage(e.into()))?;
                Ok(())
            })
            .await
    }

    /// Seed the first admin when the store has none. Returns true if seeded.
    pub async fn seed_admin(
        store: &JsonStore,
        username: &str,
        password: &str,
    ) -> Result<bool, ApiError> {
        let username = username.to_string();
        let hash = bcrypt::hash(password, BCRYPT_COST).map_err(|e| ApiError::Storage(e.into()))?;

        store
            .update(move |doc| {
                if !doc.admins.is_empty() {
                    return Ok(false);
                }
                doc.admins.push(AdminCredential {
                    username,
                    password_hash: hash,
                    email: "admin@manarestobar.com".to_string(),
                    role: "admin".to_string(),
                    last_login: None,
                    created_at: Utc::now(),
                });
                Ok(true)
            })
            .await
    }

    pub fn generate_token(
        username: &str,
        role: &str,
        secret: &str,
        expiry_hours: u64,
    ) -> Result<String, ApiError> {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: username.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + (expiry_hours * 3600) as usize,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| ApiError::Storage(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::decode_token;

    const SECRET: &str = "secreto-de-prueba";

    async fn seeded_store(dir: &tempfile::TempDir) -> JsonStore {
        let store = JsonStore::new(dir.path().join("site.json"));
        AuthService::seed_admin(&store, "admin", "admin123")
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir).await;

        let res = AuthService::login(&store, "admin", "admin123", SECRET, 24)
            .await
            .unwrap();
        assert!(res.success);
        assert_eq!(res.admin.username, "admin");
        assert!(res.admin.last_login.is_some());

        let decoded = decode_token(&res.token, SECRET).unwrap();
        assert_eq!(decoded.username, "admin");
        assert_eq!(decoded.role, "admin");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_share_the_same_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir).await;

        let wrong_pass = AuthService::login(&store, "admin", "otra", SECRET, 24)
            .await
            .unwrap_err();
        let unknown = AuthService::login(&store, "nadie", "admin123", SECRET, 24)
            .await
            .unwrap_err();
        assert_eq!(wrong_pass.to_string(), unknown.to_string());
        assert_eq!(wrong_pass.to_string(), "Credenciales incorrectas");
    }

    #[tokio::test]
    async fn tampered_and_expired_tokens_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir).await;

        let res = AuthService::login(&store, "admin", "admin123", SECRET, 24)
            .await
            .unwrap();

        let mut tampered = res.token.clone();
        tampered.pop();
        tampered.push(if tampered.ends_with('a') { 'b' } else { 'a' });
        assert!(decode_token(&tampered, SECRET).is_err());
        assert!(decode_token(&res.token, "otro-secreto").is_err());

        // an already-expired token must fail exp validation (past the 60s leeway)
        let past = (Utc::now().timestamp() - 7200) as usize;
        let claims = Claims {
            sub: "admin".to_string(),
            role: "admin".to_string(),
            iat: past,
            exp: past + 3600,
        };
        let expired = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(decode_token(&expired, SECRET).is_err());
    }

    #[tokio::test]
    async fn change_password_enforces_length_and_reproof() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir).await;

        let short = AuthService::change_password(&store, "admin", "admin123", "abc")
            .await
            .unwrap_err();
        assert!(matches!(short, ApiError::Validation(_)));

        let wrong = AuthService::change_password(&store, "admin", "incorrecta", "nueva-clave")
            .await
            .unwrap_err();
        assert!(matches!(wrong, ApiError::Auth(_)));

        AuthService::change_password(&store, "admin", "admin123", "nueva-clave")
            .await
            .unwrap();

        // the old password no longer authenticates, the new one does
        assert!(AuthService::login(&store, "admin", "admin123", SECRET, 24)
            .await
            .is_err());
        assert!(AuthService::login(&store, "admin", "nueva-clave", SECRET, 24)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn change_username_reproofs_and_reissues_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir).await;

        let wrong = AuthService::change_username(&store, "admin", "mala", "gerente", SECRET, 24)
            .await
            .unwrap_err();
        assert!(matches!(wrong, ApiError::Auth(_)));

        let res = AuthService::change_username(&store, "admin", "admin123", "gerente", SECRET, 24)
            .await
            .unwrap();
        assert_eq!(res.admin.username, "gerente");
        assert_eq!(decode_token(&res.token, SECRET).unwrap().username, "gerente");

        // old username is gone, password is unchanged
        assert!(AuthService::login(&store, "admin", "admin123", SECRET, 24)
            .await
            .is_err());
        assert!(AuthService::login(&store, "gerente", "admin123", SECRET, 24)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn change_username_rejects_collisions() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir).await;

        // second account to collide with
        let hash = bcrypt::hash("clave-segunda", 4).unwrap();
        store
            .update(move |doc| {
                doc.admins.push(AdminCredential {
                    username: "gerente".to_string(),
                    password_hash: hash,
                    email: "gerente@manarestobar.com".to_string(),
                    role: "admin".to_string(),
                    last_login: None,
                    created_at: Utc::now(),
                });
                Ok(())
            })
            .await
            .unwrap();

        let taken = AuthService::change_username(&store, "admin", "admin123", "gerente", SECRET, 24)
            .await
            .unwrap_err();
        assert!(matches!(taken, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn seed_admin_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("site.json"));

        assert!(AuthService::seed_admin(&store, "admin", "admin123")
            .await
            .unwrap());
        assert!(!AuthService::seed_admin(&store, "otro", "clave123")
            .await
            .unwrap());
        assert_eq!(store.read().await.admins.len(), 1);
    }
}
