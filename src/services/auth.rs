//! Authentication service

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::UserClaims,
    repository::UserAccounts,
};

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a plain password against a stored Argon2 hash
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[derive(Clone)]
pub struct AuthService {
    accounts: Arc<dyn UserAccounts>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(accounts: Arc<dyn UserAccounts>, config: AuthConfig) -> Self {
        Self { accounts, config }
    }

    /// Authenticate by username and return a signed JWT
    pub async fn login(&self, username: &str, password: &str) -> AppResult<String> {
        let user = self
            .accounts
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !verify_password(&user.password, password)? {
            tracing::info!("Rejected login for '{}'", username);
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        if !user.active {
            return Err(AppError::Authentication("Account is inactive".to_string()));
        }

        let now = Utc::now().timestamp();
        let claims = UserClaims {
            sub: user.username.clone(),
            user_id: user.id,
            exp: now + (self.config.jwt_expiration_hours as i64 * 3600),
            iat: now,
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!("User '{}' logged in", user.username);
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::User, repository::memory::MemoryStore};

    fn account(active: bool) -> User {
        User {
            id: 1,
            name: "Alice".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: hash_password("correct horse").unwrap(),
            creation_date: None,
            active,
        }
    }

    fn service(user: User) -> AuthService {
        AuthService::new(Arc::new(MemoryStore::with_rows(vec![user])), AuthConfig::default())
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("s3cret-pass").unwrap();
        assert_ne!(hash, "s3cret-pass");
        assert!(verify_password(&hash, "s3cret-pass").unwrap());
        assert!(!verify_password(&hash, "wrong-pass").unwrap());
        assert!(verify_password("not a hash", "s3cret-pass").is_err());
    }

    #[tokio::test]
    async fn test_login_issues_token() {
        let auth = service(account(true));

        let token = auth.login("ALICE", "correct horse").await.unwrap();
        let claims = UserClaims::from_token(&token, &AuthConfig::default().jwt_secret).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.user_id, 1);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[tokio::test]
    async fn test_login_rejections() {
        let auth = service(account(true));
        assert!(matches!(
            auth.login("alice", "battery staple").await,
            Err(AppError::Authentication(_))
        ));
        assert!(matches!(
            auth.login("bob", "correct horse").await,
            Err(AppError::Authentication(_))
        ));

        let inactive = service(account(false));
        assert!(matches!(
            inactive.login("alice", "correct horse").await,
            Err(AppError::Authentication(_))
        ));
    }
}
