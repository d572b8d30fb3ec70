//! Signup and one-shot login over the user store.
//!
//! Passwords are stored as salted SHA-256 digests (`salt$digest`, hex). No
//! session or token is issued: a successful login only echoes the user's
//! public fields.

use chrono::Utc;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::models::{present, LoginRequest, PublicUser, SignupRequest, User};
use crate::store::RecordStore;

const SALT_LEN: usize = 16;

/// Hashes `password` with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    let salt = hex::encode(salt);
    let digest = digest(&salt, password);
    format!("{}${}", salt, digest)
}

/// Checks `password` against a stored `salt$digest` value.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, expected)) = stored.split_once('$') else {
        return false;
    };
    constant_time_compare(&digest(salt, password), expected)
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.as_bytes()
        .iter()
        .zip(b.as_bytes().iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

pub struct AuthService {
    store: Arc<dyn RecordStore<User>>,
    write_lock: Mutex<()>,
}

impl AuthService {
    pub fn new(store: Arc<dyn RecordStore<User>>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Registers a new user. Fails with `Conflict` when the email is taken.
    pub async fn signup(&self, request: SignupRequest) -> Result<PublicUser, AppError> {
        let (Some(name), Some(email), Some(password)) = (
            present(&request.name),
            present(&request.email),
            request.password.as_deref().filter(|p| !p.is_empty()),
        ) else {
            return Err(AppError::BadRequest(
                "Name, email and password are required".to_string(),
            ));
        };

        let _guard = self.write_lock.lock().await;

        let mut users = self
            .store
            .read_all()
            .await
            .map_err(|e| AppError::storage("Failed to load users", e))?;

        if users.iter().any(|u| u.email == email) {
            tracing::info!("Signup rejected, email already registered");
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let user = User {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password),
            created_at: Utc::now(),
        };
        users.push(user.clone());

        self.store
            .write_all(&users)
            .await
            .map_err(|e| AppError::storage("Failed to save user", e))?;

        tracing::info!("Registered user '{}'", user.name);
        Ok(PublicUser::from(&user))
    }

    /// Checks credentials. Unknown email and wrong password look the same to the caller.
    pub async fn login(&self, request: LoginRequest) -> Result<PublicUser, AppError> {
        let (Some(email), Some(password)) = (
            present(&request.email),
            request.password.as_deref().filter(|p| !p.is_empty()),
        ) else {
            return Err(AppError::BadRequest(
                "Email and password are required".to_string(),
            ));
        };

        let users = self
            .store
            .read_all()
            .await
            .map_err(|e| AppError::storage("Failed to load users", e))?;

        let user = users
            .iter()
            .find(|u| u.email == email)
            .filter(|u| verify_password(password, &u.password_hash))
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        tracing::info!("User '{}' logged in", user.name);
        Ok(PublicUser::from(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn signup(name: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[test]
    fn test_hash_is_salted_and_verifies() {
        let a = hash_password("hunter2");
        let b = hash_password("hunter2");
        assert_ne!(a, b);
        assert!(verify_password("hunter2", &a));
        assert!(verify_password("hunter2", &b));
        assert!(!verify_password("hunter3", &a));
        assert!(!a.contains("hunter2"));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(!verify_password("hunter2", "hunter2"));
        assert!(!verify_password("hunter2", ""));
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let store = Arc::new(MemoryStore::<User>::new());
        let service = AuthService::new(store.clone());

        let user = service
            .signup(signup("Ana", "ana@acme.io", "s3cret"))
            .await
            .unwrap();
        assert_eq!(user.email, "ana@acme.io");

        let stored = store.read_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_ne!(stored[0].password_hash, "s3cret");

        let user = service.login(login("ana@acme.io", "s3cret")).await.unwrap();
        assert_eq!(
            user,
            PublicUser {
                name: "Ana".into(),
                email: "ana@acme.io".into()
            }
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let service = AuthService::new(Arc::new(MemoryStore::<User>::new()));
        service
            .signup(signup("Ana", "ana@acme.io", "one"))
            .await
            .unwrap();

        let err = service
            .signup(signup("Other", "ana@acme.io", "two"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_login_failures() {
        let service = AuthService::new(Arc::new(MemoryStore::<User>::new()));
        service
            .signup(signup("Ana", "ana@acme.io", "right"))
            .await
            .unwrap();

        let err = service.login(login("ana@acme.io", "wrong")).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let err = service.login(login("bob@acme.io", "right")).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let err = service
            .login(LoginRequest {
                email: Some("ana@acme.io".into()),
                password: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
