//! Authentication service.
//!
//! Password login for dashboard administrators plus the one-time setup path
//! that creates the first admin.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use thiserror::Error;

use ridgeline_core::{Email, EmailError};

use crate::db::{AdminUserRepository, RepositoryError};
use crate::models::AdminUser;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username unknown or password wrong. Deliberately does not say which.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Password doesn't meet requirements.
    #[error("{0}")]
    WeakPassword(String),

    /// Username or password missing.
    #[error("username and password are required")]
    MissingCredentials,

    /// Contact email failed the shape check.
    #[error("invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),

    /// An administrator already exists; the setup path is closed.
    #[error("an administrator already exists")]
    SetupClosed,

    /// Password hashing failed.
    #[error("password hashing error: {0}")]
    Hash(String),

    /// Database operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Authentication service for dashboard administrators.
pub struct AuthService<'a> {
    admins: AdminUserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            admins: AdminUserRepository::new(pool),
        }
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown or
    /// the password is wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<AdminUser, AuthError> {
        let (user, password_hash) = self
            .admins
            .get_with_password_hash(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Whether any administrator exists.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the count query fails.
    pub async fn admin_exists(&self) -> Result<bool, AuthError> {
        Ok(self.admins.count().await? > 0)
    }

    /// Create the first administrator.
    ///
    /// The zero-admins count check runs immediately before the insert.
    /// Concurrent setup requests can both observe zero; that window is
    /// accepted, not mitigated.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` or `AuthError::WeakPassword`
    /// on invalid input, `AuthError::SetupClosed` if an admin already
    /// exists.
    pub async fn create_first_admin(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<AdminUser, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        validate_password(password)?;

        let email = match email.map(str::trim) {
            Some(value) if !value.is_empty() => Some(Email::parse(value)?),
            _ => None,
        };

        if self.admin_exists().await? {
            return Err(AuthError::SetupClosed);
        }

        let password_hash = hash_password(password)?;
        let user = self
            .admins
            .create(username, &password_hash, email.as_ref())
            .await?;

        Ok(user)
    }
}

/// Hash a password with argon2 and a fresh random salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored argon2 hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hash(e.to_string()))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// Validate password requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("correct horse battery").unwrap();
        let result = verify_password("wrong password", &hash);
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same password").unwrap();
        let second = hash_password("same password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_hash_is_not_the_password() {
        let hash = hash_password("supersecret1").unwrap();
        assert!(!hash.contains("supersecret1"));
    }

    #[test]
    fn test_validate_password_too_short() {
        let result = validate_password("seven77");
        assert!(matches!(result, Err(AuthError::WeakPassword(_))));
    }

    #[test]
    fn test_validate_password_minimum_length() {
        assert!(validate_password("eight888").is_ok());
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        let result = verify_password("anything", "not-a-phc-string");
        assert!(matches!(result, Err(AuthError::Hash(_))));
    }
}
