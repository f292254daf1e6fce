//! # Password hashing and verification: Argon2id
//!
//! [`Passwords`] owns the Argon2id cost parameters and exposes two operations:
//!
//! - [`Passwords::hash`]: generates a random salt via [`OsRng`], hashes the plaintext
//!   and returns a PHC-format string (e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`). This
//!   string is stored in the `password_hash` column of the `users` table.
//!
//! - [`Passwords::verify`]: parses a PHC-format hash and checks whether the provided
//!   plaintext matches. Returns `Ok(true)` on success, `Ok(false)` on mismatch, or
//!   `Err` if the stored hash is malformed.
//!
//! The parameters embedded in a stored hash win over the configured ones on
//! verification, so changing the cost does not invalidate existing accounts.
//! Both operations are CPU-bound and run on the blocking thread pool.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone)]
pub struct Passwords {
    params: Params,
}

impl Default for Passwords {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Passwords {
    /// Custom cost: memory in KiB, iterations, parallelism. Tests use the
    /// minimum to keep registration fast.
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, argon2::Error> {
        Ok(Self {
            params: Params::new(m_cost, t_cost, p_cost, None)?,
        })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password. Returns a PHC-format string.
    pub fn hash_blocking(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2().hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Verify a password against a PHC-format hash string.
    pub fn verify_blocking(&self, password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
        let parsed_hash = PasswordHash::new(hash)?;
        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    pub async fn hash(&self, password: String) -> ApiResult<String> {
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.hash_blocking(&password))
            .await
            .map_err(|e| {
                tracing::error!("Password hashing task failed: {}", e);
                ApiError::internal("Internal server error")
            })?
            .map_err(|e| {
                tracing::error!("Failed to hash password: {}", e);
                ApiError::internal("Internal server error")
            })
    }

    pub async fn verify(&self, password: String, hash: String) -> ApiResult<bool> {
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.verify_blocking(&password, &hash))
            .await
            .map_err(|e| {
                tracing::error!("Password verification task failed: {}", e);
                ApiError::internal("Internal server error")
            })?
            .map_err(|e| {
                tracing::error!("Invalid password hash: {}", e);
                ApiError::internal("Internal server error")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Passwords {
        Passwords::with_params(1024, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_is_salted_phc() {
        let passwords = cheap();
        let a = passwords.hash_blocking("hunter2").unwrap();
        let b = passwords.hash_blocking("hunter2").unwrap();
        assert!(a.starts_with("$argon2id$"));
        assert_ne!(a, b);
        assert!(!a.contains("hunter2"));
    }

    #[test]
    fn test_verify() {
        let passwords = cheap();
        let hash = passwords.hash_blocking("hunter2").unwrap();
        assert!(passwords.verify_blocking("hunter2", &hash).unwrap());
        assert!(!passwords.verify_blocking("hunter3", &hash).unwrap());
        assert!(passwords.verify_blocking("hunter2", "not a hash").is_err());
    }

    #[tokio::test]
    async fn test_async_roundtrip() {
        let passwords = cheap();
        let hash = passwords.hash("secret".to_string()).await.unwrap();
        assert!(passwords.verify("secret".to_string(), hash).await.unwrap());
    }
}
