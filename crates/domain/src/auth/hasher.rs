//! One-way password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sha2::{Digest, Sha256};

use crate::error::AuthError;

/// Hashes and verifies account passwords.
///
/// New hashes are Argon2id PHC strings with a random salt. Accounts created
/// before the switch carry an unsalted SHA-256 hex digest; those still
/// verify, and [`PasswordHasher::needs_rehash`] flags them for an upgrade.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    pub fn hash(&self, secret: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Returns true if `secret` matches `stored`. Never errors: a stored
    /// value that cannot be parsed simply does not match.
    pub fn verify(&self, secret: &str, stored: &str) -> bool {
        if is_legacy_digest(stored) {
            return legacy_digest(secret) == stored;
        }

        match PasswordHash::new(stored) {
            Ok(parsed) => Argon2::default()
                .verify_password(secret.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Returns true for stored values in the old SHA-256 format.
    pub fn needs_rehash(&self, stored: &str) -> bool {
        is_legacy_digest(stored)
    }
}

fn is_legacy_digest(stored: &str) -> bool {
    stored.len() == 64
        && stored
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

fn legacy_digest(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}
