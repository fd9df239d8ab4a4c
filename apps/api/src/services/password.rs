//! Password hashing with Argon2id

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use tally_shared_config::PasswordHashConfig;

use crate::error::{ApiError, ApiResult};

/// Salted, deliberately slow password hashing
///
/// Verification goes through `PasswordVerifier`, which compares digests in
/// constant time.
#[derive(Clone)]
pub struct PasswordService {
    argon2: Argon2<'static>,
    /// Verified against when an account has no usable hash, so that the
    /// failure path costs the same as a real check.
    dummy_password_hash: String,
}

impl PasswordService {
    /// Build a hasher with the given cost parameters
    pub fn new(config: PasswordHashConfig) -> ApiResult<Self> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| ApiError::Internal(format!("Invalid argon2 parameters: {}", e)))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let salt = SaltString::generate(&mut OsRng);
        let dummy_password_hash = argon2
            .hash_password(b"dummy_password_for_timing_attack_prevention", &salt)
            .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(Self {
            argon2,
            dummy_password_hash,
        })
    }

    /// Hash a password into a PHC string with a fresh random salt
    pub fn hash(&self, password: &str) -> ApiResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash
    ///
    /// A missing hash still runs a full verification against the dummy hash
    /// and then reports `false`.
    pub fn verify(&self, password: &str, hash: Option<&str>) -> ApiResult<bool> {
        match hash {
            Some(hash) => {
                let parsed_hash = PasswordHash::new(hash).map_err(|e| {
                    ApiError::Internal(format!("Invalid password hash format: {}", e))
                })?;
                Ok(self
                    .argon2
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok())
            }
            None => {
                let _ = self.verify(password, Some(&self.dummy_password_hash));
                Ok(false)
            }
        }
    }
}
