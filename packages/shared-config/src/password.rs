//! Password hashing cost configuration

use crate::{parse_env, ConfigError, ConfigResult};

/// Argon2id cost parameters
///
/// Defaults match the argon2 crate defaults (19 MiB, 2 passes, 1 lane).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHashConfig {
    /// Memory cost in KiB
    pub memory_kib: u32,

    /// Number of passes
    pub iterations: u32,

    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for PasswordHashConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl PasswordHashConfig {
    /// Load hashing cost from `ARGON2_MEMORY_KIB`, `ARGON2_ITERATIONS`, `ARGON2_PARALLELISM`
    pub fn from_env() -> ConfigResult<Self> {
        let defaults = Self::default();
        let config = Self {
            memory_kib: parse_env("ARGON2_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_env("ARGON2_ITERATIONS", defaults.iterations)?,
            parallelism: parse_env("ARGON2_PARALLELISM", defaults.parallelism)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Minimal parameters for tests. Never use in a deployment.
    pub fn insecure_fast() -> Self {
        Self {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        }
    }

    /// Reject values Argon2 cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.iterations == 0 || self.parallelism == 0 {
            return Err(ConfigError::ValidationError(
                "argon2 iterations and parallelism must be at least 1".to_string(),
            ));
        }
        if self.memory_kib < 8 * self.parallelism {
            return Err(ConfigError::ValidationError(format!(
                "argon2 memory must be at least {} KiB for parallelism {}",
                8 * self.parallelism,
                self.parallelism
            )));
        }
        Ok(())
    }
}
