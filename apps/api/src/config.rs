//! API server configuration

use std::env;

use anyhow::{bail, Context, Result};
use tally_shared_config::{
    parse_bool_env, Environment, OAuthProviderConfig, PasswordHashConfig,
};

use crate::services::AccessPolicy;

/// Minimum bootstrap admin password length in production
const MIN_ADMIN_PASSWORD_LENGTH: usize = 12;

/// Credentials for the admin account created at startup
#[derive(Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment environment
    pub environment: Environment,

    /// Server port (default: 8080)
    pub port: u16,

    /// Todo access rules
    pub access_policy: AccessPolicy,

    /// Seed sample users and todos at startup
    pub seed_sample_data: bool,

    /// Admin account to create at startup, if any
    pub admin: Option<AdminBootstrap>,

    /// External identity provider
    pub oauth: OAuthProviderConfig,

    /// Argon2 cost parameters
    pub password_hash: PasswordHashConfig,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// In production, a configured bootstrap admin must have a password of at
    /// least 12 characters. Sample data defaults to on only in development.
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_env();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("Invalid PORT value")?;

        let ownership = parse_bool_env("TODO_OWNERSHIP", true)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        let seed_sample_data = parse_bool_env("SEED_SAMPLE_DATA", environment.is_development())
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        let oauth = OAuthProviderConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load OAuth config: {}", e))?;

        let password_hash = PasswordHashConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load password hashing config: {}", e))?;

        Ok(Self {
            admin: Self::load_admin(environment.is_production())?,
            environment,
            port,
            access_policy: AccessPolicy { ownership },
            seed_sample_data,
            oauth,
            password_hash,
        })
    }

    /// Load `ADMIN_EMAIL` / `ADMIN_PASSWORD`
    ///
    /// Both or neither must be set.
    fn load_admin(is_production: bool) -> Result<Option<AdminBootstrap>> {
        let email = env::var("ADMIN_EMAIL").ok().filter(|s| !s.trim().is_empty());
        let password = env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty());

        match (email, password) {
            (None, None) => Ok(None),
            (Some(email), Some(password)) => {
                if is_production && password.chars().count() < MIN_ADMIN_PASSWORD_LENGTH {
                    bail!(
                        "ADMIN_PASSWORD must be at least {} characters in production",
                        MIN_ADMIN_PASSWORD_LENGTH
                    );
                }
                Ok(Some(AdminBootstrap { email, password }))
            }
            _ => bail!("ADMIN_EMAIL and ADMIN_PASSWORD must be set together"),
        }
    }
}
