//! Square credentials and environment selection
//!
//! Supports:
//! - Direct construction from an access token and environment
//! - Environment variables (SQUARE_ACCESS_TOKEN, SQUARE_ENVIRONMENT)

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use tracing::debug;

/// Specific error for credential loading
#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("unknown Square environment '{0}' (expected 'production' or 'sandbox')")]
    UnknownEnvironment(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Which Square deployment requests go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    Sandbox,
}

impl Environment {
    /// Base URL of the v2 REST API for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://connect.squareup.com/v2",
            Environment::Sandbox => "https://connect.squareupsandbox.com/v2",
        }
    }
}

/// Square API credentials
#[derive(Debug, Clone)]
pub struct SquareCredentials {
    pub access_token: String,
    pub environment: Environment,
}

impl SquareCredentials {
    pub fn new(access_token: impl Into<String>, environment: Environment) -> Self {
        Self {
            access_token: access_token.into(),
            environment,
        }
    }

    /// Load credentials from environment variables. SQUARE_ENVIRONMENT is
    /// optional and defaults to production.
    pub fn from_env() -> Result<Self, CredentialsError> {
        let access_token =
            env::var("SQUARE_ACCESS_TOKEN").map_err(|_| anyhow!("SQUARE_ACCESS_TOKEN not set"))?;
        let environment = match env::var("SQUARE_ENVIRONMENT") {
            Ok(name) => parse_environment(&name)?,
            Err(_) => Environment::Production,
        };
        debug!("Loaded Square credentials from environment variables");

        Ok(Self {
            access_token,
            environment,
        })
    }
}

/// Parse an environment name as credential forms spell it (any case).
fn parse_environment(name: &str) -> Result<Environment, CredentialsError> {
    match name.to_ascii_lowercase().as_str() {
        "production" => Ok(Environment::Production),
        "sandbox" => Ok(Environment::Sandbox),
        _ => Err(CredentialsError::UnknownEnvironment(name.to_string())),
    }
}
