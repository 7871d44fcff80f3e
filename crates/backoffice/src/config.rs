//! Backoffice configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `OFFERDESK_API_BASE_URL` - Base URL of the document store REST API
//!
//! ## Optional
//! - `OFFERDESK_API_TOKEN` - Bearer token for the store (omit for
//!   unauthenticated development stores)
//! - `OFFERDESK_MAX_BLOCK_QUANTITY` - Maximum transport block quantity
//!   (default: 25)

use std::str::FromStr;

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::engine::DEFAULT_MAX_BLOCK_QUANTITY;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
}

/// Backoffice application configuration.
#[derive(Debug, Clone)]
pub struct BackofficeConfig {
    /// Base URL of the document store.
    pub api_base_url: Url,
    /// Optional bearer token for the store.
    pub api_token: Option<SecretString>,
    /// Maximum quantity of one transport block.
    pub max_block_quantity: Decimal,
}

impl BackofficeConfig {
    /// Load configuration from the environment.
    ///
    /// Call `dotenvy::dotenv()` first if `.env` support is wanted; this
    /// function reads the process environment only.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value does
    /// not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = required("OFFERDESK_API_BASE_URL")?;
        let api_base_url = Url::parse(&api_base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("OFFERDESK_API_BASE_URL", e.to_string()))?;

        let api_token = optional("OFFERDESK_API_TOKEN").map(SecretString::from);

        let max_block_quantity = match optional("OFFERDESK_MAX_BLOCK_QUANTITY") {
            Some(raw) => {
                let parsed = Decimal::from_str(&raw).map_err(|e| {
                    ConfigError::InvalidEnvVar("OFFERDESK_MAX_BLOCK_QUANTITY", e.to_string())
                })?;
                if parsed <= Decimal::ZERO {
                    return Err(ConfigError::InvalidEnvVar(
                        "OFFERDESK_MAX_BLOCK_QUANTITY",
                        "must be positive".to_owned(),
                    ));
                }
                parsed
            }
            None => Decimal::from(DEFAULT_MAX_BLOCK_QUANTITY),
        };

        Ok(Self {
            api_base_url,
            api_token,
            max_block_quantity,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name))
}

fn optional(name: &'static str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_max_block_quantity_is_25() {
        assert_eq!(Decimal::from(DEFAULT_MAX_BLOCK_QUANTITY), Decimal::from(25));
    }

    #[test]
    fn missing_base_url_is_reported_by_name() {
        // Runs without the variable set in CI; if a developer environment
        // exports it, the test is vacuous rather than wrong.
        if std::env::var("OFFERDESK_API_BASE_URL").is_err() {
            let err = BackofficeConfig::from_env().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::MissingEnvVar("OFFERDESK_API_BASE_URL")
            ));
        }
    }
}
