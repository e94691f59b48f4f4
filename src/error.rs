//! Configuration errors.
//!
//! Every configuration constructor validates its input and returns
//! `Result<T, ConfigError>`. Request-time failures use
//! [`DiskError`](crate::DiskError) instead.
//!
//! ```rust
//! use disk_api::{ConfigError, OAuthToken};
//!
//! assert!(matches!(OAuthToken::new("  "), Err(ConfigError::EmptyToken)));
//! ```

use thiserror::Error;

/// A rejected configuration value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// OAuth token cannot be empty.
    #[error("OAuth token cannot be empty. Please provide a valid Disk API access token.")]
    EmptyToken,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide an absolute http(s) URL (e.g., 'https://cloud-api.yandex.net/v1/disk/').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A duration setting is zero where a positive value is required.
    #[error("Invalid duration for '{field}': must be greater than zero.")]
    ZeroDuration {
        /// The name of the offending setting.
        field: &'static str,
    },
}
