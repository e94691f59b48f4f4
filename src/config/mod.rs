//! Configuration types for the Disk API SDK.
//!
//! This module provides the configuration used to build a [`DiskApi`](crate::DiskApi)
//! backed by the real HTTP transport.
//!
//! # Overview
//!
//! - [`DiskConfig`]: holds the token, base URL and client tuning knobs
//! - [`DiskConfigBuilder`]: a builder for constructing [`DiskConfig`] instances
//! - [`OAuthToken`]: a validated, debug-masked access token
//! - [`BaseUrl`]: a validated API base URL
//!
//! # Example
//!
//! ```rust
//! use disk_api::{DiskConfig, OAuthToken};
//!
//! let config = DiskConfig::builder()
//!     .token(OAuthToken::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//! assert_eq!(config.base_url().as_ref(), "https://cloud-api.yandex.net/v1/disk/");
//! ```

mod newtypes;

pub use newtypes::{BaseUrl, OAuthToken};

use std::time::Duration;

use crate::error::ConfigError;

/// Default interval between operation status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Default request timeout. Large uploads and downloads can take hours.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration for the Disk API SDK.
///
/// # Thread Safety
///
/// `DiskConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct DiskConfig {
    token: OAuthToken,
    base_url: BaseUrl,
    user_agent_prefix: Option<String>,
    timeout: Duration,
    poll_interval: Duration,
}

impl DiskConfig {
    /// Creates a new builder for constructing a `DiskConfig`.
    #[must_use]
    pub fn builder() -> DiskConfigBuilder {
        DiskConfigBuilder::new()
    }

    /// Returns the OAuth token.
    #[must_use]
    pub const fn token(&self) -> &OAuthToken {
        &self.token
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the interval between operation status checks.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

// Verify DiskConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DiskConfig>();
};

/// Builder for constructing [`DiskConfig`] instances.
///
/// The only required field is `token`.
///
/// # Defaults
///
/// - `base_url`: [`BaseUrl::DEFAULT`]
/// - `user_agent_prefix`: `None`
/// - `timeout`: 24 hours
/// - `poll_interval`: 3 seconds
#[derive(Debug, Default)]
pub struct DiskConfigBuilder {
    token: Option<OAuthToken>,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    poll_interval: Option<Duration>,
}

impl DiskConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the OAuth token (required).
    #[must_use]
    pub fn token(mut self, token: OAuthToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the interval between operation status checks.
    #[must_use]
    pub const fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Builds the [`DiskConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `token` is not set,
    /// or [`ConfigError::ZeroDuration`] if a duration is zero.
    pub fn build(self) -> Result<DiskConfig, ConfigError> {
        let token = self
            .token
            .ok_or(ConfigError::MissingRequiredField { field: "token" })?;

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ConfigError::ZeroDuration { field: "timeout" });
        }
        let poll_interval = self.poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL);
        if poll_interval.is_zero() {
            return Err(ConfigError::ZeroDuration {
                field: "poll_interval",
            });
        }

        Ok(DiskConfig {
            token,
            base_url: self.base_url.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            timeout,
            poll_interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_token() {
        let result = DiskConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "token" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = DiskConfig::builder()
            .token(OAuthToken::new("token").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.base_url(), &BaseUrl::default());
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.poll_interval(), Duration::from_secs(3));
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = DiskConfig::builder()
            .token(OAuthToken::new("token").unwrap())
            .base_url(BaseUrl::new("http://localhost:9000/api").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .timeout(Duration::from_secs(30))
            .poll_interval(Duration::from_millis(250))
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), "http://localhost:9000/api/");
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_builder_rejects_zero_poll_interval() {
        let result = DiskConfig::builder()
            .token(OAuthToken::new("token").unwrap())
            .poll_interval(Duration::ZERO)
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::ZeroDuration {
                field: "poll_interval"
            })
        ));
    }

    #[test]
    fn test_config_debug_masks_token() {
        let config = DiskConfig::builder()
            .token(OAuthToken::new("super-secret").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("DiskConfig"));
        assert!(!debug_str.contains("super-secret"));
    }
}
