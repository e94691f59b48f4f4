//! The access token and the API base URL.
//!
//! Both are checked once when built, so the rest of the crate can use them
//! without re-validating.

use crate::error::ConfigError;
use std::fmt;

/// A validated Disk API OAuth token.
///
/// Surrounding whitespace is trimmed and an empty token is rejected.
/// `Debug` prints `*****` in place of the secret.
///
/// # Example
///
/// ```rust
/// use disk_api::OAuthToken;
///
/// let token = OAuthToken::new("AQAAAA-secret").unwrap();
/// assert_eq!(token.as_ref(), "AQAAAA-secret");
/// assert_eq!(format!("{:?}", token), "OAuthToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthToken(String);

impl OAuthToken {
    /// Creates a new validated token.
    ///
    /// Surrounding whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is empty or blank.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        Ok(Self(token.to_string()))
    }

    /// Returns the value of the `Authorization` header for this token.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("OAuth {}", self.0)
    }
}

impl AsRef<str> for OAuthToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OAuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OAuthToken(*****)")
    }
}

/// A validated base URL for the Disk API.
///
/// The URL must be absolute with an `http` or `https` scheme and a non-empty
/// host. A trailing `/` is appended when missing so that relative resource
/// paths such as `resources/upload` can be concatenated directly.
///
/// # Example
///
/// ```rust
/// use disk_api::BaseUrl;
///
/// let url = BaseUrl::new("http://localhost:8080/v1/disk").unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:8080/v1/disk/");
/// assert_eq!(url.join("resources"), "http://localhost:8080/v1/disk/resources");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// The public Disk API endpoint.
    pub const DEFAULT: &'static str = "https://cloud-api.yandex.net/v1/disk/";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL is not an absolute
    /// http(s) URL with a host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim();
        let invalid = || ConfigError::InvalidBaseUrl {
            url: url.to_string(),
        };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        let remainder = &url[scheme_end + 3..];
        let host_end = remainder.find([':', '/', '?', '#']).unwrap_or(remainder.len());
        if host_end == 0 {
            return Err(invalid());
        }
        if remainder.contains(['?', '#']) {
            return Err(invalid());
        }

        let mut normalized = url.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        Ok(Self(normalized))
    }

    /// Appends a relative path to the base URL.
    #[must_use]
    pub fn join(&self, relative: &str) -> String {
        format!("{}{}", self.0, relative.trim_start_matches('/'))
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_rejects_empty_and_blank() {
        assert_eq!(OAuthToken::new(""), Err(ConfigError::EmptyToken));
        assert_eq!(OAuthToken::new("   "), Err(ConfigError::EmptyToken));
    }

    #[test]
    fn test_token_is_trimmed_and_masked() {
        let token = OAuthToken::new("  abc  ").unwrap();
        assert_eq!(token.as_ref(), "abc");
        assert_eq!(format!("{token:?}"), "OAuthToken(*****)");
        assert_eq!(token.authorization_header(), "OAuth abc");
    }

    #[test]
    fn test_base_url_appends_trailing_slash() {
        let url = BaseUrl::new("https://cloud-api.yandex.net/v1/disk").unwrap();
        assert_eq!(url.as_ref(), "https://cloud-api.yandex.net/v1/disk/");
    }

    #[test]
    fn test_base_url_keeps_existing_slash() {
        let url = BaseUrl::new("http://ya.ru/api/").unwrap();
        assert_eq!(url.as_ref(), "http://ya.ru/api/");
        assert_eq!(url.join(""), "http://ya.ru/api/");
        assert_eq!(url.join("/trash/resources"), "http://ya.ru/api/trash/resources");
    }

    #[test]
    fn test_base_url_rejects_invalid_values() {
        for bad in ["", "ya.ru/api", "ftp://ya.ru/", "http:///api", "http://ya.ru/?a=1"] {
            assert!(
                matches!(BaseUrl::new(bad), Err(ConfigError::InvalidBaseUrl { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_base_url_default_is_public_endpoint() {
        assert_eq!(BaseUrl::default().as_ref(), BaseUrl::DEFAULT);
    }
}
