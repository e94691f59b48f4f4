//! HTTP response types for the Disk API SDK.
//!
//! This module provides the [`HttpResponse`] returned by a
//! [`Transport`](crate::clients::Transport) and the [`ByteStream`] body type.

use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};

use crate::clients::errors::TransportError;

/// An unbuffered response body.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// A response received from the transport.
///
/// The body is left unread so downloads can be streamed; call
/// [`HttpResponse::into_bytes`] to buffer it.
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The reason phrase, if the transport reported one.
    pub reason: Option<String>,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The response body.
    pub body: ByteStream,
}

impl HttpResponse {
    /// Creates a response with a streaming body.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: ByteStream) -> Self {
        Self {
            code,
            reason: None,
            headers,
            body,
        }
    }

    /// Creates a response with an in-memory body.
    #[must_use]
    pub fn from_bytes(code: u16, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        Self::new(
            code,
            HashMap::new(),
            Box::pin(futures_util::stream::once(async move { Ok(body) })),
        )
    }

    /// Sets the reason phrase.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Adds a header value.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.to_lowercase())
            .or_default()
            .push(value.into());
        self
    }

    /// Returns `true` if the status code is 2xx.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the reason phrase, falling back to the canonical phrase for
    /// the status code.
    #[must_use]
    pub fn reason_phrase(&self) -> Option<String> {
        self.reason.clone().or_else(|| {
            reqwest::StatusCode::from_u16(self.code)
                .ok()
                .and_then(|status| status.canonical_reason())
                .map(String::from)
        })
    }

    /// Reads the whole body into memory.
    ///
    /// # Errors
    ///
    /// Returns the first [`TransportError`] yielded by the body stream.
    pub async fn into_bytes(self) -> Result<Bytes, TransportError> {
        collect_body(self.body).await
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("code", &self.code)
            .field("reason", &self.reason)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Buffers a body stream.
///
/// # Errors
///
/// Returns the first [`TransportError`] yielded by the stream.
pub async fn collect_body(mut body: ByteStream) -> Result<Bytes, TransportError> {
    let mut buffer = BytesMut::new();
    while let Some(chunk) = body.next().await {
        buffer.extend_from_slice(&chunk?);
    }
    Ok(buffer.freeze())
}

/// Parses response headers into a `HashMap` keyed by lowercase name.
pub(crate) fn parse_response_headers(
    headers: &reqwest::header::HeaderMap,
) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ok_covers_2xx() {
        assert!(HttpResponse::from_bytes(200, "").is_ok());
        assert!(HttpResponse::from_bytes(202, "").is_ok());
        assert!(HttpResponse::from_bytes(299, "").is_ok());
        assert!(!HttpResponse::from_bytes(199, "").is_ok());
        assert!(!HttpResponse::from_bytes(401, "").is_ok());
    }

    #[test]
    fn test_reason_phrase_falls_back_to_canonical() {
        assert_eq!(
            HttpResponse::from_bytes(404, "").reason_phrase().as_deref(),
            Some("Not Found")
        );
        assert_eq!(
            HttpResponse::from_bytes(404, "")
                .with_reason("Missing")
                .reason_phrase()
                .as_deref(),
            Some("Missing")
        );
    }

    #[test]
    fn test_headers_are_lowercased() {
        let response = HttpResponse::from_bytes(200, "").with_header("X-Request-Id", "abc");
        assert_eq!(
            response.headers.get("x-request-id"),
            Some(&vec!["abc".to_string()])
        );
    }

    #[tokio::test]
    async fn test_into_bytes_concatenates_chunks() {
        let chunks = vec![Ok(Bytes::from_static(b"ab")), Ok(Bytes::from_static(b"cd"))];
        let response = HttpResponse::new(
            200,
            HashMap::new(),
            Box::pin(futures_util::stream::iter(chunks)),
        );
        assert_eq!(response.into_bytes().await.unwrap(), Bytes::from_static(b"abcd"));
    }
}
