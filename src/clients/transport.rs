//! The HTTP transport seam.
//!
//! A [`Transport`] sends one fully resolved request and returns the raw
//! response. [`ReqwestTransport`] is the production implementation; tests
//! substitute in-process doubles that record requests and return canned
//! responses.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{stream, Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::clients::errors::TransportError;
use crate::clients::http_request::{RequestBody, TransportRequest};
use crate::clients::http_response::{parse_response_headers, ByteStream, HttpResponse};
use crate::config::DiskConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sends HTTP requests.
///
/// Implementations must be safe for concurrent use; one instance is shared
/// by every client of a [`DiskApi`](crate::DiskApi).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the response without interpreting the
    /// status code.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Cancelled`] if `cancel` fires before a
    /// response arrives, or another [`TransportError`] on connectivity
    /// failure.
    async fn send(
        &self,
        request: TransportRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError>;
}

/// A [`Transport`] backed by `reqwest`.
///
/// The `Authorization: OAuth <token>` and `User-Agent` headers are set once at
/// construction and sent with every request.
///
/// # Thread Safety
///
/// `ReqwestTransport` is `Send + Sync`; the inner client pools connections.
#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    default_headers: HashMap<String, String>,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if the underlying client cannot be
    /// created (for example, TLS initialization failure).
    pub fn new(config: &DiskConfig) -> Result<Self, TransportError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Disk API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Authorization".to_string(),
            config.token().authorization_header(),
        );

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            default_headers,
        })
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: TransportRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        let mut req_builder = self.client.request(request.method.into(), &request.url);

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        req_builder = match request.body {
            RequestBody::Empty => req_builder,
            RequestBody::Json(bytes) | RequestBody::Bytes(bytes) => req_builder.body(bytes),
            RequestBody::Text(text) => req_builder.body(text),
            RequestBody::Stream(stream) => req_builder.body(reqwest::Body::wrap_stream(stream)),
        };

        let res = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(TransportError::Cancelled),
            result = req_builder.send() => result?,
        };

        let code = res.status().as_u16();
        let reason = res.status().canonical_reason().map(String::from);
        let headers = parse_response_headers(res.headers());
        let body = cancellable_body(res.bytes_stream(), cancel.clone());

        let mut response = HttpResponse::new(code, headers, body);
        response.reason = reason;
        Ok(response)
    }
}

/// Ends the body early when `cancel` fires. A body cut short this way
/// finishes with [`TransportError::Cancelled`] so it never looks complete.
fn cancellable_body<S>(body: S, cancel: CancellationToken) -> ByteStream
where
    S: Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
{
    let tail = cancel.clone();
    let body = body
        .map(|chunk| chunk.map_err(TransportError::from))
        .take_until(cancel.cancelled_owned())
        .chain(
            stream::once(async move { tail.is_cancelled() })
                .filter_map(|cancelled| async move {
                    cancelled.then_some(Err(TransportError::Cancelled))
                }),
        );
    Box::pin(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OAuthToken;

    fn config() -> DiskConfig {
        DiskConfig::builder()
            .token(OAuthToken::new("test-token").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_authorization_header_uses_oauth_scheme() {
        let transport = ReqwestTransport::new(&config()).unwrap();
        assert_eq!(
            transport.default_headers().get("Authorization"),
            Some(&"OAuth test-token".to_string())
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let transport = ReqwestTransport::new(&config()).unwrap();
        let user_agent = transport.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | Disk API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[tokio::test]
    async fn test_body_cut_off_by_cancel_ends_with_error() {
        let cancel = CancellationToken::new();
        let source = stream::iter(vec![Ok(Bytes::from_static(b"0123456789"))])
            .chain(stream::pending::<reqwest::Result<Bytes>>());
        let mut body = cancellable_body(source, cancel.clone());

        assert_eq!(
            body.next().await.unwrap().unwrap(),
            Bytes::from_static(b"0123456789")
        );
        cancel.cancel();
        assert!(matches!(body.next().await, Some(Err(TransportError::Cancelled))));
        assert!(body.next().await.is_none());
    }

    #[tokio::test]
    async fn test_complete_body_has_no_trailing_error() {
        let source = stream::iter(vec![
            Ok::<_, reqwest::Error>(Bytes::from_static(b"ab")),
            Ok(Bytes::from_static(b"cd")),
        ]);
        let body = cancellable_body(source, CancellationToken::new());

        let chunks: Vec<_> = body.collect().await;
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(Result::is_ok));
    }
}
