//! HTTP request types for the Disk API SDK.
//!
//! This module provides the [`HttpRequest`] descriptor and its builder, the
//! [`RequestBody`] variants, and the [`TransportRequest`] handed to a
//! [`Transport`](crate::clients::Transport).

use std::fmt;
use std::pin::Pin;
use std::str::FromStr;

use bytes::Bytes;
use futures_util::Stream;
use serde::Serialize;

use crate::clients::errors::DiskError;
use crate::config::BaseUrl;

/// HTTP methods used by the Disk API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for copy and move commands.
    Post,
    /// HTTP PUT method for creating folders, uploads and restores.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
    /// HTTP PATCH method for updating custom properties.
    Patch,
    /// HTTP HEAD method.
    Head,
}

impl HttpMethod {
    /// Returns the uppercase method token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DiskError;

    /// Parses a method token case-insensitively, as found in a `Link`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::Get,
            Self::Post,
            Self::Put,
            Self::Delete,
            Self::Patch,
            Self::Head,
        ]
        .into_iter()
        .find(|method| method.as_str().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| DiskError::invalid_argument("method", format!("unsupported HTTP method '{s}'")))
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Head => Self::HEAD,
        }
    }
}

/// A streaming request body, such as a local file being uploaded.
pub type UploadStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send + Sync>>;

/// The body of a request.
///
/// Text, bytes and streams are sent verbatim. Anything else is JSON encoded
/// with [`RequestBody::json`].
#[derive(Default)]
pub enum RequestBody {
    /// No content.
    #[default]
    Empty,
    /// JSON content (`application/json`).
    Json(Bytes),
    /// Text content, sent verbatim.
    Text(String),
    /// Binary content, sent verbatim.
    Bytes(Bytes),
    /// Streamed content, sent verbatim without buffering.
    Stream(UploadStream),
}

impl RequestBody {
    /// JSON-encodes `value`.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::Serialization`] if `value` cannot be encoded.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, DiskError> {
        Ok(Self::Json(Bytes::from(serde_json::to_vec(value)?)))
    }

    /// Wraps a byte stream.
    pub fn stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, std::io::Error>> + Send + Sync + 'static,
    {
        Self::Stream(Box::pin(stream))
    }

    /// Returns `true` for [`RequestBody::Empty`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the `Content-Type` this body implies, if any.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Json(_) => Some("application/json"),
            Self::Text(_) => Some("text/plain; charset=utf-8"),
            Self::Empty | Self::Bytes(_) | Self::Stream(_) => None,
        }
    }

    /// Returns the body bytes when they are available without consuming a
    /// stream.
    #[must_use]
    pub fn buffered_bytes(&self) -> Option<Bytes> {
        match self {
            Self::Empty | Self::Stream(_) => None,
            Self::Json(bytes) | Self::Bytes(bytes) => Some(bytes.clone()),
            Self::Text(text) => Some(Bytes::from(text.clone())),
        }
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Json(bytes) => f.debug_tuple("Json").field(&bytes.len()).finish(),
            Self::Text(text) => f.debug_tuple("Text").field(&text.len()).finish(),
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Self::Stream(_) => f.write_str("Stream"),
        }
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(bytes))
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<UploadStream> for RequestBody {
    fn from(stream: UploadStream) -> Self {
        Self::Stream(stream)
    }
}

/// Where a request is sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestTarget {
    /// A path relative to the API base URL.
    Relative(String),
    /// An absolute URL, such as a `Link` href.
    Absolute(String),
}

/// A request to be sent to the Disk API.
///
/// Use [`HttpRequest::builder`] for requests relative to the base URL and
/// [`HttpRequest::absolute`] for requests to a server-issued link.
///
/// # Example
///
/// ```rust
/// use disk_api::clients::{HttpMethod, HttpRequest};
/// use disk_api::BaseUrl;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "resources")
///     .query("path=%2Ffoo")
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     request.url(&BaseUrl::default()),
///     "https://cloud-api.yandex.net/v1/disk/resources?path=%2Ffoo"
/// );
/// ```
#[derive(Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// Where the request goes.
    pub target: RequestTarget,
    /// The serialized query string, without the leading `?`.
    pub query: Option<String>,
    /// The request body.
    pub body: RequestBody,
}

impl HttpRequest {
    /// Creates a builder for a request relative to the base URL.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, RequestTarget::Relative(path.into()))
    }

    /// Creates a builder for a request to an absolute URL.
    #[must_use]
    pub fn absolute(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, RequestTarget::Absolute(url.into()))
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] if an absolute target is not an
    /// http(s) URL, or a relative target is itself a URL.
    pub fn verify(&self) -> Result<(), DiskError> {
        match &self.target {
            RequestTarget::Absolute(url) => {
                let lower = url.to_ascii_lowercase();
                if !lower.starts_with("http://") && !lower.starts_with("https://") {
                    return Err(DiskError::invalid_argument(
                        "href",
                        format!("'{url}' is not an absolute http(s) URL"),
                    ));
                }
            }
            RequestTarget::Relative(path) => {
                if path.contains("://") {
                    return Err(DiskError::invalid_argument(
                        "path",
                        format!("'{path}' must be relative to the base URL"),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Builds the absolute URL. The `?` is omitted when the query is empty.
    #[must_use]
    pub fn url(&self, base_url: &BaseUrl) -> String {
        let mut url = match &self.target {
            RequestTarget::Relative(path) => base_url.join(path),
            RequestTarget::Absolute(url) => url.clone(),
        };
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(query);
        }
        url
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    target: RequestTarget,
    query: Option<String>,
    body: RequestBody,
}

impl HttpRequestBuilder {
    const fn new(method: HttpMethod, target: RequestTarget) -> Self {
        Self {
            http_method: method,
            target,
            query: None,
            body: RequestBody::Empty,
        }
    }

    /// Sets the serialized query string.
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, DiskError> {
        let request = HttpRequest {
            http_method: self.http_method,
            target: self.target,
            query: self.query,
            body: self.body,
        };
        request.verify()?;
        Ok(request)
    }
}

/// A fully resolved request, as seen by a [`Transport`](crate::clients::Transport).
#[derive(Debug)]
pub struct TransportRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The absolute URL, including the query string.
    pub url: String,
    /// Per-request headers. Transport-level defaults are added by the transport.
    pub headers: Vec<(String, String)>,
    /// The request body.
    pub body: RequestBody,
}

impl TransportRequest {
    /// Resolves a request against the base URL.
    #[must_use]
    pub fn from_request(request: HttpRequest, base_url: &BaseUrl) -> Self {
        let url = request.url(base_url);
        let headers = request
            .body
            .content_type()
            .map(|content_type| vec![("Content-Type".to_string(), content_type.to_string())])
            .unwrap_or_default();
        Self {
            method: request.http_method,
            url,
            headers,
            body: request.body,
        }
    }
}
