//! The request dispatcher shared by every resource client.
//!
//! Each call runs the same pipeline:
//!
//! 1. Build the URL: base URL + relative path + `?` + serialized parameters
//!    (the `?` is omitted when there are none). Link calls use the link's
//!    absolute href instead.
//! 2. Log the request, then send it through the [`Transport`].
//! 3. A transport failure is logged and returned unchanged.
//! 4. A 2xx response is decoded with [`FromResponse`].
//! 5. 401/403 become [`DiskError::NotAuthorized`]; any other status becomes
//!    [`DiskError::Api`]. The error body is parsed best-effort.
//!
//! [`Transport`]: crate::clients::Transport

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::clients::context::ApiContext;
use crate::clients::errors::DiskError;
use crate::clients::http_request::{HttpMethod, HttpRequest, RequestBody, TransportRequest};
use crate::clients::http_response::collect_body;
use crate::clients::logger::RequestLogger;
use crate::protocol::Link;
use crate::serialization::{decode_body, DecodeError, FromResponse, ToParams};

/// A parameter object accepted by the dispatcher.
pub type QueryParams = dyn ToParams + Sync;

/// Sends requests through an [`ApiContext`] and decodes the responses.
///
/// # Thread Safety
///
/// `DiskClientBase` is `Clone`, `Send` and `Sync`; it holds no per-call state.
#[derive(Clone, Debug)]
pub struct DiskClientBase {
    context: Arc<ApiContext>,
}

// Verify DiskClientBase is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DiskClientBase>();
};

impl DiskClientBase {
    /// Creates a dispatcher over a shared context.
    #[must_use]
    pub const fn new(context: Arc<ApiContext>) -> Self {
        Self { context }
    }

    /// Returns the shared context.
    #[must_use]
    pub fn context(&self) -> &ApiContext {
        &self.context
    }

    /// Sends a GET request relative to the base URL.
    ///
    /// # Errors
    ///
    /// See the module documentation for the error classification.
    pub async fn get<R: FromResponse>(
        &self,
        path: &str,
        params: Option<&QueryParams>,
        cancel: &CancellationToken,
    ) -> Result<Option<R>, DiskError> {
        self.send(HttpMethod::Get, path, params, RequestBody::Empty, cancel)
            .await
    }

    /// Sends a POST request relative to the base URL.
    ///
    /// # Errors
    ///
    /// See the module documentation for the error classification.
    pub async fn post<R: FromResponse>(
        &self,
        path: &str,
        params: Option<&QueryParams>,
        body: RequestBody,
        cancel: &CancellationToken,
    ) -> Result<Option<R>, DiskError> {
        self.send(HttpMethod::Post, path, params, body, cancel).await
    }

    /// Sends a PUT request relative to the base URL.
    ///
    /// # Errors
    ///
    /// See the module documentation for the error classification.
    pub async fn put<R: FromResponse>(
        &self,
        path: &str,
        params: Option<&QueryParams>,
        body: RequestBody,
        cancel: &CancellationToken,
    ) -> Result<Option<R>, DiskError> {
        self.send(HttpMethod::Put, path, params, body, cancel).await
    }

    /// Sends a DELETE request relative to the base URL.
    ///
    /// # Errors
    ///
    /// See the module documentation for the error classification.
    pub async fn delete<R: FromResponse>(
        &self,
        path: &str,
        params: Option<&QueryParams>,
        body: RequestBody,
        cancel: &CancellationToken,
    ) -> Result<Option<R>, DiskError> {
        self.send(HttpMethod::Delete, path, params, body, cancel)
            .await
    }

    /// Sends a PATCH request relative to the base URL.
    ///
    /// # Errors
    ///
    /// See the module documentation for the error classification.
    pub async fn patch<R: FromResponse>(
        &self,
        path: &str,
        params: Option<&QueryParams>,
        body: RequestBody,
        cancel: &CancellationToken,
    ) -> Result<Option<R>, DiskError> {
        self.send(HttpMethod::Patch, path, params, body, cancel)
            .await
    }

    /// Sends a request to the absolute URL of a server-issued [`Link`],
    /// using the link's method.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] if the link's method or href is
    /// unusable. Otherwise see the module documentation.
    pub async fn send_to_link<R: FromResponse>(
        &self,
        link: &Link,
        body: RequestBody,
        cancel: &CancellationToken,
    ) -> Result<Option<R>, DiskError> {
        let method: HttpMethod = link.method.parse()?;
        let request = HttpRequest::absolute(method, link.href.as_str())
            .body(body)
            .build()?;
        self.execute(request, cancel).await
    }

    async fn send<R: FromResponse>(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&QueryParams>,
        body: RequestBody,
        cancel: &CancellationToken,
    ) -> Result<Option<R>, DiskError> {
        let mut builder = HttpRequest::builder(method, path).body(body);
        if let Some(params) = params {
            builder = builder.query(self.context.serializer().serialize(params));
        }
        self.execute(builder.build()?, cancel).await
    }

    /// Runs one request through logging, transport and classification.
    ///
    /// # Errors
    ///
    /// See the module documentation for the error classification.
    pub async fn execute<R: FromResponse>(
        &self,
        request: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<Option<R>, DiskError> {
        let request = TransportRequest::from_request(request, self.context.base_url());
        let method = request.method;
        let url = request.url.clone();

        let mut logger = RequestLogger::new(self.context.log_saver(), method.as_str(), &url);
        logger.set_request(&request.headers, request.body.buffered_bytes());

        debug!(method = %method, url = %url, "Sending Disk API request");

        let response = match self.context.transport().send(request, cancel).await {
            Ok(response) => response,
            Err(e) => {
                warn!(method = %method, url = %url, error = %e, "Disk API request failed");
                logger.end_with_error(&e.to_string());
                return Err(e.into());
            }
        };

        let code = response.code;
        debug!(
            method = %method,
            url = %url,
            status = code,
            elapsed_ms = logger.elapsed_ms(),
            "Received Disk API response"
        );

        if !response.is_ok() {
            let reason = response.reason_phrase();
            let headers = response.headers;
            let body = match collect_body(response.body).await {
                Ok(body) => body,
                Err(e) => {
                    logger.set_response(code, &headers, None);
                    logger.end_with_error(&e.to_string());
                    return Err(e.into());
                }
            };
            logger.set_response(code, &headers, Some(body.clone()));
            let error = DiskError::from_status(code, reason, &body);
            warn!(method = %method, url = %url, status = code, error = %error, "Disk API returned an error");
            logger.end_with_error(&error.to_string());
            return Err(error);
        }

        if R::STREAMING {
            logger.set_response(code, &response.headers, None);
            logger.end_with_success();
            return R::from_stream(code, response.body).map_err(DiskError::from);
        }

        let headers = response.headers;
        let body = match collect_body(response.body).await {
            Ok(body) => body,
            Err(e) => {
                logger.set_response(code, &headers, None);
                logger.end_with_error(&e.to_string());
                return Err(e.into());
            }
        };
        logger.set_response(code, &headers, Some(body.clone()));

        match decode_body::<R>(code, body) {
            Ok(value) => {
                logger.end_with_success();
                Ok(value)
            }
            Err(e) => {
                logger.end_with_error(&e.to_string());
                Err(e.into())
            }
        }
    }
}

/// Unwraps a decoded value that must be present.
pub(crate) fn required<T>(value: Option<T>) -> Result<T, DiskError> {
    value.ok_or(DiskError::Decode(DecodeError::Empty))
}
