//! Shared state for the resource clients.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::errors::DiskError;
use crate::clients::logger::LogSaver;
use crate::clients::transport::{ReqwestTransport, Transport};
use crate::config::{BaseUrl, DiskConfig, DEFAULT_POLL_INTERVAL};
use crate::serialization::QueryParamsSerializer;

/// The transport, base URL, logger and serializer shared by every client of
/// one [`DiskApi`](crate::DiskApi).
///
/// Read-only after construction.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use disk_api::clients::{ApiContext, ReqwestTransport, TracingLogSaver};
/// use disk_api::{DiskConfig, OAuthToken};
///
/// let config = DiskConfig::builder()
///     .token(OAuthToken::new("token").unwrap())
///     .build()
///     .unwrap();
/// let context = ApiContext::new(
///     Arc::new(ReqwestTransport::new(&config).unwrap()),
///     config.base_url().clone(),
/// )
/// .with_log_saver(Arc::new(TracingLogSaver));
/// ```
#[derive(Clone)]
pub struct ApiContext {
    transport: Arc<dyn Transport>,
    base_url: BaseUrl,
    log_saver: Option<Arc<dyn LogSaver>>,
    serializer: QueryParamsSerializer,
    poll_interval: Duration,
}

// Verify ApiContext is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiContext>();
};

impl ApiContext {
    /// Creates a context with no logger, the default serializer and the
    /// default poll interval.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, base_url: BaseUrl) -> Self {
        Self {
            transport,
            base_url,
            log_saver: None,
            serializer: QueryParamsSerializer::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Creates a context backed by [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::Transport`] if the HTTP client cannot be created.
    pub fn from_config(config: &DiskConfig) -> Result<Self, DiskError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), config.base_url().clone())
            .with_poll_interval(config.poll_interval()))
    }

    /// Sets the log saver.
    #[must_use]
    pub fn with_log_saver(mut self, saver: Arc<dyn LogSaver>) -> Self {
        self.log_saver = Some(saver);
        self
    }

    /// Replaces the query serializer.
    #[must_use]
    pub fn with_serializer(mut self, serializer: QueryParamsSerializer) -> Self {
        self.serializer = serializer;
        self
    }

    /// Sets the interval used by the `*_and_wait` commands.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Returns the transport.
    #[must_use]
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the log saver, if one is configured.
    #[must_use]
    pub fn log_saver(&self) -> Option<&dyn LogSaver> {
        self.log_saver.as_deref()
    }

    /// Returns the query serializer.
    #[must_use]
    pub const fn serializer(&self) -> &QueryParamsSerializer {
        &self.serializer
    }

    /// Returns the operation poll interval.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

impl fmt::Debug for ApiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiContext")
            .field("base_url", &self.base_url)
            .field("has_log_saver", &self.log_saver.is_some())
            .field("serializer", &self.serializer)
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}
