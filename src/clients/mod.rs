//! HTTP plumbing and resource clients for the Disk API.
//!
//! # Overview
//!
//! - [`Transport`]: sends one request, substitutable in tests;
//!   [`ReqwestTransport`] is the production implementation
//! - [`ApiContext`]: transport, base URL, logger and serializer shared by
//!   every client of one [`DiskApi`](crate::DiskApi)
//! - [`DiskClientBase`]: the request dispatcher
//! - [`FilesClient`], [`MetaInfoClient`], [`CommandsClient`]: typed
//!   operations grouped by capability
//! - [`OperationPoller`]: waits for asynchronous server operations
//! - [`DiskError`]: the error returned by every operation
//!
//! # Example
//!
//! ```rust,ignore
//! use disk_api::{DiskApi, DiskConfig, OAuthToken};
//! use disk_api::protocol::ResourceRequest;
//! use tokio_util::sync::CancellationToken;
//!
//! let config = DiskConfig::builder()
//!     .token(OAuthToken::new("token")?)
//!     .build()?;
//! let api = DiskApi::new(&config)?;
//!
//! let cancel = CancellationToken::new();
//! let root = api
//!     .meta_info()
//!     .get_info(&ResourceRequest::new("/").limit(20), &cancel)
//!     .await?;
//! for item in root.items() {
//!     println!("{} {}", item.resource_type, item.name);
//! }
//! ```
//!
//! # Errors
//!
//! Transport failures are returned unchanged as [`DiskError::Transport`].
//! `401` and `403` become [`DiskError::NotAuthorized`], any other non-2xx
//! status becomes [`DiskError::Api`]. Both carry an [`ApiError`] with the
//! server's error description when the body could be parsed.

mod client_base;
mod commands;
mod context;
mod errors;
mod files;
mod http_request;
mod http_response;
mod logger;
mod meta_info;
mod operation;
mod transport;

pub use client_base::{DiskClientBase, QueryParams};
pub use commands::CommandsClient;
pub use context::ApiContext;
pub use errors::{ApiError, DiskError, TransportError};
pub use files::FilesClient;
pub use http_request::{
    HttpMethod, HttpRequest, HttpRequestBuilder, RequestBody, RequestTarget, TransportRequest,
    UploadStream,
};
pub use http_response::{collect_body, ByteStream, HttpResponse};
pub use logger::{LogSaver, RequestLog, ResponseLog, TracingLogSaver};
pub use meta_info::MetaInfoClient;
pub use operation::{OperationPoller, OperationStatusSource};
pub use transport::{ReqwestTransport, Transport, SDK_VERSION};
