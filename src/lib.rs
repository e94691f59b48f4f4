//! # Disk API Rust Client
//!
//! A typed async client for the Yandex Disk REST API: file upload and
//! download through one-shot links, resource metadata, and file management
//! commands with polling of long-running server operations.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`DiskConfig`] and [`DiskConfigBuilder`]
//! - A reflection-free query serializer driven by [`serialization::ToParams`]
//!   with swappable naming conventions and per-instance value formatters
//! - A request dispatcher with consistent logging and error classification
//! - Three resource clients: [`clients::FilesClient`],
//!   [`clients::MetaInfoClient`] and [`clients::CommandsClient`]
//! - [`clients::OperationPoller`] for asynchronous server operations
//!
//! ## Quick Start
//!
//! ```rust
//! use disk_api::{DiskApi, DiskConfig, OAuthToken};
//!
//! let config = DiskConfig::builder()
//!     .token(OAuthToken::new("your-oauth-token").unwrap())
//!     .build()
//!     .unwrap();
//! let api = DiskApi::new(&config).unwrap();
//! ```
//!
//! ## Copying a Folder
//!
//! ```rust,ignore
//! use disk_api::protocol::{CopyFileRequest, OperationStatus};
//! use tokio_util::sync::CancellationToken;
//!
//! let request = CopyFileRequest {
//!     from: "/photos".to_string(),
//!     path: "/backup/photos".to_string(),
//!     overwrite: false,
//! };
//! let status = api
//!     .commands()
//!     .copy_and_wait(&request, &CancellationToken::new())
//!     .await?;
//! assert_eq!(status, OperationStatus::Success);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the serializer and its formatter registry belong
//!   to one [`clients::ApiContext`]
//! - **Fail-fast validation**: configuration newtypes validate on construction
//! - **Thread-safe**: all public client types are `Send + Sync`
//! - **Async-first**: built on Tokio, every call takes a cancellation token

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod protocol;
pub mod serialization;

pub use api::DiskApi;
pub use clients::DiskError;
pub use config::{BaseUrl, DiskConfig, DiskConfigBuilder, OAuthToken};
pub use error::ConfigError;

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
