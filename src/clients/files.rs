//! File upload and download.
//!
//! Both directions are two-step: request a one-shot [`Link`], then send the
//! content to (or read it from) the link's absolute URL.

use std::path::Path;

use bytes::Bytes;
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::clients::client_base::{required, DiskClientBase};
use crate::clients::errors::{ensure_not_blank, DiskError};
use crate::clients::http_request::RequestBody;
use crate::clients::http_response::ByteStream;
use crate::protocol::Link;
use crate::serialization::Record;

/// Client for file content.
///
/// Obtained from [`DiskApi::files`](crate::DiskApi::files).
#[derive(Clone, Debug)]
pub struct FilesClient {
    base: DiskClientBase,
}

impl FilesClient {
    /// Creates a client over a dispatcher.
    #[must_use]
    pub const fn new(base: DiskClientBase) -> Self {
        Self { base }
    }

    /// Requests a link for uploading a file to `path`.
    ///
    /// `GET resources/upload?path=…&overwrite=…`
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] for a blank path, or any
    /// dispatcher error.
    pub async fn get_upload_link(
        &self,
        path: &str,
        overwrite: bool,
        cancel: &CancellationToken,
    ) -> Result<Link, DiskError> {
        ensure_not_blank("path", path)?;
        let params = Record::new("UploadLinkParams")
            .field("path", path)
            .field("overwrite", &overwrite);
        required(self.base.get("resources/upload", Some(&params), cancel).await?)
    }

    /// Sends file content to an upload link.
    ///
    /// The body is sent verbatim with the link's method.
    ///
    /// # Errors
    ///
    /// Returns any dispatcher error.
    pub async fn upload(
        &self,
        link: &Link,
        body: impl Into<RequestBody> + Send,
        cancel: &CancellationToken,
    ) -> Result<(), DiskError> {
        self.base
            .send_to_link::<()>(link, body.into(), cancel)
            .await
            .map(|_| ())
    }

    /// Requests a link for downloading the file at `path`.
    ///
    /// `GET resources/download?path=…`
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] for a blank path, or any
    /// dispatcher error.
    pub async fn get_download_link(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<Link, DiskError> {
        ensure_not_blank("path", path)?;
        let params = Record::new("DownloadLinkParams").field("path", path);
        required(self.base.get("resources/download", Some(&params), cancel).await?)
    }

    /// Opens the content behind a download link as a stream.
    ///
    /// The stream ends early if `cancel` fires.
    ///
    /// # Errors
    ///
    /// Returns any dispatcher error.
    pub async fn download(
        &self,
        link: &Link,
        cancel: &CancellationToken,
    ) -> Result<ByteStream, DiskError> {
        let stream = self
            .base
            .send_to_link::<ByteStream>(link, RequestBody::Empty, cancel)
            .await?;
        Ok(stream.unwrap_or_else(|| Box::pin(futures_util::stream::empty())))
    }

    /// Uploads `body` to `path`: gets an upload link, then uploads.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] for a blank path, or any
    /// dispatcher error.
    pub async fn upload_file(
        &self,
        path: &str,
        overwrite: bool,
        body: impl Into<RequestBody> + Send,
        cancel: &CancellationToken,
    ) -> Result<(), DiskError> {
        ensure_not_blank("path", path)?;
        let link = self.get_upload_link(path, overwrite, cancel).await?;
        self.upload(&link, body, cancel).await
    }

    /// Streams the local file at `local_path` to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] for a blank path,
    /// [`DiskError::Io`] if the local file cannot be opened, or any
    /// dispatcher error.
    pub async fn upload_local_file(
        &self,
        path: &str,
        overwrite: bool,
        local_path: &Path,
        cancel: &CancellationToken,
    ) -> Result<(), DiskError> {
        ensure_not_blank("path", path)?;
        let file = tokio::fs::File::open(local_path).await?;
        debug!(local = %local_path.display(), remote = path, "Uploading local file");
        self.upload_file(path, overwrite, RequestBody::stream(ReaderStream::new(file)), cancel)
            .await
    }

    /// Downloads the file at `path` as a stream: gets a download link, then
    /// downloads.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] for a blank path, or any
    /// dispatcher error.
    pub async fn download_file(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<ByteStream, DiskError> {
        ensure_not_blank("path", path)?;
        let link = self.get_download_link(path, cancel).await?;
        self.download(&link, cancel).await
    }

    /// Downloads the file at `path` into memory.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] for a blank path, or any
    /// dispatcher or transport error.
    pub async fn download_bytes(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<Bytes, DiskError> {
        let stream = self.download_file(path, cancel).await?;
        Ok(crate::clients::http_response::collect_body(stream).await?)
    }

    /// Downloads the file at `path` into a new local file.
    ///
    /// Fails without touching the network if `local_path` already exists.
    /// If the download fails afterwards, the partly written file is removed.
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] for a blank path,
    /// [`DiskError::Io`] if the local file exists or cannot be written,
    /// [`DiskError::Cancelled`] if `cancel` fires before the body is complete,
    /// or any dispatcher or transport error.
    pub async fn download_to_file(
        &self,
        path: &str,
        local_path: &Path,
        cancel: &CancellationToken,
    ) -> Result<u64, DiskError> {
        ensure_not_blank("path", path)?;
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(local_path)
            .await?;

        match self.write_download(path, file, cancel).await {
            Ok(written) => {
                debug!(local = %local_path.display(), remote = path, bytes = written, "Downloaded file");
                Ok(written)
            }
            Err(e) => {
                if let Err(remove) = tokio::fs::remove_file(local_path).await {
                    warn!(local = %local_path.display(), error = %remove, "Cannot remove partial download");
                }
                Err(e)
            }
        }
    }

    async fn write_download(
        &self,
        path: &str,
        mut file: tokio::fs::File,
        cancel: &CancellationToken,
    ) -> Result<u64, DiskError> {
        let mut stream = self.download_file(path, cancel).await?;
        let mut written: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        Ok(written)
    }
}
