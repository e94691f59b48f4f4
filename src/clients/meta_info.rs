//! Resource and disk metadata.

use serde_json::{json, Map, Value};
use tokio_util::sync::CancellationToken;

use crate::clients::client_base::{required, DiskClientBase};
use crate::clients::errors::{ensure_not_blank, DiskError};
use crate::clients::http_request::RequestBody;
use crate::protocol::{
    Disk, FilesResourceList, FilesResourceRequest, LastUploadedResourceList,
    LastUploadedResourceRequest, Link, Resource, ResourceRequest,
};
use crate::serialization::Record;

/// Client for metadata queries, custom properties and publishing.
///
/// Obtained from [`DiskApi::meta_info`](crate::DiskApi::meta_info).
#[derive(Clone, Debug)]
pub struct MetaInfoClient {
    base: DiskClientBase,
}

impl MetaInfoClient {
    /// Creates a client over a dispatcher.
    #[must_use]
    pub const fn new(base: DiskClientBase) -> Self {
        Self { base }
    }

    /// Returns quota and system folder information.
    ///
    /// `GET` on the base URL itself.
    ///
    /// # Errors
    ///
    /// Returns any dispatcher error.
    pub async fn get_disk_info(&self, cancel: &CancellationToken) -> Result<Disk, DiskError> {
        required(self.base.get("", None, cancel).await?)
    }

    /// Returns metadata of a file or folder, with a page of embedded
    /// entries for folders.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] for a blank path, or any
    /// dispatcher error.
    pub async fn get_info(
        &self,
        request: &ResourceRequest,
        cancel: &CancellationToken,
    ) -> Result<Resource, DiskError> {
        ensure_not_blank("path", &request.path)?;
        required(self.base.get("resources", Some(request), cancel).await?)
    }

    /// Returns metadata of a resource in the trash. A path of `/` describes
    /// the trash itself.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] for a blank path, or any
    /// dispatcher error.
    pub async fn get_trash_info(
        &self,
        request: &ResourceRequest,
        cancel: &CancellationToken,
    ) -> Result<Resource, DiskError> {
        ensure_not_blank("path", &request.path)?;
        required(self.base.get("trash/resources", Some(request), cancel).await?)
    }

    /// Returns a flat list of all files, optionally filtered by media kind.
    ///
    /// # Errors
    ///
    /// Returns any dispatcher error.
    pub async fn get_files_info(
        &self,
        request: &FilesResourceRequest,
        cancel: &CancellationToken,
    ) -> Result<FilesResourceList, DiskError> {
        required(self.base.get("resources/files", Some(request), cancel).await?)
    }

    /// Returns the most recently uploaded files.
    ///
    /// # Errors
    ///
    /// Returns any dispatcher error.
    pub async fn get_last_uploaded_info(
        &self,
        request: &LastUploadedResourceRequest,
        cancel: &CancellationToken,
    ) -> Result<LastUploadedResourceList, DiskError> {
        required(
            self.base
                .get("resources/last-uploaded", Some(request), cancel)
                .await?,
        )
    }

    /// Adds or replaces custom properties of a resource.
    ///
    /// Properties set to `null` are removed by the server.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] for a blank path, or any
    /// dispatcher error.
    pub async fn append_custom_properties(
        &self,
        path: &str,
        properties: &Map<String, Value>,
        cancel: &CancellationToken,
    ) -> Result<Resource, DiskError> {
        ensure_not_blank("path", path)?;
        let params = Record::new("CustomPropertiesParams").field("path", path);
        let body = RequestBody::json(&json!({ "custom_properties": properties }))?;
        required(self.base.patch("resources", Some(&params), body, cancel).await?)
    }

    /// Publishes a resource and returns a link to its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] for a blank path, or any
    /// dispatcher error.
    pub async fn publish_folder(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<Link, DiskError> {
        self.put_path("resources/publish", path, cancel).await
    }

    /// Closes public access to a resource.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] for a blank path, or any
    /// dispatcher error.
    pub async fn unpublish_folder(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<Link, DiskError> {
        self.put_path("resources/unpublish", path, cancel).await
    }

    async fn put_path(
        &self,
        route: &str,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<Link, DiskError> {
        ensure_not_blank("path", path)?;
        let params = Record::new("PublishParams").field("path", path);
        required(
            self.base
                .put(route, Some(&params), RequestBody::Empty, cancel)
                .await?,
        )
    }
}
