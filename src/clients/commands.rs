//! File management commands.
//!
//! Commands on files usually complete synchronously. Commands on non-empty
//! folders answer `202 Accepted` with a [`Link`] to an operation; the
//! `*_and_wait` variants poll that link with an [`OperationPoller`].

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::clients::client_base::{required, DiskClientBase};
use crate::clients::errors::{ensure_not_blank, DiskError};
use crate::clients::http_request::RequestBody;
use crate::clients::operation::{OperationPoller, OperationStatusSource};
use crate::protocol::{
    CopyFileRequest, DeleteFileRequest, Link, MoveFileRequest, Operation, OperationStatus,
    RestoreFromTrashRequest,
};
use crate::serialization::Record;

/// Client for copy, move, delete, trash and folder commands.
///
/// Obtained from [`DiskApi::commands`](crate::DiskApi::commands).
#[derive(Clone, Debug)]
pub struct CommandsClient {
    base: DiskClientBase,
}

impl CommandsClient {
    /// Creates a client over a dispatcher.
    #[must_use]
    pub const fn new(base: DiskClientBase) -> Self {
        Self { base }
    }

    /// Creates a folder and returns a link to its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] for a blank path, or any
    /// dispatcher error.
    pub async fn create_directory(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<Link, DiskError> {
        ensure_not_blank("path", path)?;
        let params = Record::new("CreateDirectoryParams").field("path", path);
        required(
            self.base
                .put("resources", Some(&params), RequestBody::Empty, cancel)
                .await?,
        )
    }

    /// Copies a resource.
    ///
    /// A `202` link means the copy continues on the server.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] for a blank path, or any
    /// dispatcher error.
    pub async fn copy(
        &self,
        request: &CopyFileRequest,
        cancel: &CancellationToken,
    ) -> Result<Link, DiskError> {
        ensure_not_blank("from", &request.from)?;
        ensure_not_blank("path", &request.path)?;
        required(
            self.base
                .post("resources/copy", Some(request), RequestBody::Empty, cancel)
                .await?,
        )
    }

    /// Moves a resource.
    ///
    /// A `202` link means the move continues on the server.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] for a blank path, or any
    /// dispatcher error.
    pub async fn move_resource(
        &self,
        request: &MoveFileRequest,
        cancel: &CancellationToken,
    ) -> Result<Link, DiskError> {
        ensure_not_blank("from", &request.from)?;
        ensure_not_blank("path", &request.path)?;
        required(
            self.base
                .post("resources/move", Some(request), RequestBody::Empty, cancel)
                .await?,
        )
    }

    /// Deletes a resource, to the trash unless `permanently` is set.
    ///
    /// A synchronous delete answers `204 No Content`, which yields a synthesized
    /// link whose status code is 204.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] for a blank path, or any
    /// dispatcher error.
    pub async fn delete(
        &self,
        request: &DeleteFileRequest,
        cancel: &CancellationToken,
    ) -> Result<Link, DiskError> {
        ensure_not_blank("path", &request.path)?;
        required(
            self.base
                .delete("resources", Some(request), RequestBody::Empty, cancel)
                .await?,
        )
    }

    /// Empties the trash, or removes one resource from it when `path` is
    /// given.
    ///
    /// # Errors
    ///
    /// Returns any dispatcher error.
    pub async fn empty_trash(
        &self,
        path: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Link, DiskError> {
        let params = Record::new("EmptyTrashParams").field("path", &path);
        required(
            self.base
                .delete("trash/resources", Some(&params), RequestBody::Empty, cancel)
                .await?,
        )
    }

    /// Restores a resource from the trash.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidArgument`] for a blank path, or any
    /// dispatcher error.
    pub async fn restore_from_trash(
        &self,
        request: &RestoreFromTrashRequest,
        cancel: &CancellationToken,
    ) -> Result<Link, DiskError> {
        ensure_not_blank("path", &request.path)?;
        required(
            self.base
                .put("trash/resources", Some(request), RequestBody::Empty, cancel)
                .await?,
        )
    }

    /// Fetches the status of an asynchronous operation.
    ///
    /// # Errors
    ///
    /// Returns any dispatcher error.
    pub async fn get_operation_status(
        &self,
        link: &Link,
        cancel: &CancellationToken,
    ) -> Result<Operation, DiskError> {
        required(
            self.base
                .send_to_link(link, RequestBody::Empty, cancel)
                .await?,
        )
    }

    /// Copies a resource and waits for the server to finish.
    ///
    /// # Errors
    ///
    /// Returns any error from the command or from a status check.
    pub async fn copy_and_wait(
        &self,
        request: &CopyFileRequest,
        cancel: &CancellationToken,
    ) -> Result<OperationStatus, DiskError> {
        let link = self.copy(request, cancel).await?;
        self.wait_if_accepted(&link, cancel).await
    }

    /// Moves a resource and waits for the server to finish.
    ///
    /// # Errors
    ///
    /// Returns any error from the command or from a status check.
    pub async fn move_and_wait(
        &self,
        request: &MoveFileRequest,
        cancel: &CancellationToken,
    ) -> Result<OperationStatus, DiskError> {
        let link = self.move_resource(request, cancel).await?;
        self.wait_if_accepted(&link, cancel).await
    }

    /// Deletes a resource and waits for the server to finish.
    ///
    /// # Errors
    ///
    /// Returns any error from the command or from a status check.
    pub async fn delete_and_wait(
        &self,
        request: &DeleteFileRequest,
        cancel: &CancellationToken,
    ) -> Result<OperationStatus, DiskError> {
        let link = self.delete(request, cancel).await?;
        self.wait_if_accepted(&link, cancel).await
    }

    /// Empties the trash and waits for the server to finish.
    ///
    /// # Errors
    ///
    /// Returns any error from the command or from a status check.
    pub async fn empty_trash_and_wait(
        &self,
        path: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<OperationStatus, DiskError> {
        let link = self.empty_trash(path, cancel).await?;
        self.wait_if_accepted(&link, cancel).await
    }

    /// Restores a resource from the trash and waits for the server to finish.
    ///
    /// # Errors
    ///
    /// Returns any error from the command or from a status check.
    pub async fn restore_from_trash_and_wait(
        &self,
        request: &RestoreFromTrashRequest,
        cancel: &CancellationToken,
    ) -> Result<OperationStatus, DiskError> {
        let link = self.restore_from_trash(request, cancel).await?;
        self.wait_if_accepted(&link, cancel).await
    }

    async fn wait_if_accepted(
        &self,
        link: &Link,
        cancel: &CancellationToken,
    ) -> Result<OperationStatus, DiskError> {
        if !link.is_accepted() {
            return Ok(OperationStatus::Success);
        }
        OperationPoller::new(self.base.context().poll_interval())
            .wait_until_done(self, link, cancel)
            .await
    }
}

#[async_trait]
impl OperationStatusSource for CommandsClient {
    async fn operation_status(
        &self,
        link: &Link,
        cancel: &CancellationToken,
    ) -> Result<Operation, DiskError> {
        self.get_operation_status(link, cancel).await
    }
}
