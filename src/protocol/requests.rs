//! Request parameter objects.
//!
//! Each type lowers into query parameters through
//! [`ToParams`](crate::serialization::ToParams); `None` fields are omitted
//! and fields are emitted in declaration order.

use crate::impl_to_params;
use crate::protocol::MediaType;

/// Parameters of a resource metadata request.
///
/// # Example
///
/// ```rust
/// use disk_api::protocol::ResourceRequest;
/// use disk_api::serialization::QueryParamsSerializer;
///
/// let request = ResourceRequest::new("/foo").limit(20).offset(0).sort("name");
/// assert_eq!(
///     QueryParamsSerializer::new().serialize(&request),
///     "path=%2Ffoo&limit=20&offset=0&sort=name"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceRequest {
    /// Path of the resource.
    pub path: String,
    /// Number of embedded entries to return.
    pub limit: Option<u32>,
    /// Number of embedded entries to skip.
    pub offset: Option<u32>,
    /// Sort field for embedded entries, such as `name` or `-created`.
    pub sort: Option<String>,
    /// Comma separated list of fields to return.
    pub fields: Option<String>,
    /// Preview size, such as `S` or `120x80`.
    pub preview_size: Option<String>,
    /// Whether previews are cropped to a square.
    pub preview_crop: Option<bool>,
}

impl_to_params!(ResourceRequest {
    path,
    limit,
    offset,
    sort,
    fields,
    preview_size,
    preview_crop,
});

impl ResourceRequest {
    /// Creates a request for `path`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Sets the page size.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the page offset.
    #[must_use]
    pub const fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the sort field.
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Restricts the returned fields.
    #[must_use]
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Sets the preview size.
    #[must_use]
    pub fn preview_size(mut self, size: impl Into<String>) -> Self {
        self.preview_size = Some(size.into());
        self
    }

    /// Sets whether previews are cropped.
    #[must_use]
    pub const fn preview_crop(mut self, crop: bool) -> Self {
        self.preview_crop = Some(crop);
        self
    }
}

/// Parameters of a flat file listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilesResourceRequest {
    /// Media kinds to include.
    pub media_type: Option<Vec<MediaType>>,
    /// Page size.
    pub limit: Option<u32>,
    /// Page offset.
    pub offset: Option<u32>,
}

impl_to_params!(FilesResourceRequest { media_type, limit, offset });

/// Parameters of a last-uploaded listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LastUploadedResourceRequest {
    /// Media kinds to include.
    pub media_type: Option<Vec<MediaType>>,
    /// Number of files to return.
    pub limit: Option<u32>,
}

impl_to_params!(LastUploadedResourceRequest { media_type, limit });

/// Parameters of a copy command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CopyFileRequest {
    /// Source path.
    pub from: String,
    /// Destination path.
    pub path: String,
    /// Whether to replace an existing destination.
    pub overwrite: bool,
}

impl_to_params!(CopyFileRequest { from, path, overwrite });

/// Parameters of a move command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveFileRequest {
    /// Source path.
    pub from: String,
    /// Destination path.
    pub path: String,
    /// Whether to replace an existing destination.
    pub overwrite: bool,
}

impl_to_params!(MoveFileRequest { from, path, overwrite });

/// Parameters of a delete command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteFileRequest {
    /// Path to delete.
    pub path: String,
    /// Delete without moving to the trash.
    pub permanently: bool,
}

impl_to_params!(DeleteFileRequest { path, permanently });

/// Parameters of a restore-from-trash command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RestoreFromTrashRequest {
    /// Path of the resource in the trash.
    pub path: String,
    /// New name for the restored resource.
    pub name: Option<String>,
    /// Whether to replace an existing resource.
    pub overwrite: bool,
}

impl_to_params!(RestoreFromTrashRequest { path, name, overwrite });
