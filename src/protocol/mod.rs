//! Wire data types of the Disk API.
//!
//! Response types decode from the API's snake_case JSON. Types that carry a
//! `http_status_code` field are protocol objects: they remember the status
//! of the response that produced them, which is how a `202 Accepted` link
//! is told apart from a completed command.

mod disk;
mod error;
mod link;
mod media_type;
mod requests;
mod resource;

pub use disk::{Disk, SystemFolders};
pub use error::ErrorDescription;
pub use link::{Link, Operation, OperationStatus};
pub use media_type::MediaType;
pub use requests::{
    CopyFileRequest, DeleteFileRequest, FilesResourceRequest, LastUploadedResourceRequest,
    MoveFileRequest, ResourceRequest, RestoreFromTrashRequest,
};
pub use resource::{
    FilesResourceList, LastUploadedResourceList, Resource, ResourceList, ResourceType,
};
