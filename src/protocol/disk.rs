//! Disk quota information.

use serde::{Deserialize, Serialize};

use crate::serialization::protocol_object;

/// Space usage and well-known folders of the user's disk.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Disk {
    /// Bytes occupied by the trash.
    pub trash_size: u64,
    /// Total space in bytes.
    pub total_space: u64,
    /// Used space in bytes.
    pub used_space: u64,
    /// Paths of system folders.
    pub system_folders: Option<SystemFolders>,
    /// The HTTP status code of the response.
    #[serde(skip)]
    pub http_status_code: u16,
}

impl Disk {
    /// Returns the free space in bytes.
    #[must_use]
    pub const fn free_space(&self) -> u64 {
        self.total_space.saturating_sub(self.used_space)
    }
}

/// Locations of the folders the service manages itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SystemFolders {
    /// Folder for application data.
    pub applications: Option<String>,
    /// Folder for downloads from the internet.
    pub downloads: Option<String>,
}

protocol_object!(Disk);
