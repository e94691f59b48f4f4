//! Files, directories and resource listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::serialization::protocol_object;

crate::wire_enum! {
    /// Whether a resource is a file or a directory.
    #[derive(Default)]
    pub enum ResourceType {
        /// A directory.
        #[default]
        Dir => "dir",
        /// A file.
        File => "file",
    }
}

/// Metadata of a file or directory.
///
/// `md5`, `mime_type` and `size` are only meaningful for files; `embedded`
/// is only present for directories.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Resource {
    /// Key of a published resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    /// Resource name.
    pub name: String,
    /// Public URL of a published resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
    /// Original location of a resource in the trash.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_path: Option<String>,
    /// Full path, such as `disk:/foo/photo.png`.
    pub path: String,
    /// Preview URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    /// MD5 of a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    /// File or directory.
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    /// MIME type of a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Size of a file in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    /// User-defined properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_properties: Option<Map<String, Value>>,
    /// Directory listing.
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<ResourceList>,
    /// The HTTP status code of the response.
    #[serde(skip)]
    pub http_status_code: u16,
}

impl Resource {
    /// Returns `true` for directories.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.resource_type == ResourceType::Dir
    }

    /// Returns `true` for files.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.resource_type == ResourceType::File
    }

    /// Returns the embedded listing, or an empty slice.
    #[must_use]
    pub fn items(&self) -> &[Self] {
        self.embedded.as_ref().map_or(&[], |list| list.items.as_slice())
    }
}

/// A page of a directory listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ResourceList {
    /// Sort field used for the listing.
    pub sort: Option<String>,
    /// Key of a published directory.
    pub public_key: Option<String>,
    /// The entries.
    pub items: Vec<Resource>,
    /// Path of the listed directory.
    pub path: Option<String>,
    /// Page size.
    pub limit: Option<u32>,
    /// Page offset.
    pub offset: Option<u32>,
    /// Total number of entries.
    pub total: Option<u32>,
}

/// A flat list of files.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FilesResourceList {
    /// The files.
    pub items: Vec<Resource>,
    /// Page size.
    pub limit: Option<u32>,
    /// Page offset.
    pub offset: Option<u32>,
    /// The HTTP status code of the response.
    #[serde(skip)]
    pub http_status_code: u16,
}

/// The most recently uploaded files.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LastUploadedResourceList {
    /// The files, newest first.
    pub items: Vec<Resource>,
    /// Page size.
    pub limit: Option<u32>,
    /// The HTTP status code of the response.
    #[serde(skip)]
    pub http_status_code: u16,
}

protocol_object!(Resource, FilesResourceList, LastUploadedResourceList);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_resource_decodes_with_offset_timestamps() {
        let resource: Resource = serde_json::from_str(
            r#"{
                "name": "photo.png",
                "path": "disk:/foo/photo.png",
                "type": "file",
                "size": 34567,
                "created": "2014-04-21T14:57:13+04:00"
            }"#,
        )
        .unwrap();

        assert!(resource.is_file());
        assert_eq!(resource.size, Some(34567));
        assert_eq!(
            resource.created,
            Some(Utc.with_ymd_and_hms(2014, 4, 21, 10, 57, 13).unwrap())
        );
        assert!(resource.items().is_empty());
    }

    #[test]
    fn test_resource_type_is_case_insensitive() {
        assert_eq!(ResourceType::from_wire("DIR"), Some(ResourceType::Dir));
        assert_eq!(
            serde_json::to_string(&ResourceType::File).unwrap(),
            r#""file""#
        );
    }

    #[test]
    fn test_custom_properties_keep_insertion_order() {
        let resource: Resource =
            serde_json::from_str(r#"{"custom_properties": {"foo": "1", "bar": "2"}}"#).unwrap();
        let keys: Vec<&String> = resource.custom_properties.as_ref().unwrap().keys().collect();
        assert_eq!(keys, ["foo", "bar"]);
    }
}
