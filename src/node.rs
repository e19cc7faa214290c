//! Remote file and folder metadata types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A file entry as reported by the MediaFire API.
///
/// Identity is the pair (parent folder key, `filename`); names are unique
/// within a folder but not globally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    /// File name as stored remotely (not yet normalized)
    pub filename: String,
    /// SHA-256 content hash, lowercase hex
    pub hash: String,
    /// File size in bytes
    pub size: u64,
    /// Primary download link
    pub download_url: String,
}

impl RemoteFile {
    /// Parse a file entry from an API response item.
    ///
    /// Returns `None` when any expected field is missing; the caller decides
    /// how to report that.
    pub(crate) fn from_value(json: &Value) -> Option<Self> {
        let filename = json.get("filename")?.as_str()?.to_string();
        let hash = json.get("hash")?.as_str()?.to_string();
        // The API reports sizes as decimal strings
        let size = match json.get("size")? {
            Value::String(s) => s.parse().ok()?,
            other => other.as_u64()?,
        };
        let download_url = json
            .get("links")?
            .get("normal_download")?
            .as_str()?
            .to_string();

        Some(Self {
            filename,
            hash,
            size,
            download_url,
        })
    }
}

/// A subfolder entry as reported by the MediaFire API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFolder {
    /// Folder name as stored remotely (not yet normalized)
    pub name: String,
    /// Folder key used for content listings
    pub folder_key: String,
}

impl RemoteFolder {
    /// Parse a folder entry from an API response item.
    pub(crate) fn from_value(json: &Value) -> Option<Self> {
        let name = json.get("name")?.as_str()?.to_string();
        let folder_key = json.get("folderkey")?.as_str()?.to_string();

        Some(Self { name, folder_key })
    }
}
