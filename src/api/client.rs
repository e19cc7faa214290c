//! MediaFire API client with pagination handling.

use serde_json::Value;

use crate::error::{MediafireError, Result};
use crate::http::HttpClient;
use crate::node::{RemoteFile, RemoteFolder};

/// Base URL for the MediaFire API
const DEFAULT_BASE_URL: &str = "https://www.mediafire.com";

/// Which child listing of a folder to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// File entries of a folder
    Files,
    /// Subfolder entries of a folder
    Folders,
}

impl ContentType {
    fn as_str(self) -> &'static str {
        match self {
            ContentType::Files => "files",
            ContentType::Folders => "folders",
        }
    }
}

/// MediaFire metadata API client.
///
/// Wraps the two logical operations the downloader depends on: single info
/// fetches for files and folders, and chunked folder content listings that
/// are accumulated until the server reports no further chunks.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client against the production endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a new API client against a custom base URL.
    ///
    /// Used by tests to point the client at a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
        }
    }

    fn file_info_endpoint(&self, quick_key: &str) -> String {
        format!(
            "{}/api/file/get_info.php?quick_key={}&response_format=json",
            self.base_url, quick_key
        )
    }

    fn folder_endpoint(&self, op: &str, content_type: &str, folder_key: &str, chunk: u32) -> String {
        format!(
            "{}/api/1.4/folder/{}.php?r=utga&content_type={}&filter=all&order_by=name\
             &order_direction=asc&chunk={}&version=1.5&folder_key={}&response_format=json",
            self.base_url, op, content_type, chunk, folder_key
        )
    }

    /// Fetch metadata for a single file by its quick key.
    ///
    /// # Returns
    /// The file's name, content hash, size and primary download link.
    pub async fn file_info(&self, quick_key: &str) -> Result<RemoteFile> {
        let response = self.http.get_json(&self.file_info_endpoint(quick_key)).await?;

        let info = response
            .get("response")
            .and_then(|v| v.get("file_info"))
            .ok_or_else(|| {
                MediafireError::MetadataParse(format!("missing file_info for key {}", quick_key))
            })?;

        RemoteFile::from_value(info).ok_or_else(|| {
            MediafireError::MetadataParse(format!("incomplete file_info for key {}", quick_key))
        })
    }

    /// Fetch a folder's display name by its folder key.
    pub async fn folder_name(&self, folder_key: &str) -> Result<String> {
        let url = self.folder_endpoint("get_info", "folder", folder_key, 1);
        let response = self.http.get_json(&url).await?;

        response
            .get("response")
            .and_then(|v| v.get("folder_info"))
            .and_then(|v| v.get("name"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                MediafireError::MetadataParse(format!(
                    "missing folder_info.name for key {}",
                    folder_key
                ))
            })
    }

    /// Fetch one content chunk for a folder and return its `folder_content`
    /// object.
    async fn folder_content(
        &self,
        folder_key: &str,
        content_type: ContentType,
        chunk: u32,
    ) -> Result<Value> {
        let url = self.folder_endpoint("get_content", content_type.as_str(), folder_key, chunk);
        let response = self.http.get_json(&url).await?;

        response
            .get("response")
            .and_then(|v| v.get("folder_content"))
            .cloned()
            .ok_or_else(|| {
                MediafireError::MetadataParse(format!(
                    "missing folder_content for key {} (chunk {})",
                    folder_key, chunk
                ))
            })
    }

    /// Fetch the complete file listing of a folder.
    ///
    /// Chunks are requested starting at index 1 and accumulated until the
    /// server stops reporting `more_chunks`; the result preserves server
    /// order. A chunk without a `files` array is treated as empty, which is
    /// how the API represents folders with no files.
    pub async fn folder_files(&self, folder_key: &str) -> Result<Vec<RemoteFile>> {
        let mut files = Vec::new();
        let mut chunk = 1;

        loop {
            let content = self
                .folder_content(folder_key, ContentType::Files, chunk)
                .await?;

            if let Some(items) = content.get("files").and_then(|v| v.as_array()) {
                for item in items {
                    files.push(RemoteFile::from_value(item).ok_or_else(|| {
                        MediafireError::MetadataParse(format!(
                            "incomplete file entry in folder {}",
                            folder_key
                        ))
                    })?);
                }
            }

            if !more_chunks(&content) {
                break;
            }
            chunk += 1;
        }

        Ok(files)
    }

    /// Fetch the complete subfolder listing of a folder.
    ///
    /// Same accumulation contract as [`folder_files`](Self::folder_files).
    pub async fn folder_folders(&self, folder_key: &str) -> Result<Vec<RemoteFolder>> {
        let mut folders = Vec::new();
        let mut chunk = 1;

        loop {
            let content = self
                .folder_content(folder_key, ContentType::Folders, chunk)
                .await?;

            if let Some(items) = content.get("folders").and_then(|v| v.as_array()) {
                for item in items {
                    folders.push(RemoteFolder::from_value(item).ok_or_else(|| {
                        MediafireError::MetadataParse(format!(
                            "incomplete folder entry in folder {}",
                            folder_key
                        ))
                    })?);
                }
            }

            if !more_chunks(&content) {
                break;
            }
            chunk += 1;
        }

        Ok(folders)
    }
}

/// The server flags continuation with the literal string "yes".
fn more_chunks(content: &Value) -> bool {
    content.get("more_chunks").and_then(|v| v.as_str()) == Some("yes")
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
