//! HTTP client wrapper for MediaFire requests.

use reqwest::Client;
use serde_json::Value;

use crate::error::{MediafireError, Result};

/// HTTP client for making requests to MediaFire servers.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Make a GET request and parse the response body as JSON.
    ///
    /// # Arguments
    /// * `url` - URL to fetch
    ///
    /// # Returns
    /// Parsed JSON response body
    pub async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(MediafireError::HttpError(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }

    /// Make a GET request and return the response body as text.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(MediafireError::HttpError(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }

    /// Make a GET request and return the raw response for body streaming.
    pub async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(MediafireError::HttpError(response.status().as_u16()));
        }

        Ok(response)
    }

    /// Make a header-only HEAD request and return the `Content-Encoding`
    /// the server reports for the resource, if any.
    ///
    /// The status is deliberately not checked: interstitial detection only
    /// cares about the encoding header.
    pub async fn head_content_encoding(&self, url: &str) -> Result<Option<String>> {
        let response = self.client.head(url).send().await?;

        Ok(response
            .headers()
            .get(reqwest::header::CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_ascii_lowercase()))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
