//! Folder traversal and the top-level download entry points.

use std::path::Path;

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::api::ApiClient;
use crate::error::Result;
use crate::http::HttpClient;
use crate::link::{parse_share_link, LinkKind};
use crate::naming::NameNormalizer;
use crate::transfer::{DownloadPool, MirrorSummary};

/// Default number of parallel download workers.
const DEFAULT_WORKERS: usize = 10;

/// Downloads single files and mirrors folder trees from share links.
///
/// The downloader owns the cancellation token for its runs; clone it via
/// [`cancellation_token`](Self::cancellation_token) and call `cancel()` to
/// interrupt an in-flight run (for example from a Ctrl-C handler). Each run
/// then stops starting transfers, removes any partially written file, and
/// returns once every worker has exited.
///
/// # Example
/// ```no_run
/// use mediafire_dl::Downloader;
///
/// # async fn example() -> mediafire_dl::Result<()> {
/// let downloader = Downloader::new().with_workers(4);
/// let summary = downloader
///     .download("https://www.mediafire.com/folder/abc123/docs", std::path::Path::new("."))
///     .await?;
/// println!("{} downloaded, {} skipped", summary.completed, summary.skipped);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Downloader {
    api: ApiClient,
    http: HttpClient,
    normalizer: NameNormalizer,
    workers: usize,
    cancel: CancellationToken,
}

impl Downloader {
    /// Create a downloader with default settings (production API, 10
    /// workers, default normalization rules).
    pub fn new() -> Self {
        Self {
            api: ApiClient::new(),
            http: HttpClient::new(),
            normalizer: NameNormalizer::new(),
            workers: DEFAULT_WORKERS,
            cancel: CancellationToken::new(),
        }
    }

    /// Set the number of parallel download workers (at least one is used).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Point the metadata API at a custom base URL.
    ///
    /// Used by tests to target a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api = ApiClient::with_base_url(base_url);
        self
    }

    /// Get a handle to the cancellation token shared by this downloader's
    /// runs.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Parse a share URL and download whatever it points at into `dest`.
    ///
    /// File links download a single file into `dest`; folder links mirror
    /// the folder tree under `dest`.
    pub async fn download(&self, url: &str, dest: &Path) -> Result<MirrorSummary> {
        let link = parse_share_link(url)?;

        match link.kind {
            LinkKind::File => self.download_file(&link.key, dest).await,
            LinkKind::Folder => self.mirror_folder(&link.key, dest).await,
        }
    }

    /// Download a single file by quick key into `dest_dir`.
    pub async fn download_file(&self, quick_key: &str, dest_dir: &Path) -> Result<MirrorSummary> {
        let file = self.api.file_info(quick_key).await?;

        tokio::fs::create_dir_all(dest_dir).await?;

        let pool = DownloadPool::new(
            self.http.clone(),
            self.normalizer.clone(),
            1,
            self.cancel.child_token(),
        );
        Ok(pool.run(vec![file], dest_dir).await)
    }

    /// Mirror a remote folder tree onto the local filesystem.
    ///
    /// The folder's display name is resolved, normalized and created (or
    /// reused) under `dest_root` as the mirror root. Traversal is depth
    /// first: each folder's files fully drain through the shared pool before
    /// its subfolders are visited, so parallelism stays within one folder
    /// level while the permit count bounds the whole run.
    ///
    /// Failures stay contained: a malformed file listing skips that folder's
    /// downloads but its subfolders are still visited, and a malformed
    /// subfolder listing ends recursion for that node only. Only
    /// cancellation stops the run early.
    pub async fn mirror_folder(&self, folder_key: &str, dest_root: &Path) -> Result<MirrorSummary> {
        let name = self.api.folder_name(folder_key).await?;
        let root = dest_root.join(self.normalizer.normalize(&name));

        let pool = DownloadPool::new(
            self.http.clone(),
            self.normalizer.clone(),
            self.workers,
            self.cancel.child_token(),
        );

        let mut summary = MirrorSummary::default();
        self.walk(&pool, folder_key, &root, &mut summary).await?;
        Ok(summary)
    }

    /// Depth-first traversal step: materialize `dir`, drain its files, then
    /// recurse into each subfolder with an explicitly composed child path.
    fn walk<'a>(
        &'a self,
        pool: &'a DownloadPool,
        folder_key: &'a str,
        dir: &'a Path,
        summary: &'a mut MirrorSummary,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            // Idempotent: re-running over a partially mirrored tree reuses
            // existing directories
            tokio::fs::create_dir_all(dir).await?;

            match self.api.folder_files(folder_key).await {
                Ok(files) => summary.merge(pool.run(files, dir).await),
                Err(e) => warn!("{}: skipping file listing: {}", dir.display(), e),
            }

            if pool.is_cancelled() {
                return Ok(());
            }

            let folders = match self.api.folder_folders(folder_key).await {
                Ok(folders) => folders,
                Err(e) => {
                    warn!("{}: skipping subfolder listing: {}", dir.display(), e);
                    return Ok(());
                }
            };

            for folder in folders {
                let child = dir.join(self.normalizer.normalize(&folder.name));
                self.walk(pool, &folder.folder_key, &child, summary).await?;

                if pool.is_cancelled() {
                    break;
                }
            }

            Ok(())
        })
    }
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_count_floor() {
        let downloader = Downloader::new().with_workers(0);
        assert_eq!(downloader.workers, 1);
    }

    #[test]
    fn test_default_workers() {
        assert_eq!(Downloader::new().workers, DEFAULT_WORKERS);
    }

    #[tokio::test]
    async fn test_invalid_link_is_rejected_without_network() {
        // The base URL is unroutable; an invalid link must fail in parsing,
        // before any request is attempted.
        let downloader = Downloader::new().with_base_url("http://127.0.0.1:1");
        let err = downloader
            .download("https://example.com/nope", Path::new("."))
            .await
            .unwrap_err();

        assert!(matches!(err, crate::error::MediafireError::InvalidLink(_)));
    }
}
