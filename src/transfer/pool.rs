//! Bounded concurrent download pool.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::http::HttpClient;
use crate::naming::NameNormalizer;
use crate::node::RemoteFile;
use crate::transfer::{download_file, MirrorSummary, TransferOutcome};

/// Runs download workers in parallel, capped at a fixed permit count, with
/// cooperative cancellation.
///
/// One pool is created per top-level download invocation; the folder
/// traversal reuses it for every level so the configured parallelism bounds
/// the whole run, not just one directory.
#[derive(Debug, Clone)]
pub struct DownloadPool {
    http: HttpClient,
    normalizer: NameNormalizer,
    semaphore: Arc<Semaphore>,
    cancel: CancellationToken,
}

impl DownloadPool {
    /// Create a pool with `workers` permits (at least one) sharing the given
    /// cancellation token.
    pub fn new(
        http: HttpClient,
        normalizer: NameNormalizer,
        workers: usize,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            http,
            normalizer,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
            cancel,
        }
    }

    /// Whether the pool's cancellation token has been set.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Download one folder level's files into `dir` and wait for every
    /// worker to reach a terminal state.
    ///
    /// Sibling files complete in any order. Once the cancellation token is
    /// set no new transfer starts (each worker observes the token before its
    /// network I/O), and `run` still returns only after all spawned workers
    /// have exited.
    pub async fn run(&self, files: Vec<RemoteFile>, dir: &Path) -> MirrorSummary {
        let mut tasks = JoinSet::new();

        for file in files {
            tasks.spawn(download_file(
                self.http.clone(),
                self.normalizer.clone(),
                file,
                dir.to_path_buf(),
                self.semaphore.clone(),
                self.cancel.clone(),
            ));
        }

        let mut summary = MirrorSummary::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    warn!("download task failed to complete: {}", e);
                    summary.record(TransferOutcome::Failed);
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_run_returns_immediately() {
        let pool = DownloadPool::new(
            HttpClient::new(),
            NameNormalizer::new(),
            4,
            CancellationToken::new(),
        );

        let summary = pool.run(Vec::new(), Path::new(".")).await;
        assert_eq!(summary, MirrorSummary::default());
    }

    #[tokio::test]
    async fn test_cancelled_pool_spawns_no_transfers() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        // Point at an unroutable address: a worker that observed the token
        // correctly never opens a connection, so no error surfaces.
        let pool = DownloadPool::new(HttpClient::new(), NameNormalizer::new(), 2, cancel);
        let files = vec![RemoteFile {
            filename: "x.bin".to_string(),
            hash: "00".to_string(),
            size: 1,
            download_url: "http://127.0.0.1:1/unreachable".to_string(),
        }];

        let dir = tempfile::tempdir().unwrap();
        let summary = pool.run(files, dir.path()).await;

        assert_eq!(summary.cancelled, 1);
        assert_eq!(summary.total(), 1);
        assert!(!dir.path().join("x.bin").exists());
    }
}
