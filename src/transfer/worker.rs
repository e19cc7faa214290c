//! Per-file download worker.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::{MediafireError, Result};
use crate::http::HttpClient;
use crate::interstitial::resolve_download_url;
use crate::naming::NameNormalizer;
use crate::node::RemoteFile;
use crate::transfer::TransferOutcome;
use crate::verify::hash_file;

/// How a streaming attempt ended.
enum Streamed {
    /// The full body was written
    Complete,
    /// Cancellation was observed at a chunk boundary
    Cancelled,
}

/// Download one remote file into `dir`, reporting the terminal outcome.
///
/// The worker acquires one permit from the shared semaphore before doing any
/// work and holds it until it returns; every exit path releases the permit by
/// dropping the owned guard. An existing local file with a matching hash is
/// skipped without any network I/O; a mismatching one is treated as stale and
/// overwritten.
pub(crate) async fn download_file(
    http: HttpClient,
    normalizer: NameNormalizer,
    file: RemoteFile,
    dir: PathBuf,
    semaphore: Arc<Semaphore>,
    cancel: CancellationToken,
) -> TransferOutcome {
    let _permit = match semaphore.acquire_owned().await {
        Ok(permit) => permit,
        // The semaphore is only closed when the pool is torn down
        Err(_) => return TransferOutcome::Cancelled,
    };

    let filename = normalizer.normalize(&file.filename);
    let target = dir.join(&filename);

    if target.exists() {
        match hash_file(&target) {
            Ok(local_hash) if local_hash.eq_ignore_ascii_case(&file.hash) => {
                info!("{} already exists, skipping", filename);
                return TransferOutcome::Skipped;
            }
            Ok(_) => {
                info!("{} already exists but corrupted, downloading again", filename);
            }
            Err(e) => {
                warn!("{}: could not hash existing file ({}), downloading again", filename, e);
            }
        }
    }

    if cancel.is_cancelled() {
        return TransferOutcome::Cancelled;
    }

    info!("Downloading {}", filename);

    // A gzip-encoded preflight means the link points at a warning page
    // rather than file bytes; pull the real link out of the page first.
    let url = match resolve_download_url(&http, &file.download_url).await {
        Ok(url) => url,
        Err(e) => {
            warn!("{}: {}", filename, e);
            return TransferOutcome::Blocked;
        }
    };

    match stream_to_file(&http, &url, &target, &cancel).await {
        Ok(Streamed::Complete) => {
            info!("{} downloaded", filename);
            TransferOutcome::Completed
        }
        Ok(Streamed::Cancelled) => {
            match tokio::fs::remove_file(&target).await {
                Ok(()) => info!("Partially downloaded {} deleted", filename),
                Err(e) => warn!("{}: could not delete partial file: {}", filename, e),
            }
            TransferOutcome::Cancelled
        }
        Err(e) => {
            warn!("{}: {}", filename, e);
            // Best effort only; a half-written file from a transport failure
            // is re-downloaded on the next run via the hash check
            let _ = tokio::fs::remove_file(&target).await;
            TransferOutcome::Failed
        }
    }
}

/// Stream a response body into `target` in fixed-size chunks, checking the
/// cancellation token before each write.
async fn stream_to_file(
    http: &HttpClient,
    url: &str,
    target: &Path,
    cancel: &CancellationToken,
) -> Result<Streamed> {
    let response = http.get(url).await?;

    let mut out = tokio::fs::File::create(target).await?;
    let mut stream = response.bytes_stream();
    let mut interrupted = false;

    while let Some(chunk) = stream.next().await {
        if cancel.is_cancelled() {
            interrupted = true;
            break;
        }
        let chunk = chunk.map_err(|e| MediafireError::Transfer(e.to_string()))?;
        out.write_all(&chunk).await?;
    }

    if interrupted || cancel.is_cancelled() {
        drop(out);
        return Ok(Streamed::Cancelled);
    }

    out.flush().await?;
    Ok(Streamed::Complete)
}
