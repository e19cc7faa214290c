//! # mediafire-dl
//!
//! Rust client for downloading files and mirroring folder trees from
//! MediaFire share links.
//!
//! ## Features
//!
//! - **Share link parsing**: classify `file`, `file_premium` and `folder`
//!   links and extract their keys.
//! - **Folder mirroring**: depth-first traversal of the remote folder tree,
//!   materializing a matching local directory structure with
//!   filesystem-safe names.
//! - **Bounded parallelism**: one worker per file, capped by a configurable
//!   permit count shared across the whole run.
//! - **Integrity skip**: files whose local SHA-256 matches the
//!   remote-reported hash are skipped without any transfer; mismatching
//!   copies are re-downloaded.
//! - **Cooperative cancellation**: a shared token stops new transfers,
//!   removes partially written files, and drains all workers before
//!   returning.
//! - **Interstitial bypass**: warning pages served in place of file bytes
//!   are detected on a header preflight and the real link extracted from
//!   the markup.
//!
//! ## Example
//!
//! ```no_run
//! use mediafire_dl::Downloader;
//!
//! # async fn example() -> mediafire_dl::Result<()> {
//! let downloader = Downloader::new().with_workers(4);
//!
//! let summary = downloader
//!     .download(
//!         "https://www.mediafire.com/folder/abc123/docs",
//!         std::path::Path::new("downloads"),
//!     )
//!     .await?;
//!
//! println!(
//!     "{} downloaded, {} skipped, {} failed",
//!     summary.completed, summary.skipped, summary.failed
//! );
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod http;
pub mod interstitial;
pub mod link;
pub mod mirror;
pub mod naming;
pub mod node;
pub mod transfer;
pub mod verify;

// Re-export commonly used types
pub use api::ApiClient;
pub use error::{MediafireError, Result};
pub use link::{parse_share_link, LinkKind, ShareLink};
pub use mirror::Downloader;
pub use naming::NameNormalizer;
pub use node::{RemoteFile, RemoteFolder};
pub use transfer::{DownloadPool, MirrorSummary, TransferOutcome};
