//! Concurrent file transfers: per-file workers and the bounded pool.

mod pool;
mod worker;

pub use pool::DownloadPool;
pub(crate) use worker::download_file;

/// Terminal state of a single file transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// The file was fully downloaded and written
    Completed,
    /// A local copy with a matching hash already existed; nothing was fetched
    Skipped,
    /// The interstitial page had no usable link (deleted or flagged file)
    Blocked,
    /// Cancellation was observed before or during the transfer
    Cancelled,
    /// A transport failure ended the transfer
    Failed,
}

/// Outcome counts for a pool run or a whole mirror traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorSummary {
    /// Files fully downloaded
    pub completed: u64,
    /// Files skipped because an up-to-date local copy existed
    pub skipped: u64,
    /// Files blocked or missing on the remote side
    pub blocked: u64,
    /// Files that failed with a transport error
    pub failed: u64,
    /// Files whose transfer was cancelled
    pub cancelled: u64,
}

impl MirrorSummary {
    /// Count one terminal outcome.
    pub fn record(&mut self, outcome: TransferOutcome) {
        match outcome {
            TransferOutcome::Completed => self.completed += 1,
            TransferOutcome::Skipped => self.skipped += 1,
            TransferOutcome::Blocked => self.blocked += 1,
            TransferOutcome::Cancelled => self.cancelled += 1,
            TransferOutcome::Failed => self.failed += 1,
        }
    }

    /// Fold another summary into this one.
    pub fn merge(&mut self, other: MirrorSummary) {
        self.completed += other.completed;
        self.skipped += other.skipped;
        self.blocked += other.blocked;
        self.failed += other.failed;
        self.cancelled += other.cancelled;
    }

    /// Total number of files that reached a terminal state.
    pub fn total(&self) -> u64 {
        self.completed + self.skipped + self.blocked + self.failed + self.cancelled
    }

    /// Whether any transfer observed cancellation.
    pub fn interrupted(&self) -> bool {
        self.cancelled > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_record() {
        let mut summary = MirrorSummary::default();
        summary.record(TransferOutcome::Completed);
        summary.record(TransferOutcome::Completed);
        summary.record(TransferOutcome::Skipped);
        summary.record(TransferOutcome::Failed);

        assert_eq!(summary.completed, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 4);
        assert!(!summary.interrupted());
    }

    #[test]
    fn test_summary_merge() {
        let mut a = MirrorSummary {
            completed: 1,
            skipped: 2,
            ..Default::default()
        };
        let b = MirrorSummary {
            completed: 3,
            cancelled: 1,
            ..Default::default()
        };

        a.merge(b);
        assert_eq!(a.completed, 4);
        assert_eq!(a.skipped, 2);
        assert_eq!(a.cancelled, 1);
        assert!(a.interrupted());
    }
}
