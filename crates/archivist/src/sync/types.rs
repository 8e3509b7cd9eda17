//! Options and result types for a sync pass.

use std::time::Duration;

/// Default cap on how many of the newest remote builds are eligible for
/// first-time discovery per job.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Tunables for one sync pass.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Per-job cap on the newest-first remote build list considered for
    /// discovery. Builds already stored as in progress are exempt; they
    /// are found by status, not by position in the list.
    pub history_limit: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Outcome of a sync pass.
///
/// A pass that returns a report always ran to completion; per-job and
/// per-build failures end up in [`errors`](Self::errors) rather than
/// aborting the pass.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Jobs visited, whether or not they produced errors.
    pub jobs_processed: usize,
    /// Builds inserted by first-time discovery.
    pub builds_created: usize,
    /// In-progress builds that were re-reconciled.
    pub builds_updated: usize,
    /// Test cases recorded across all finalized builds.
    pub tests_recorded: usize,
    /// Human-readable error summaries, in encounter order.
    pub errors: Vec<String>,
    /// Wall-clock duration of the pass.
    pub elapsed: Duration,
}

impl SyncReport {
    /// True when the pass recorded no errors.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
