#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Derived statistics for one completed run.
///
/// Counts are computed from the run snapshot, never stored independently, so
/// they cannot drift from the buckets they describe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// True when the provider reported no errors, even for a zero-row batch.
    pub success: bool,
    /// Total candidate records this run, in all buckets plus unfiltered.
    pub total_records: usize,
    /// Per-bucket counts, in chain order.
    pub buckets: Vec<BucketCount>,
    /// Records claimed by no filter.
    pub unfiltered_count: usize,
    /// Diagnostics from the provider; empty on clean runs.
    pub provider_errors: Vec<String>,
}

/// One bucket's record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCount {
    pub key: String,
    pub count: usize,
}

impl RunSummary {
    pub fn bucket_count(&self, key: &str) -> Option<usize> {
        self.buckets
            .iter()
            .find(|bucket| bucket.key == key)
            .map(|bucket| bucket.count)
    }
}
