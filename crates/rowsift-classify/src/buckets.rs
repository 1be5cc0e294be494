#![deny(unsafe_code)]

use std::sync::Arc;

use rowsift_model::FilterKey;

use crate::CandidateRecord;

/// Ordered accumulator: filter key -> classified records, in chain order.
///
/// A fresh bucket map is produced by `FilterChain::reset` at the start of
/// every run, with one empty sequence per chain key; records are appended in
/// arrival order as the run classifies them.
#[derive(Debug, Default)]
pub struct RecordBuckets {
    buckets: Vec<(FilterKey, Vec<Arc<CandidateRecord>>)>,
}

impl RecordBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure a bucket exists for the key, empty if newly added.
    pub fn ensure(&mut self, key: &FilterKey) {
        if !self.buckets.iter().any(|(k, _)| k == key) {
            self.buckets.push((key.clone(), Vec::new()));
        }
    }

    /// Append a record to a key's bucket, creating the bucket if needed.
    pub fn push(&mut self, key: &FilterKey, record: Arc<CandidateRecord>) {
        if let Some((_, records)) = self.buckets.iter_mut().find(|(k, _)| k == key) {
            records.push(record);
        } else {
            self.buckets.push((key.clone(), vec![record]));
        }
    }

    pub fn get(&self, key: &FilterKey) -> Option<&[Arc<CandidateRecord>]> {
        self.buckets
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, records)| records.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &FilterKey> {
        self.buckets.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FilterKey, &[Arc<CandidateRecord>])> {
        self.buckets
            .iter()
            .map(|(key, records)| (key, records.as_slice()))
    }

    /// Derived per-bucket counts, in chain order.
    pub fn counts(&self) -> Vec<(FilterKey, usize)> {
        self.buckets
            .iter()
            .map(|(key, records)| (key.clone(), records.len()))
            .collect()
    }

    /// Number of buckets, not records.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total records across all buckets.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, records)| records.len()).sum()
    }
}
