#![deny(unsafe_code)]

//! The single-pass run orchestrator.

use std::sync::Arc;

use rowsift_classify::{CandidateRecord, FilterChain, Partition, RecordBuckets};
use rowsift_model::FilterKey;
use rowsift_translate::AttributeMap;
use tracing::{debug, info, info_span};

use crate::{BatchError, BucketCount, RowProvider, RunSummary};

struct RunSnapshot {
    all: Vec<Arc<CandidateRecord>>,
    buckets: RecordBuckets,
    unfiltered: Vec<Arc<CandidateRecord>>,
    success: bool,
    provider_errors: Vec<String>,
}

/// Drives one job: per provider row, build a candidate record, partition it,
/// accumulate totals.
///
/// A run starts by calling [`FilterChain::reset`], mandatory on every run
/// including re-runs of the same job object, which clears stateful
/// predicates and discards the previous run's snapshot. Until the first
/// `execute` completes, result accessors fail with
/// [`BatchError::NotProcessed`].
pub struct BatchRun {
    map: Arc<AttributeMap>,
    chain: FilterChain,
    snapshot: Option<RunSnapshot>,
}

impl BatchRun {
    pub fn new(map: Arc<AttributeMap>, chain: FilterChain) -> Self {
        Self {
            map,
            chain,
            snapshot: None,
        }
    }

    /// The job's filter chain, for appending or prepending filters between
    /// runs. Never mutate a chain while a run is in flight.
    pub fn filter_chain_mut(&mut self) -> &mut FilterChain {
        &mut self.chain
    }

    /// Process every provider row in arrival order.
    ///
    /// Translator failures degrade single attributes and never surface here;
    /// a predicate error aborts the run and leaves it unprocessed. An empty
    /// error-free batch is a normal outcome: the summary reports success with
    /// zero records.
    pub fn execute(&mut self, provider: &impl RowProvider) -> Result<RunSummary, BatchError> {
        let span = info_span!("batch_run");
        let _guard = span.enter();

        // The previous snapshot is discarded even if this run aborts.
        self.snapshot = None;
        let mut buckets = self.chain.reset();
        let mut all: Vec<Arc<CandidateRecord>> = Vec::new();
        let mut unfiltered: Vec<Arc<CandidateRecord>> = Vec::new();

        for row in provider.rows() {
            let record = Arc::new(CandidateRecord::new(row.clone(), Arc::clone(&self.map)));
            all.push(Arc::clone(&record));

            match record.partition(&mut self.chain)? {
                Partition::Matched(key) => {
                    debug!(key = key.as_str(), row = all.len(), "record classified");
                    buckets.push(&key, record);
                }
                Partition::Unfiltered => {
                    debug!(row = all.len(), "record unfiltered");
                    unfiltered.push(record);
                }
            }
        }

        let provider_errors = provider.errors().to_vec();
        let success = provider_errors.is_empty();
        let snapshot = RunSnapshot {
            all,
            buckets,
            unfiltered,
            success,
            provider_errors,
        };
        let summary = build_summary(&snapshot);
        self.snapshot = Some(snapshot);

        info!(
            total = summary.total_records,
            unfiltered = summary.unfiltered_count,
            success = summary.success,
            "run complete"
        );
        Ok(summary)
    }

    /// True once a run has completed, even one that produced no records.
    pub fn processed(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Every candidate record of the last run, in input row order.
    pub fn all_records(&self) -> Result<&[Arc<CandidateRecord>], BatchError> {
        Ok(&self.current()?.all)
    }

    /// Classified records of the last run, bucketed by filter key.
    pub fn records(&self) -> Result<&RecordBuckets, BatchError> {
        Ok(&self.current()?.buckets)
    }

    /// One bucket's records; an unknown key reads as empty.
    pub fn records_for(&self, key: &FilterKey) -> Result<&[Arc<CandidateRecord>], BatchError> {
        Ok(self.current()?.buckets.get(key).unwrap_or_default())
    }

    /// Records claimed by no filter, in input row order.
    pub fn unfiltered_records(&self) -> Result<&[Arc<CandidateRecord>], BatchError> {
        Ok(&self.current()?.unfiltered)
    }

    /// Derived per-bucket counts, in chain order.
    pub fn record_counts(&self) -> Result<Vec<(FilterKey, usize)>, BatchError> {
        Ok(self.current()?.buckets.counts())
    }

    pub fn total_records(&self) -> Result<usize, BatchError> {
        Ok(self.current()?.all.len())
    }

    /// Whether the last run's provider reported an error-free payload.
    pub fn success(&self) -> Result<bool, BatchError> {
        Ok(self.current()?.success)
    }

    /// Derived statistics for the last run.
    pub fn summary(&self) -> Result<RunSummary, BatchError> {
        Ok(build_summary(self.current()?))
    }

    fn current(&self) -> Result<&RunSnapshot, BatchError> {
        self.snapshot.as_ref().ok_or(BatchError::NotProcessed)
    }
}

fn build_summary(snapshot: &RunSnapshot) -> RunSummary {
    RunSummary {
        success: snapshot.success,
        total_records: snapshot.all.len(),
        buckets: snapshot
            .buckets
            .counts()
            .into_iter()
            .map(|(key, count)| BucketCount {
                key: key.as_str().to_string(),
                count,
            })
            .collect(),
        unfiltered_count: snapshot.unfiltered.len(),
        provider_errors: snapshot.provider_errors.clone(),
    }
}
