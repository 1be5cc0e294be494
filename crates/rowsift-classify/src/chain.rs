#![deny(unsafe_code)]

//! Ordered, named filter chains with first-match-wins semantics.

use rowsift_model::{AttributeView, FilterKey};
use tracing::{debug, trace};

use crate::{ClassifyError, Filter, RecordBuckets};

/// Outcome of partitioning one record against a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Partition {
    /// The record was claimed by the filter with this key.
    Matched(FilterKey),
    /// No filter claimed the record.
    Unfiltered,
}

struct FilterEntry {
    key: FilterKey,
    filter: Box<dyn Filter>,
}

/// Insertion-ordered registry of named classification predicates.
///
/// The chain is an ordered sequence of key/predicate pairs, not an unordered
/// map: name lookup and first-match-wins precedence both depend on declared
/// order.
#[derive(Default)]
pub struct FilterChain {
    entries: Vec<FilterEntry>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter at the tail of the chain.
    pub fn append(&mut self, key: FilterKey, filter: Box<dyn Filter>) -> &mut Self {
        self.entries.push(FilterEntry { key, filter });
        self
    }

    /// Splice filters before all existing entries.
    ///
    /// Relative order is preserved within both groups: the new entries keep
    /// their given order and take precedence over everything already in the
    /// chain.
    pub fn prepend(&mut self, entries: Vec<(FilterKey, Box<dyn Filter>)>) -> &mut Self {
        let mut head: Vec<FilterEntry> = entries
            .into_iter()
            .map(|(key, filter)| FilterEntry { key, filter })
            .collect();
        head.append(&mut self.entries);
        self.entries = head;
        self
    }

    /// Chain keys in precedence order.
    pub fn keys(&self) -> impl Iterator<Item = &FilterKey> {
        self.entries.iter().map(|entry| &entry.key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Start-of-run lifecycle: clear every filter's cross-record state and
    /// hand back a fresh bucket map with one empty sequence per chain key.
    pub fn reset(&mut self) -> RecordBuckets {
        debug!(filters = self.entries.len(), "resetting filter chain");
        let mut buckets = RecordBuckets::new();
        for entry in &mut self.entries {
            entry.filter.reset();
            buckets.ensure(&entry.key);
        }
        buckets
    }

    /// Evaluate the chain over one record's views, first match wins.
    ///
    /// Predicate errors are not caught here; they abort the run.
    pub fn classify(
        &mut self,
        raw: &AttributeView,
        translated: &AttributeView,
    ) -> Result<Partition, ClassifyError> {
        for entry in &mut self.entries {
            let claimed =
                entry
                    .filter
                    .matches(raw, translated)
                    .map_err(|source| ClassifyError::Predicate {
                        key: entry.key.clone(),
                        source,
                    })?;
            if claimed {
                trace!(key = entry.key.as_str(), "record claimed");
                return Ok(Partition::Matched(entry.key.clone()));
            }
        }
        trace!("record unfiltered");
        Ok(Partition::Unfiltered)
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}
