#![deny(unsafe_code)]

//! One raw row seen through a job's attribute map.

use std::sync::{Arc, OnceLock};

use rowsift_model::{AttributeView, RawRow};
use rowsift_translate::{AttributeMap, ChainFailure, Translation};

use crate::{ClassifyError, FilterChain, Partition};

/// A raw row paired with the job's attribute map.
///
/// Both views are derived lazily on first access and memoized for the
/// record's lifetime, so repeated reads and partitioning are stable and
/// idempotent. The record itself is immutable; the caches are internally
/// owned cells, not shared mutable state.
#[derive(Debug)]
pub struct CandidateRecord {
    row: RawRow,
    map: Arc<AttributeMap>,
    raw: OnceLock<AttributeView>,
    translated: OnceLock<Translation>,
}

impl CandidateRecord {
    pub fn new(row: RawRow, map: Arc<AttributeMap>) -> Self {
        Self {
            row,
            map,
            raw: OnceLock::new(),
            translated: OnceLock::new(),
        }
    }

    pub fn row(&self) -> &RawRow {
        &self.row
    }

    pub fn attribute_map(&self) -> &AttributeMap {
        &self.map
    }

    /// Untranslated view: one entry per attribute whose source field the row
    /// carries. Lookups for other attributes read as `Missing`.
    pub fn raw_view(&self) -> &AttributeView {
        self.raw.get_or_init(|| self.map.raw_view(&self.row))
    }

    /// Translated view: exactly one entry per declared attribute, `Missing`
    /// where the chain failed. Computed once, stable thereafter.
    pub fn translated_view(&self) -> &AttributeView {
        &self.translation().view
    }

    /// Chain failures recorded while deriving the translated view, for
    /// diagnostics only.
    pub fn failures(&self) -> &[ChainFailure] {
        &self.translation().failures
    }

    /// Number of attributes whose source field the row actually carries.
    pub fn resolved_count(&self) -> usize {
        self.raw_view().len()
    }

    /// Evaluate the chain's predicates over this record, first match wins.
    ///
    /// The record itself is never mutated; stateful predicates update their
    /// own counters through the chain.
    pub fn partition(&self, chain: &mut FilterChain) -> Result<Partition, ClassifyError> {
        let raw = self.raw_view();
        let translated = self.translated_view();
        chain.classify(raw, translated)
    }

    /// Convert the translated view into a caller-defined object.
    pub fn materialize<T>(&self, constructor: impl FnOnce(&AttributeView) -> T) -> T {
        constructor(self.translated_view())
    }

    fn translation(&self) -> &Translation {
        self.translated
            .get_or_init(|| self.map.translate_row(&self.row))
    }
}
