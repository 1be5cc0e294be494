#![deny(unsafe_code)]

//! The reader/provider collaborator boundary.
//!
//! Acquisition and wire-format parsing happen outside this core; by the time
//! a provider is handed to a run it holds fully parsed rows in memory.

use rowsift_model::RawRow;

/// Source of already-parsed rows for one job.
///
/// An empty row set with no errors is a normal outcome, not a failure; the
/// error list explains runs that genuinely failed to produce data.
pub trait RowProvider {
    /// Rows in arrival order. Stable across calls, so the same provider can
    /// back repeated runs.
    fn rows(&self) -> &[RawRow];

    /// True when the provider obtained a non-empty payload.
    fn available(&self) -> bool {
        !self.rows().is_empty()
    }

    /// Diagnostics from the acquisition layer; empty means no errors.
    fn errors(&self) -> &[String];
}

/// In-memory provider over pre-parsed rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    rows: Vec<RawRow>,
    errors: Vec<String>,
}

impl MemoryProvider {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self {
            rows,
            errors: Vec::new(),
        }
    }

    /// Provider that reports no data and no errors.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Provider that failed to produce data for the given reasons.
    pub fn failed(errors: Vec<String>) -> Self {
        Self {
            rows: Vec::new(),
            errors,
        }
    }
}

impl RowProvider for MemoryProvider {
    fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    fn errors(&self) -> &[String] {
        &self.errors
    }
}
