#![deny(unsafe_code)]

//! Batch orchestration for the rowsift record-transformation core.
//!
//! One [`BatchRun`] drives one job: rows arrive pre-parsed from a
//! [`RowProvider`], each becomes a candidate record, and each record lands in
//! exactly one named bucket (or the unfiltered bucket), deterministically and
//! in one pass. Processing is single-threaded and synchronous; all I/O
//! happens in collaborators before rows reach this crate.

pub mod error;
pub mod logging;
pub mod provider;
pub mod run;
pub mod summary;

pub use error::BatchError;
pub use logging::{LogConfig, LogFormat, init_logging};
pub use provider::{MemoryProvider, RowProvider};
pub use run::BatchRun;
pub use summary::{BucketCount, RunSummary};
