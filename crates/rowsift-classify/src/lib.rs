#![deny(unsafe_code)]

//! Candidate records and first-match-wins classification.
//!
//! A [`CandidateRecord`] wraps one raw row together with the job's attribute
//! map and lazily derives its raw and translated views. A [`FilterChain`] is
//! an ordered sequence of named predicates; the earliest claiming predicate
//! wins the record, and records claimed by nothing land in the unfiltered
//! bucket.

pub mod buckets;
pub mod chain;
pub mod error;
pub mod filter;
pub mod record;

pub use buckets::RecordBuckets;
pub use chain::{FilterChain, Partition};
pub use error::ClassifyError;
pub use filter::{Filter, filter_fn, try_filter_fn};
pub use record::CandidateRecord;
