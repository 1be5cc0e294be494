#![deny(unsafe_code)]

//! Attribute maps and per-attribute translation chains.
//!
//! A job declares its output schema once as an [`AttributeMap`]: for each
//! output attribute, a source field and an ordered [`Translator`] chain.
//! Chain evaluation isolates failures to the failing attribute: one
//! malformed source value degrades one slot to `Missing` and never aborts
//! the record or the run.

pub mod builtins;
pub mod error;
pub mod map;
pub mod registry;
pub mod spec;
pub mod translator;

pub use error::TranslateError;
pub use map::{AttributeDef, AttributeMap, AttributeMapBuilder, ChainFailure, Translation};
pub use registry::{TranslatorFactory, TranslatorRegistry};
pub use spec::{AttributeSpec, ImportSpec};
pub use translator::{TranslateContext, Translator, translator_fn};
