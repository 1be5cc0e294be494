#![deny(unsafe_code)]

//! Value model shared by the rowsift batch-import core.
//!
//! Rows arrive from an external reader layer as [`RawRow`] values; the
//! translate and classify crates derive [`AttributeView`]s from them. Nothing
//! here performs I/O.

pub mod error;
pub mod ids;
pub mod row;
pub mod value;
pub mod view;

pub use error::ModelError;
pub use ids::{AttrName, FieldName, FilterKey};
pub use row::RawRow;
pub use value::{MISSING, Value};
pub use view::AttributeView;
