#![deny(unsafe_code)]

use crate::{FieldName, Value};

/// One already-parsed source row: field name -> raw scalar, in arrival order.
///
/// Rows are produced by the external reader layer; this core never parses
/// wire formats itself.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawRow {
    fields: Vec<(FieldName, Value)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(field, value)` pairs, later duplicates replacing
    /// earlier ones.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (FieldName, Value)>) -> Self {
        let mut row = Self::new();
        for (field, value) in pairs {
            row.set(field, value);
        }
        row
    }

    /// Set a field, replacing any existing value under the same name.
    pub fn set(&mut self, field: FieldName, value: Value) {
        if let Some(slot) = self.fields.iter_mut().find(|(name, _)| *name == field) {
            slot.1 = value;
        } else {
            self.fields.push((field, value));
        }
    }

    /// Builder-style `set`.
    #[must_use]
    pub fn with(mut self, field: FieldName, value: Value) -> Self {
        self.set(field, value);
        self
    }

    /// Look up a field; `None` means the source never carried it.
    pub fn get(&self, field: &FieldName) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, field: &FieldName) -> bool {
        self.get(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &Value)> {
        self.fields.iter().map(|(name, value)| (name, value))
    }
}
