#![deny(unsafe_code)]

use crate::{AttrName, MISSING, Value};

/// Read-only mapping from output attribute name to value, in attribute
/// declaration order.
///
/// Used for both the raw view (untranslated source values) and the translated
/// view of a candidate record. Lookups for attributes the view does not carry
/// fall through to [`Value::Missing`] rather than failing.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AttributeView {
    entries: Vec<(AttrName, Value)>,
}

impl AttributeView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any existing value under the same name.
    pub fn set(&mut self, attr: AttrName, value: Value) {
        if let Some(slot) = self.entries.iter_mut().find(|(name, _)| *name == attr) {
            slot.1 = value;
        } else {
            self.entries.push((attr, value));
        }
    }

    /// Look up an attribute by name; absent attributes read as `Missing`.
    pub fn get(&self, attr: &AttrName) -> &Value {
        self.lookup(attr).unwrap_or(&MISSING)
    }

    /// Convenience lookup by string name; absent attributes read as `Missing`.
    pub fn get_str(&self, attr: &str) -> &Value {
        self.entries
            .iter()
            .find(|(name, _)| name.as_str() == attr)
            .map_or(&MISSING, |(_, value)| value)
    }

    /// Look up an attribute, distinguishing "not carried" from `Missing`.
    pub fn lookup(&self, attr: &AttrName) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == attr)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, attr: &AttrName) -> bool {
        self.lookup(attr).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AttrName, &Value)> {
        self.entries.iter().map(|(name, value)| (name, value))
    }
}

impl FromIterator<(AttrName, Value)> for AttributeView {
    fn from_iter<I: IntoIterator<Item = (AttrName, Value)>>(iter: I) -> Self {
        let mut view = Self::new();
        for (attr, value) in iter {
            view.set(attr, value);
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str) -> AttrName {
        AttrName::new(name).unwrap()
    }

    #[test]
    fn absent_attribute_reads_missing() {
        let view = AttributeView::new();
        assert_eq!(view.get(&attr("name")), &Value::Missing);
        assert!(view.lookup(&attr("name")).is_none());
    }

    #[test]
    fn entries_keep_insertion_order() {
        let view: AttributeView = [
            (attr("b"), Value::Int(2)),
            (attr("a"), Value::Int(1)),
            (attr("c"), Value::Int(3)),
        ]
        .into_iter()
        .collect();

        let order: Vec<&str> = view.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }
}
