#![deny(unsafe_code)]

//! Name-based translator lookup.
//!
//! Job configurations refer to translators by name; the registry turns those
//! names into [`Translator`] instances when an attribute map is compiled. An
//! unresolved name degrades to identity pass-through rather than failing the
//! job.

use std::collections::BTreeMap;

use rowsift_model::{AttrName, Value};
use tracing::warn;

use crate::builtins::{
    DateIso8601, DefaultValue, Identity, Lowercase, Prefix, ToFloat, ToInt, Trim, Uppercase,
};
use crate::Translator;

/// Builds a translator for a target attribute, with an optional argument taken
/// from the `name:argument` form of a reference.
pub type TranslatorFactory =
    Box<dyn Fn(&AttrName, Option<&str>) -> Box<dyn Translator> + Send + Sync>;

/// Registry of named translator constructors.
pub struct TranslatorRegistry {
    factories: BTreeMap<String, TranslatorFactory>,
}

impl TranslatorRegistry {
    /// An empty registry; every name resolves to identity.
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registry pre-loaded with the built-in translator library.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("identity", |_, _| Box::new(Identity));
        registry.register("trim", |_, _| Box::new(Trim));
        registry.register("uppercase", |_, _| Box::new(Uppercase));
        registry.register("lowercase", |_, _| Box::new(Lowercase));
        registry.register("to_int", |_, _| Box::new(ToInt));
        registry.register("to_float", |_, _| Box::new(ToFloat));
        registry.register("date_iso8601", |_, _| Box::new(DateIso8601));
        registry.register("prefix", |_, arg| {
            Box::new(Prefix::new(arg.unwrap_or_default()))
        });
        registry.register("default_value", |_, arg| {
            Box::new(DefaultValue::new(match arg {
                Some(text) => Value::from(text),
                None => Value::Missing,
            }))
        });
        registry
    }

    /// Register a factory under a name, replacing any previous registration.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&AttrName, Option<&str>) -> Box<dyn Translator> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Resolve a translator reference for a target attribute.
    ///
    /// References take the form `name` or `name:argument` (for example
    /// `prefix:ID-`). An unknown name resolves to identity pass-through and
    /// logs a warning instead of failing the job.
    pub fn resolve(&self, reference: &str, target: &AttrName) -> Box<dyn Translator> {
        let (name, arg) = match reference.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (reference, None),
        };

        match self.factories.get(name) {
            Some(factory) => factory(target, arg),
            None => {
                warn!(
                    translator = reference,
                    attribute = target.as_str(),
                    "unknown translator, falling back to identity"
                );
                Box::new(Identity)
            }
        }
    }
}

impl Default for TranslatorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
