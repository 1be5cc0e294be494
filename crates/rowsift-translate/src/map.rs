#![deny(unsafe_code)]

//! Attribute declarations and chain evaluation.
//!
//! An [`AttributeMap`] declares, once per job configuration, the output
//! schema: each attribute's source field and ordered translator chain. Maps
//! are built through [`AttributeMapBuilder`], immutable afterwards, and
//! replaced wholesale when a job is reconfigured.

use std::fmt;

use rowsift_model::{AttrName, AttributeView, FieldName, RawRow, Value};
use tracing::debug;

use crate::{TranslateContext, TranslateError, Translator};

/// One declared output attribute: target name, source field, translator chain.
pub struct AttributeDef {
    to: AttrName,
    from: FieldName,
    translators: Vec<Box<dyn Translator>>,
}

impl AttributeDef {
    /// Declare an attribute whose source field defaults to the attribute's
    /// own name.
    pub fn new(to: AttrName) -> Self {
        let from = to.as_field();
        Self {
            to,
            from,
            translators: Vec::new(),
        }
    }

    /// Override the source field.
    #[must_use]
    pub fn with_source(mut self, from: FieldName) -> Self {
        self.from = from;
        self
    }

    /// Append a translator to the chain.
    #[must_use]
    pub fn with_translator(mut self, translator: Box<dyn Translator>) -> Self {
        self.translators.push(translator);
        self
    }

    pub fn to(&self) -> &AttrName {
        &self.to
    }

    pub fn from(&self) -> &FieldName {
        &self.from
    }

    pub fn translator_names(&self) -> Vec<&str> {
        self.translators.iter().map(|t| t.name()).collect()
    }
}

impl fmt::Debug for AttributeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeDef")
            .field("to", &self.to)
            .field("from", &self.from)
            .field("translators", &self.translator_names())
            .finish()
    }
}

/// Builder for an [`AttributeMap`].
///
/// Declarations keep insertion order; redeclaring a name replaces the earlier
/// definition in place, it never duplicates.
#[derive(Debug, Default)]
pub struct AttributeMapBuilder {
    defs: Vec<AttributeDef>,
}

impl AttributeMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an attribute, replacing any earlier declaration of the same
    /// name while keeping its original position.
    pub fn declare(&mut self, def: AttributeDef) -> &mut Self {
        if let Some(slot) = self.defs.iter_mut().find(|d| d.to == def.to) {
            *slot = def;
        } else {
            self.defs.push(def);
        }
        self
    }

    pub fn build(self) -> AttributeMap {
        AttributeMap { defs: self.defs }
    }
}

/// Build-once, insertion-ordered registry of attribute declarations.
#[derive(Debug, Default)]
pub struct AttributeMap {
    defs: Vec<AttributeDef>,
}

impl AttributeMap {
    pub fn builder() -> AttributeMapBuilder {
        AttributeMapBuilder::new()
    }

    pub fn defs(&self) -> impl Iterator<Item = &AttributeDef> {
        self.defs.iter()
    }

    pub fn get(&self, attr: &AttrName) -> Option<&AttributeDef> {
        self.defs.iter().find(|d| &d.to == attr)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Derive the raw view of a row: one entry per attribute whose source
    /// field the row actually carries, untranslated.
    pub fn raw_view(&self, row: &RawRow) -> AttributeView {
        let mut view = AttributeView::new();
        for def in &self.defs {
            if let Some(value) = row.get(&def.from) {
                view.set(def.to.clone(), value.clone());
            }
        }
        view
    }

    /// Evaluate every attribute's translation chain over a row.
    ///
    /// The working view is seeded with each attribute's raw value (`Missing`
    /// for fields the row lacks). Chains run in declaration order; a failing
    /// step stops only its own attribute's chain, sets that slot to `Missing`
    /// and records the failure, then evaluation moves on to the next
    /// attribute. The result always carries exactly one entry per declared
    /// attribute.
    pub fn translate_row(&self, row: &RawRow) -> Translation {
        let mut working = AttributeView::new();
        for def in &self.defs {
            let seed = row.get(&def.from).cloned().unwrap_or(Value::Missing);
            working.set(def.to.clone(), seed);
        }

        let mut failures = Vec::new();
        for def in &self.defs {
            for (step, translator) in def.translators.iter().enumerate() {
                let outcome = translator.apply(&TranslateContext::new(&def.to, &working));
                match outcome {
                    Ok(value) => working.set(def.to.clone(), value),
                    Err(error) => {
                        debug!(
                            attribute = def.to.as_str(),
                            translator = translator.name(),
                            step,
                            %error,
                            "translation chain stopped, attribute degrades to missing"
                        );
                        working.set(def.to.clone(), Value::Missing);
                        failures.push(ChainFailure {
                            attr: def.to.clone(),
                            translator: translator.name().to_string(),
                            step,
                            error,
                        });
                        break;
                    }
                }
            }
        }

        Translation {
            view: working,
            failures,
        }
    }
}

/// Result of evaluating all chains over one row.
#[derive(Debug)]
pub struct Translation {
    /// Final value per declared attribute, `Missing` where a chain failed.
    pub view: AttributeView,
    /// Per-attribute failures, for diagnostics only.
    pub failures: Vec<ChainFailure>,
}

/// Diagnostic record of one stopped chain.
#[derive(Debug)]
pub struct ChainFailure {
    pub attr: AttrName,
    pub translator: String,
    pub step: usize,
    pub error: TranslateError,
}
