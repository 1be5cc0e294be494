#![deny(unsafe_code)]

//! Declarative, storable form of a job's output schema.
//!
//! An [`ImportSpec`] is the JSON-friendly description of an attribute map:
//! attribute names, optional source fields, translator references. It compiles
//! into an [`AttributeMap`] against a [`TranslatorRegistry`].

use rowsift_model::{AttrName, FieldName};
use serde::{Deserialize, Serialize};

use crate::{AttributeDef, AttributeMap, TranslateError, TranslatorRegistry};

/// One attribute declaration in storable form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeSpec {
    /// Output attribute name.
    pub to: String,
    /// Source field; defaults to the attribute name when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Translator references (`name` or `name:argument`), applied in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub translators: Vec<String>,
}

impl AttributeSpec {
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            from: None,
            translators: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    #[must_use]
    pub fn with_translator(mut self, reference: impl Into<String>) -> Self {
        self.translators.push(reference.into());
        self
    }
}

/// A complete job schema: named, with ordered attribute declarations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSpec {
    /// Job name, for diagnostics and logging.
    pub job: String,
    pub attributes: Vec<AttributeSpec>,
}

impl ImportSpec {
    pub fn new(job: impl Into<String>) -> Self {
        Self {
            job: job.into(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeSpec) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Compile into an [`AttributeMap`], resolving translator references
    /// through the registry. Unknown references degrade to identity inside
    /// the registry; only invalid names fail compilation.
    pub fn compile(&self, registry: &TranslatorRegistry) -> Result<AttributeMap, TranslateError> {
        let mut builder = AttributeMap::builder();
        for spec in &self.attributes {
            let to = AttrName::new(spec.to.clone())?;
            let mut def = AttributeDef::new(to.clone());
            if let Some(from) = &spec.from {
                def = def.with_source(FieldName::new(from.clone())?);
            }
            for reference in &spec.translators {
                def = def.with_translator(registry.resolve(reference, &to));
            }
            builder.declare(def);
        }
        Ok(builder.build())
    }
}
