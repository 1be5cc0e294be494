#![deny(unsafe_code)]

//! The translator seam: one named value transformation over a record context.

use rowsift_model::{AttrName, AttributeView, Value};

use crate::TranslateError;

/// Working context handed to each translator in a chain.
///
/// The context exposes the chain's target attribute plus the current working
/// view: the record's raw view with every previously completed step already
/// folded in. Most translators only read [`TranslateContext::value`]; derived
/// attributes may read any other slot through [`TranslateContext::get`].
#[derive(Debug)]
pub struct TranslateContext<'a> {
    target: &'a AttrName,
    values: &'a AttributeView,
}

impl<'a> TranslateContext<'a> {
    pub fn new(target: &'a AttrName, values: &'a AttributeView) -> Self {
        Self { target, values }
    }

    /// The attribute this chain is producing.
    pub fn target(&self) -> &AttrName {
        self.target
    }

    /// Current value of the target attribute's slot.
    pub fn value(&self) -> &Value {
        self.values.get(self.target)
    }

    /// Current value of any attribute slot; absent slots read as `Missing`.
    pub fn get(&self, attr: &str) -> &Value {
        self.values.get_str(attr)
    }
}

/// One step of a translation chain.
///
/// Implementations must be pure value transformations: a returned error is a
/// data-quality signal and degrades the attribute to `Missing`, while genuine
/// programming defects should panic and are never caught.
pub trait Translator: Send + Sync {
    /// Short name used in diagnostics and chain reports.
    fn name(&self) -> &str;

    fn apply(&self, ctx: &TranslateContext<'_>) -> Result<Value, TranslateError>;
}

struct FnTranslator<F> {
    name: String,
    func: F,
}

impl<F> Translator for FnTranslator<F>
where
    F: Fn(&TranslateContext<'_>) -> Result<Value, TranslateError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, ctx: &TranslateContext<'_>) -> Result<Value, TranslateError> {
        (self.func)(ctx)
    }
}

/// Wrap a plain callable as a [`Translator`].
pub fn translator_fn<F>(name: impl Into<String>, func: F) -> Box<dyn Translator>
where
    F: Fn(&TranslateContext<'_>) -> Result<Value, TranslateError> + Send + Sync + 'static,
{
    Box::new(FnTranslator {
        name: name.into(),
        func,
    })
}
