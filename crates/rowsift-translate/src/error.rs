use rowsift_model::ModelError;
use thiserror::Error;

/// A value-shaped translation failure.
///
/// Errors of this kind are caught at the chain-step boundary and degrade the
/// attribute to `Missing`; they never abort a record or a run.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("cannot parse {value:?} as an integer")]
    ParseInt { value: String },
    #[error("cannot parse {value:?} as a number")]
    ParseFloat { value: String },
    #[error("cannot parse {value:?} as a date")]
    ParseDate { value: String },
    #[error("expected text, got {found}")]
    ExpectedText { found: String },
    #[error("{0}")]
    Custom(String),
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl TranslateError {
    /// Arbitrary failure from a caller-supplied translator.
    pub fn custom(message: impl Into<String>) -> Self {
        TranslateError::Custom(message.into())
    }
}
