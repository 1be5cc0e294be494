use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid field name: {0:?}")]
    InvalidFieldName(String),
    #[error("invalid attribute name: {0:?}")]
    InvalidAttrName(String),
    #[error("invalid filter key: {0:?}")]
    InvalidFilterKey(String),
}
