use rowsift_classify::ClassifyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    /// A run result was read before any run completed. Caller-contract
    /// violation; fails immediately rather than returning empty data.
    #[error("no completed run: call execute() before reading results")]
    NotProcessed,
    /// A predicate failed; the run was aborted.
    #[error(transparent)]
    Classify(#[from] ClassifyError),
}
