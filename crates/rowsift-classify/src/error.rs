use rowsift_model::FilterKey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// A predicate failed while classifying a record.
    ///
    /// Unlike translator failures, this is a configuration or programming
    /// defect: it propagates uncaught and aborts the run.
    #[error("filter {key} failed while classifying a record")]
    Predicate {
        key: FilterKey,
        #[source]
        source: anyhow::Error,
    },
}
