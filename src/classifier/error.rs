use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Input failed validation before any matching was attempted
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// No class has any training samples; the caller should prompt the
    /// user to train rather than report a failed match
    #[error("no training samples available")]
    Untrained,

    /// A classification call is already in flight; this one was dropped
    #[error("classification already in flight")]
    Busy,

    /// Classifier construction failed
    #[error("Build error: {0}")]
    BuildError(String),
}
