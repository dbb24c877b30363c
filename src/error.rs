use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShuffleError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShuffleError {
    /// A construction-time requirement was not met. Not recoverable for the value being built.
    #[error("precondition violated: {reason}")]
    PreconditionViolation { reason: String },
    /// A permutation was asked to resolve a position it does not cover. This is a caller bug.
    #[error("index {index} is outside the permutation domain 0..{len}")]
    IndexDomainViolation { index: usize, len: usize },
    #[error("replacement range {start}..{end} is outside bounds 0..{len}")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ShuffleError {
    pub(crate) fn precondition(reason: impl Into<String>) -> Self {
        ShuffleError::PreconditionViolation {
            reason: reason.into(),
        }
    }
}
