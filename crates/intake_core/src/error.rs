use thiserror::Error;

/// Why a file was left out of a selection. Absorbed by the acceptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationRejected {
    #[error("unsupported type {mime_type:?}")]
    UnsupportedType { mime_type: String },
    #[error("file too large ({size_bytes} bytes, max {max_bytes})")]
    TooLarge { size_bytes: u64, max_bytes: u64 },
}

/// A submission attempt ended without a 2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transmission failed: {reason}")]
pub struct TransmissionFailed {
    pub reason: String,
}

impl TransmissionFailed {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A submit request that was guarded out. Neither case changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("nothing to submit")]
    EmptySubmission,
    #[error("an upload is already in progress")]
    AttemptInProgress,
}
