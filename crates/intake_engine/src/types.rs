use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type AttemptId = u64;

/// One file to send, in the order it should appear in the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub attempt: AttemptId,
    pub field_name: String,
    pub files: Vec<UploadFile>,
}

/// A 2xx response. The body is kept for logging only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    RampTick {
        attempt: AttemptId,
    },
    UploadCompleted {
        attempt: AttemptId,
        result: Result<UploadReceipt, TransmissionError>,
    },
    HandoffDue {
        attempt: AttemptId,
    },
}

/// The engine thread has exited; no further events will arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("upload engine stopped")]
pub struct EngineGone;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransmissionError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransmissionError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    PayloadUnreadable { name: String },
    HttpStatus(u16),
    Timeout,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::PayloadUnreadable { name } => write!(f, "cannot read payload {name}"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
