//! Intake engine: file probing, multipart upload and attempt timers.
mod attempt;
mod engine;
mod probe;
mod types;
mod upload;

pub use attempt::{drive_attempt, ChannelEventSink, EventSink, RampSchedule};
pub use engine::{EngineHandle, EngineSettings};
pub use probe::{probe_file, probe_files, ProbeError, ProbedFile};
pub use types::{
    AttemptId, EngineEvent, EngineGone, FailureKind, TransmissionError, UploadFile,
    UploadReceipt, UploadRequest,
};
pub use upload::{ReqwestUploader, UploadSettings, Uploader};
