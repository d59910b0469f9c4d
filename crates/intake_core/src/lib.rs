//! Intake core: pure state machine for staging and submitting documents.
mod acceptor;
mod candidates;
mod effect;
mod error;
mod msg;
mod settings;
mod state;
mod transmission;
mod update;
mod view_model;

pub use acceptor::{
    normalize_mime_type, AcceptancePolicy, DragState, RejectedFile, Selection,
    DEFAULT_ACCEPTED_MIME_TYPES, DEFAULT_MAX_FILE_SIZE_BYTES,
};
pub use candidates::{Candidate, CandidateKind, CandidateSet, PayloadHandle, RawFile};
pub use effect::{Effect, UploadPart};
pub use error::{SubmitRejected, TransmissionFailed, ValidationRejected};
pub use msg::Msg;
pub use settings::{IntakeSettings, DEFAULT_FIELD_NAME};
pub use state::IntakeState;
pub use transmission::{
    AttemptId, RampSettings, Resolution, TransmissionController, TransmissionState,
    DEFAULT_HANDOFF_DELAY,
};
pub use update::update;
pub use view_model::{format_file_size, Banner, CandidateRowView, IntakeViewModel, SelectionStats};
