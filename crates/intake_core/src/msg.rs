use crate::{AttemptId, RawFile, TransmissionFailed};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Pointer carrying files entered the drop zone.
    DragEntered,
    /// Pointer carrying files moved within the drop zone.
    DragOver,
    /// Pointer left the drop zone without dropping.
    DragLeft,
    /// Files dropped on the drop zone.
    FilesDropped(Vec<RawFile>),
    /// Files chosen through the file picker.
    FilesPicked(Vec<RawFile>),
    /// User removed one staged file.
    RemoveCandidate(usize),
    /// User clicked Clear All.
    ClearCandidates,
    /// User clicked Upload.
    SubmitClicked,
    /// Ramp timer fired for an attempt.
    RampTick { attempt: AttemptId },
    /// The upload request of an attempt resolved. `Ok` carries the HTTP status.
    UploadFinished {
        attempt: AttemptId,
        result: Result<u16, TransmissionFailed>,
    },
    /// The post-success delay of an attempt elapsed.
    HandoffDue { attempt: AttemptId },
}
