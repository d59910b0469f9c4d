use std::time::Duration;

use crate::{AttemptId, PayloadHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send one multipart request and start the progress ramp for it.
    StartUpload {
        attempt: AttemptId,
        field_name: String,
        parts: Vec<UploadPart>,
    },
    /// Stop the ramp of an attempt whose result will be ignored. The request
    /// itself keeps running.
    AbandonAttempt { attempt: AttemptId },
    /// Report `Msg::HandoffDue` for `attempt` after `delay`.
    ScheduleHandoff { attempt: AttemptId, delay: Duration },
    /// Hand control to the next view.
    NavigateNext,
}

/// One multipart part, in candidate order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPart {
    pub name: String,
    pub mime_type: String,
    pub handle: PayloadHandle,
}
