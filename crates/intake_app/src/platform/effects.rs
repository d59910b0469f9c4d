use std::time::Duration;

use intake_core::{Effect, Msg, TransmissionFailed, UploadPart};
use intake_engine::{EngineEvent, EngineGone, EngineHandle, UploadFile, UploadRequest};
use intake_logging::{intake_debug, intake_info};

use super::navigation::Navigator;

/// Executes reducer effects against the engine and the navigator, and turns
/// engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    navigator: Box<dyn Navigator>,
    navigated: bool,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, navigator: Box<dyn Navigator>) -> Self {
        Self {
            engine,
            navigator,
            navigated: false,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartUpload {
                    attempt,
                    field_name,
                    parts,
                } => {
                    intake_info!("StartUpload attempt={} parts={}", attempt, parts.len());
                    self.engine.start_upload(UploadRequest {
                        attempt,
                        field_name,
                        files: parts.into_iter().map(to_upload_file).collect(),
                    });
                }
                Effect::AbandonAttempt { attempt } => {
                    intake_debug!("AbandonAttempt attempt={}", attempt);
                    self.engine.abandon(attempt);
                }
                Effect::ScheduleHandoff { attempt, delay } => {
                    self.engine.schedule_handoff(attempt, delay);
                }
                Effect::NavigateNext => {
                    self.navigator.navigate_next();
                    self.navigated = true;
                }
            }
        }
    }

    pub fn navigated(&self) -> bool {
        self.navigated
    }

    /// Waits up to `timeout` for the next engine event, as a message.
    /// `Ok(None)` on timeout, `Err` once the engine thread has exited.
    pub fn next_msg(&self, timeout: Duration) -> Result<Option<Msg>, EngineGone> {
        Ok(self.engine.recv_timeout(timeout)?.map(map_event))
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }
}

fn to_upload_file(part: UploadPart) -> UploadFile {
    UploadFile {
        name: part.name,
        mime_type: part.mime_type,
        path: part.handle.path().to_path_buf(),
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::RampTick { attempt } => Msg::RampTick { attempt },
        EngineEvent::UploadCompleted { attempt, result } => Msg::UploadFinished {
            attempt,
            result: result
                .map(|receipt| receipt.status)
                .map_err(|err| TransmissionFailed::new(err.to_string())),
        },
        EngineEvent::HandoffDue { attempt } => Msg::HandoffDue { attempt },
    }
}
