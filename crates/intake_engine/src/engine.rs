use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use intake_logging::{intake_debug, intake_error};
use tokio_util::sync::CancellationToken;

use crate::attempt::{drive_attempt, ChannelEventSink, EventSink, RampSchedule};
use crate::upload::{ReqwestUploader, UploadSettings, Uploader};
use crate::{AttemptId, EngineEvent, EngineGone, UploadRequest};

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub upload: UploadSettings,
    pub ramp: RampSchedule,
}

enum EngineCommand {
    StartUpload(UploadRequest),
    AbandonAttempt { attempt: AttemptId },
    ScheduleHandoff { attempt: AttemptId, delay: Duration },
    Shutdown,
}

/// Runs uploads and timers on a background tokio runtime.
///
/// Commands go in through the handle; every outcome comes back as an
/// [`EngineEvent`] to be fed into the reducer.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings) -> Self {
        let uploader = Arc::new(ReqwestUploader::new(settings.upload.clone()));
        Self::with_uploader(settings, uploader)
    }

    pub fn with_uploader(settings: EngineSettings, uploader: Arc<dyn Uploader>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let ramp = settings.ramp;

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    intake_error!("cannot start tokio runtime: {}", err);
                    return;
                }
            };
            let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));
            // At most one attempt has a live ramp at a time.
            let mut active: Option<(AttemptId, CancellationToken)> = None;

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::StartUpload(request) => {
                        let token = CancellationToken::new();
                        if let Some((_, previous)) = active.replace((request.attempt, token.clone()))
                        {
                            previous.cancel();
                        }
                        let uploader = uploader.clone();
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            drive_attempt(uploader.as_ref(), request, ramp, sink.as_ref(), token)
                                .await;
                        });
                    }
                    EngineCommand::AbandonAttempt { attempt } => match &active {
                        Some((current, token)) if *current == attempt => {
                            intake_debug!("attempt {} abandoned, stopping its ramp", attempt);
                            token.cancel();
                        }
                        _ => {}
                    },
                    EngineCommand::ScheduleHandoff { attempt, delay } => {
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            tokio::time::sleep(delay).await;
                            sink.emit(EngineEvent::HandoffDue { attempt });
                        });
                    }
                    EngineCommand::Shutdown => break,
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn start_upload(&self, request: UploadRequest) {
        self.send(EngineCommand::StartUpload(request));
    }

    pub fn abandon(&self, attempt: AttemptId) {
        self.send(EngineCommand::AbandonAttempt { attempt });
    }

    pub fn schedule_handoff(&self, attempt: AttemptId, delay: Duration) {
        self.send(EngineCommand::ScheduleHandoff { attempt, delay });
    }

    /// Stops the engine thread. Pending uploads and timers are dropped and
    /// the event channel disconnects once the thread has exited.
    pub fn shutdown(&self) {
        self.send(EngineCommand::Shutdown);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event. `Ok(None)` means the wait
    /// timed out; `Err` means the engine thread is gone.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<EngineEvent>, EngineGone> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(EngineGone),
        }
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            intake_error!("engine thread is gone; command dropped");
        }
    }
}
