//! One submission attempt: the progress ramp timer and the upload request run
//! side by side and are torn down together when the request resolves.
//!
//! Ramp ticks carry no information about bytes sent. They only pace the
//! simulated progress bar.

use std::time::Duration;

use intake_logging::{intake_info, intake_warn};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, UploadRequest, Uploader};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Pacing of ramp ticks for one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RampSchedule {
    pub interval: Duration,
    /// Ticks after which the ramp has reached its ceiling and stops firing.
    pub max_ticks: u32,
}

/// `max_ticks` must equal `RampSettings::default().ticks_to_ceiling()` in
/// `intake_core` (a 10 percent step up to 90). Deployments built from a config
/// file derive it from the configured step and ceiling instead.
impl Default for RampSchedule {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(200),
            max_ticks: 9,
        }
    }
}

/// Runs one attempt to completion, emitting `RampTick`s while the request is
/// in flight and a single `UploadCompleted` at the end.
///
/// Cancelling `ramp_cancel` silences the ramp only; the request still runs and
/// its completion is still reported.
pub async fn drive_attempt(
    uploader: &dyn Uploader,
    request: UploadRequest,
    ramp: RampSchedule,
    sink: &dyn EventSink,
    ramp_cancel: CancellationToken,
) {
    let attempt = request.attempt;
    intake_info!(
        "attempt {} uploading {} file(s) as {:?}",
        attempt,
        request.files.len(),
        request.field_name
    );

    let period = ramp.interval.max(Duration::from_millis(1));
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks = 0u32;
    let mut ramp_live = ramp.max_ticks > 0 && !ramp.interval.is_zero();

    let upload = uploader.upload(&request);
    tokio::pin!(upload);

    let result = loop {
        tokio::select! {
            biased;
            result = &mut upload => break result,
            _ = ramp_cancel.cancelled(), if ramp_live => {
                ramp_live = false;
            }
            _ = ticker.tick(), if ramp_live => {
                ticks += 1;
                sink.emit(EngineEvent::RampTick { attempt });
                if ticks >= ramp.max_ticks {
                    ramp_live = false;
                }
            }
        }
    };

    match &result {
        Ok(receipt) => intake_info!(
            "attempt {} delivered (status {}): {}",
            attempt,
            receipt.status,
            receipt.body
        ),
        Err(err) => intake_warn!("attempt {} failed: {}", attempt, err),
    }
    sink.emit(EngineEvent::UploadCompleted { attempt, result });
}
