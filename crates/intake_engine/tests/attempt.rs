use std::sync::{Arc, Mutex};
use std::time::Duration;

use intake_engine::{
    drive_attempt, EngineEvent, EventSink, FailureKind, RampSchedule, TransmissionError,
    UploadReceipt, UploadRequest, Uploader,
};
use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Resolves after a fixed delay with a canned result.
struct DelayedUploader {
    delay: Duration,
    result: Result<UploadReceipt, TransmissionError>,
}

#[async_trait::async_trait]
impl Uploader for DelayedUploader {
    async fn upload(&self, _request: &UploadRequest) -> Result<UploadReceipt, TransmissionError> {
        tokio::time::sleep(self.delay).await;
        self.result.clone()
    }
}

fn request(attempt: u64) -> UploadRequest {
    UploadRequest {
        attempt,
        field_name: "file".to_string(),
        files: Vec::new(),
    }
}

fn receipt() -> UploadReceipt {
    UploadReceipt {
        status: 200,
        body: "{}".to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn two_ticks_then_success() {
    let uploader = DelayedUploader {
        delay: Duration::from_millis(450),
        result: Ok(receipt()),
    };
    let sink = TestSink::default();

    drive_attempt(
        &uploader,
        request(1),
        RampSchedule::default(),
        &sink,
        CancellationToken::new(),
    )
    .await;

    assert_eq!(
        sink.take(),
        vec![
            EngineEvent::RampTick { attempt: 1 },
            EngineEvent::RampTick { attempt: 1 },
            EngineEvent::UploadCompleted {
                attempt: 1,
                result: Ok(receipt()),
            },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn immediate_failure_emits_no_ticks() {
    let failure = TransmissionError {
        kind: FailureKind::Network,
        message: "connection refused".to_string(),
    };
    let uploader = DelayedUploader {
        delay: Duration::ZERO,
        result: Err(failure.clone()),
    };
    let sink = TestSink::default();

    drive_attempt(
        &uploader,
        request(2),
        RampSchedule::default(),
        &sink,
        CancellationToken::new(),
    )
    .await;

    assert_eq!(
        sink.take(),
        vec![EngineEvent::UploadCompleted {
            attempt: 2,
            result: Err(failure),
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn ramp_stops_after_reaching_ceiling() {
    let uploader = DelayedUploader {
        delay: Duration::from_secs(10),
        result: Ok(receipt()),
    };
    let sink = TestSink::default();

    drive_attempt(
        &uploader,
        request(3),
        RampSchedule::default(),
        &sink,
        CancellationToken::new(),
    )
    .await;

    let events = sink.take();
    let ticks = events
        .iter()
        .filter(|event| matches!(event, EngineEvent::RampTick { .. }))
        .count();
    assert_eq!(ticks, 9);
    assert!(matches!(
        events.last(),
        Some(EngineEvent::UploadCompleted { attempt: 3, .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn cancelled_ramp_still_reports_completion() {
    let uploader = DelayedUploader {
        delay: Duration::from_millis(1000),
        result: Ok(receipt()),
    };
    let sink = TestSink::default();
    let cancel = CancellationToken::new();

    let canceller = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            cancel.cancel();
        })
    };

    drive_attempt(&uploader, request(4), RampSchedule::default(), &sink, cancel).await;
    canceller.await.unwrap();

    let events = sink.take();
    let ticks = events
        .iter()
        .filter(|event| matches!(event, EngineEvent::RampTick { .. }))
        .count();
    assert_eq!(ticks, 2);
    assert!(matches!(
        events.last(),
        Some(EngineEvent::UploadCompleted { attempt: 4, result: Ok(_) })
    ));
}
