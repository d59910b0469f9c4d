//! Submission lifecycle.
//!
//! Progress while an upload is in flight is a simulated ramp driven by timer
//! ticks, not a measurement of bytes sent. Each tick adds a fixed step until the
//! ceiling is reached, where it holds until the request resolves. Replace the
//! ramp as a whole if real transfer progress is ever wired in.

use std::time::Duration;

use crate::{CandidateSet, SubmitRejected, TransmissionFailed};

/// Generation counter identifying one submission attempt.
pub type AttemptId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransmissionState {
    #[default]
    Idle,
    InProgress {
        progress: u8,
    },
    Succeeded,
    Failed(TransmissionFailed),
}

impl TransmissionState {
    /// Percent shown by the progress bar. Terminal states are fixed at 100 and 0.
    pub fn progress(&self) -> u8 {
        match self {
            TransmissionState::Idle | TransmissionState::Failed(_) => 0,
            TransmissionState::InProgress { progress } => *progress,
            TransmissionState::Succeeded => 100,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, TransmissionState::InProgress { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransmissionState::Succeeded | TransmissionState::Failed(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RampSettings {
    pub step_percent: u8,
    pub ceiling_percent: u8,
}

impl Default for RampSettings {
    fn default() -> Self {
        Self {
            step_percent: 10,
            ceiling_percent: 90,
        }
    }
}

impl RampSettings {
    /// Number of ticks needed to climb from 0 to the ceiling.
    pub fn ticks_to_ceiling(&self) -> u32 {
        if self.step_percent == 0 {
            return 0;
        }
        u32::from(self.ceiling_percent).div_ceil(u32::from(self.step_percent))
    }

    fn next(&self, progress: u8) -> u8 {
        if progress >= self.ceiling_percent {
            return progress;
        }
        progress
            .saturating_add(self.step_percent)
            .min(self.ceiling_percent)
    }
}

/// How a resolved attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransmissionController {
    state: TransmissionState,
    attempt: AttemptId,
    submitting: bool,
    ramp: RampSettings,
}

impl TransmissionController {
    pub fn new(ramp: RampSettings) -> Self {
        Self {
            ramp,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &TransmissionState {
        &self.state
    }

    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Starts a new attempt for `candidates`.
    pub fn begin(&mut self, candidates: &CandidateSet) -> Result<AttemptId, SubmitRejected> {
        if self.submitting || self.state.is_in_progress() {
            return Err(SubmitRejected::AttemptInProgress);
        }
        if candidates.is_empty() {
            return Err(SubmitRejected::EmptySubmission);
        }
        self.attempt += 1;
        self.state = TransmissionState::InProgress { progress: 0 };
        self.submitting = true;
        Ok(self.attempt)
    }

    /// Applies one ramp tick. Returns whether progress moved.
    pub fn advance_ramp(&mut self, attempt: AttemptId) -> bool {
        if attempt != self.attempt {
            return false;
        }
        let TransmissionState::InProgress { progress } = &self.state else {
            return false;
        };
        let progress = *progress;
        let next = self.ramp.next(progress);
        if next == progress {
            return false;
        }
        self.state = TransmissionState::InProgress { progress: next };
        true
    }

    /// Resolves the current attempt. Stale or already resolved attempts are
    /// ignored and yield `None`.
    pub fn resolve(
        &mut self,
        attempt: AttemptId,
        result: Result<u16, TransmissionFailed>,
    ) -> Option<Resolution> {
        if attempt != self.attempt || !self.state.is_in_progress() {
            return None;
        }
        let resolution = match result {
            Ok(_status) => {
                self.state = TransmissionState::Succeeded;
                Resolution::Succeeded
            }
            Err(failure) => {
                self.state = TransmissionState::Failed(failure);
                Resolution::Failed
            }
        };
        // Cleared only after the terminal state is in place.
        self.submitting = false;
        Some(resolution)
    }

    /// Drops the in-flight attempt, if any, returning its id. Its late result
    /// will no longer match an in-progress state and is discarded.
    pub fn abandon(&mut self) -> Option<AttemptId> {
        if !self.state.is_in_progress() {
            return None;
        }
        self.state = TransmissionState::Idle;
        self.submitting = false;
        Some(self.attempt)
    }

    /// Returns to `Idle` from a terminal state. Returns whether anything changed.
    pub fn clear_outcome(&mut self) -> bool {
        if !self.state.is_terminal() {
            return false;
        }
        self.state = TransmissionState::Idle;
        true
    }

    pub fn is_handoff_due(&self, attempt: AttemptId) -> bool {
        attempt == self.attempt && self.state == TransmissionState::Succeeded
    }
}

/// Delay between a successful upload and the navigation hand-off.
pub const DEFAULT_HANDOFF_DELAY: Duration = Duration::from_millis(1500);
