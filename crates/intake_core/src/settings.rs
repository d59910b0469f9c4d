use std::time::Duration;

use crate::{AcceptancePolicy, RampSettings, DEFAULT_HANDOFF_DELAY};

pub const DEFAULT_FIELD_NAME: &str = "file";

/// Everything the reducer needs to know about the deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeSettings {
    pub acceptance: AcceptancePolicy,
    pub ramp: RampSettings,
    pub handoff_delay: Duration,
    /// Multipart field name shared by every part of a submission.
    pub field_name: String,
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            acceptance: AcceptancePolicy::default(),
            ramp: RampSettings::default(),
            handoff_delay: DEFAULT_HANDOFF_DELAY,
            field_name: DEFAULT_FIELD_NAME.to_string(),
        }
    }
}
