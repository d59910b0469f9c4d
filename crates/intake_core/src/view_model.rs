use crate::{CandidateKind, DragState, RejectedFile, TransmissionState};

/// Outcome of the most recent selection. Diagnostic only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionStats {
    pub accepted: usize,
    pub rejected: Vec<RejectedFile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Success,
    Failure,
}

impl Banner {
    pub fn text(self) -> &'static str {
        match self {
            Banner::Success => "Files uploaded successfully! Redirecting...",
            Banner::Failure => "Upload failed. Please try again.",
        }
    }
}

/// Read-only projection handed to whatever renders the intake view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntakeViewModel {
    pub drag: DragState,
    pub candidates: Vec<CandidateRowView>,
    pub transmission: TransmissionState,
    pub progress_percent: u8,
    pub submitting: bool,
    pub can_submit: bool,
    pub submit_label: String,
    pub banner: Option<Banner>,
    pub last_selection: Option<SelectionStats>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRowView {
    pub index: usize,
    pub name: String,
    pub kind: CandidateKind,
    pub size_label: String,
}

/// Formats a byte count as `Bytes`, `KB`, `MB` or `GB` with at most two
/// decimals and no trailing zeros.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    // Ties round up, not to even.
    let rounded = (value * 100.0).round() / 100.0;
    let fixed = format!("{rounded:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

pub(crate) fn submit_label(submitting: bool, count: usize) -> String {
    if submitting {
        return "Uploading...".to_string();
    }
    let noun = if count == 1 { "File" } else { "Files" };
    format!("Upload {count} {noun}")
}

pub(crate) fn banner_for(state: &TransmissionState) -> Option<Banner> {
    match state {
        TransmissionState::Succeeded => Some(Banner::Success),
        TransmissionState::Failed(_) => Some(Banner::Failure),
        TransmissionState::Idle | TransmissionState::InProgress { .. } => None,
    }
}
