use intake_core::{CandidateKind, IntakeViewModel, TransmissionState};

const BAR_WIDTH: usize = 20;

/// Renders the intake view as plain text lines.
pub fn render(view: &IntakeViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    if view.candidates.is_empty() {
        lines.push("No files selected".to_string());
        return lines;
    }

    lines.push(format!("Selected Files ({})", view.candidates.len()));
    for row in &view.candidates {
        let tag = match row.kind {
            CandidateKind::Document => "pdf",
            CandidateKind::Image => "img",
        };
        lines.push(format!("  [{tag}] {} ({})", row.name, row.size_label));
    }

    if let TransmissionState::InProgress { progress } = view.transmission {
        lines.push(format!(
            "Uploading... [{}] {}%",
            progress_bar(progress),
            progress
        ));
    }
    if let Some(banner) = view.banner {
        lines.push(banner.text().to_string());
    }
    lines
}

fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!("{}{}", "#".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::{update, IntakeState, Msg, PayloadHandle, RawFile};

    #[test]
    fn renders_rows_and_progress() {
        let (state, _) = update(
            IntakeState::new(),
            Msg::FilesPicked(vec![
                RawFile::new("lab.pdf", "application/pdf", 1536, PayloadHandle::new("lab.pdf")),
            ]),
        );
        let (state, effects) = update(state, Msg::SubmitClicked);
        assert_eq!(effects.len(), 1);
        let (state, _) = update(state, Msg::RampTick { attempt: 1 });

        let lines = render(&state.view());
        assert_eq!(
            lines,
            vec![
                "Selected Files (1)".to_string(),
                "  [pdf] lab.pdf (1.5 KB)".to_string(),
                "Uploading... [##                  ] 10%".to_string(),
            ]
        );
    }

    #[test]
    fn empty_view_has_placeholder() {
        assert_eq!(render(&IntakeState::new().view()), vec!["No files selected"]);
    }
}
