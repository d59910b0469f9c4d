use crate::view_model::{self, CandidateRowView, IntakeViewModel, SelectionStats};
use crate::{
    AttemptId, CandidateSet, DragState, Effect, IntakeSettings, RawFile, Resolution,
    SubmitRejected, TransmissionController, TransmissionFailed, UploadPart,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntakeState {
    settings: IntakeSettings,
    candidates: CandidateSet,
    controller: TransmissionController,
    drag: DragState,
    last_selection: Option<SelectionStats>,
    dirty: bool,
}

impl IntakeState {
    pub fn new() -> Self {
        Self::with_settings(IntakeSettings::default())
    }

    pub fn with_settings(settings: IntakeSettings) -> Self {
        Self {
            controller: TransmissionController::new(settings.ramp),
            settings,
            ..Self::default()
        }
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn controller(&self) -> &TransmissionController {
        &self.controller
    }

    pub fn view(&self) -> IntakeViewModel {
        let transmission = self.controller.state().clone();
        let submitting = self.controller.is_submitting();
        IntakeViewModel {
            drag: self.drag,
            candidates: self
                .candidates
                .iter()
                .enumerate()
                .map(|(index, candidate)| CandidateRowView {
                    index,
                    name: candidate.name().to_string(),
                    kind: candidate.kind(),
                    size_label: view_model::format_file_size(candidate.size_bytes()),
                })
                .collect(),
            progress_percent: transmission.progress(),
            can_submit: !submitting && !self.candidates.is_empty(),
            submit_label: view_model::submit_label(submitting, self.candidates.len()),
            banner: view_model::banner_for(&transmission),
            transmission,
            submitting,
            last_selection: self.last_selection.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_drag(&mut self, drag: DragState) {
        if self.drag != drag {
            self.drag = drag;
            self.mark_dirty();
        }
    }

    /// Replaces the staged set with the valid subset of `files`.
    pub(crate) fn select(&mut self, files: Vec<RawFile>) -> Vec<Effect> {
        let selection = self.settings.acceptance.accept(files);
        self.last_selection = Some(SelectionStats {
            accepted: selection.accepted.len(),
            rejected: selection.rejected,
        });

        let effects = self.reset_transmission();
        self.candidates.replace_all(selection.accepted);
        self.mark_dirty();
        effects
    }

    pub(crate) fn remove_candidate(&mut self, index: usize) -> Vec<Effect> {
        if !self.candidates.remove_at(index) {
            return Vec::new();
        }
        self.mark_dirty();
        if self.candidates.is_empty() {
            self.reset_transmission()
        } else {
            Vec::new()
        }
    }

    pub(crate) fn clear_candidates(&mut self) -> Vec<Effect> {
        let had_entries = !self.candidates.is_empty();
        self.candidates.clear();
        let effects = self.reset_transmission();
        if had_entries || !effects.is_empty() {
            self.mark_dirty();
        }
        effects
    }

    pub(crate) fn submit(&mut self) -> Result<Effect, SubmitRejected> {
        let attempt = self.controller.begin(&self.candidates)?;
        self.mark_dirty();
        let parts = self
            .candidates
            .iter()
            .map(|candidate| UploadPart {
                name: candidate.name().to_string(),
                mime_type: candidate.mime_type().to_string(),
                handle: candidate.handle().clone(),
            })
            .collect();
        Ok(Effect::StartUpload {
            attempt,
            field_name: self.settings.field_name.clone(),
            parts,
        })
    }

    pub(crate) fn ramp_tick(&mut self, attempt: AttemptId) {
        if self.controller.advance_ramp(attempt) {
            self.mark_dirty();
        }
    }

    pub(crate) fn finish_upload(
        &mut self,
        attempt: AttemptId,
        result: Result<u16, TransmissionFailed>,
    ) -> Vec<Effect> {
        match self.controller.resolve(attempt, result) {
            Some(Resolution::Succeeded) => {
                self.mark_dirty();
                vec![Effect::ScheduleHandoff {
                    attempt,
                    delay: self.settings.handoff_delay,
                }]
            }
            Some(Resolution::Failed) => {
                self.mark_dirty();
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    pub(crate) fn handoff(&mut self, attempt: AttemptId) -> Vec<Effect> {
        if !self.controller.is_handoff_due(attempt) {
            return Vec::new();
        }
        self.candidates.clear();
        self.controller.clear_outcome();
        self.mark_dirty();
        vec![Effect::NavigateNext]
    }

    /// Returns the transmission to `Idle`, abandoning an in-flight attempt.
    fn reset_transmission(&mut self) -> Vec<Effect> {
        if let Some(attempt) = self.controller.abandon() {
            self.mark_dirty();
            return vec![Effect::AbandonAttempt { attempt }];
        }
        if self.controller.clear_outcome() {
            self.mark_dirty();
        }
        Vec::new()
    }
}
