use crate::{DragState, Effect, IntakeState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: IntakeState, msg: Msg) -> (IntakeState, Vec<Effect>) {
    let effects = match msg {
        Msg::DragEntered | Msg::DragOver => {
            state.set_drag(DragState::Hovering);
            Vec::new()
        }
        Msg::DragLeft => {
            state.set_drag(DragState::Inactive);
            Vec::new()
        }
        Msg::FilesDropped(files) => {
            state.set_drag(DragState::Inactive);
            select(&mut state, files)
        }
        Msg::FilesPicked(files) => select(&mut state, files),
        Msg::RemoveCandidate(index) => state.remove_candidate(index),
        Msg::ClearCandidates => state.clear_candidates(),
        Msg::SubmitClicked => match state.submit() {
            Ok(effect) => vec![effect],
            Err(_rejected) => Vec::new(),
        },
        Msg::RampTick { attempt } => {
            state.ramp_tick(attempt);
            Vec::new()
        }
        Msg::UploadFinished { attempt, result } => state.finish_upload(attempt, result),
        Msg::HandoffDue { attempt } => state.handoff(attempt),
    };

    (state, effects)
}

fn select(state: &mut IntakeState, files: Vec<crate::RawFile>) -> Vec<Effect> {
    // A selection event without files leaves the staged set alone.
    if files.is_empty() {
        return Vec::new();
    }
    state.select(files)
}
