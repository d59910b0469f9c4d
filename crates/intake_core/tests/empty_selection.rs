use intake_core::{update, DragState, IntakeState, Msg};

#[test]
fn empty_selection_events_are_noop() {
    let state = IntakeState::new();
    let (next, effects) = update(state.clone(), Msg::FilesPicked(Vec::new()));

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn empty_drop_only_ends_the_hover() {
    let (state, _) = update(IntakeState::new(), Msg::DragEntered);
    let (state, effects) = update(state, Msg::FilesDropped(Vec::new()));

    assert_eq!(state.view().drag, DragState::Inactive);
    assert!(state.candidates().is_empty());
    assert!(state.view().last_selection.is_none());
    assert!(effects.is_empty());
}
