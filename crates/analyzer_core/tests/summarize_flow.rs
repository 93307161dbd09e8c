use std::sync::Once;

use analyzer_core::{
    update_summarize, FileCandidate, FlowError, InputMode, SummarizeEffect, SummarizeMsg,
    SummarizeState, SummaryInput, SummaryOutputView, SummaryResult,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(flow_logging::initialize_for_tests);
}

fn notes_pdf() -> FileCandidate {
    FileCandidate::new("notes.pdf", "application/pdf", 300 * 1024)
}

fn sample_result() -> SummaryResult {
    SummaryResult {
        summary: "Short version.".to_string(),
        key_points: vec!["one".to_string(), "two".to_string()],
    }
}

#[test]
fn empty_text_blocks_submission() {
    init_logging();
    let (state, _) = update_summarize(
        SummarizeState::new(),
        SummarizeMsg::TextEdited("   \n".to_string()),
    );
    let (state, effects) = update_summarize(state, SummarizeMsg::SummarizeClicked);

    assert!(!state.is_busy());
    assert_eq!(
        effects,
        vec![SummarizeEffect::Alert(
            "Please enter some text to summarize.".to_string()
        )]
    );
}

#[test]
fn file_mode_without_attachment_blocks_submission() {
    init_logging();
    let (state, _) = update_summarize(
        SummarizeState::new(),
        SummarizeMsg::ModeSelected(InputMode::File),
    );
    let (state, effects) = update_summarize(state, SummarizeMsg::SummarizeClicked);

    assert!(!state.is_busy());
    assert_eq!(
        effects,
        vec![SummarizeEffect::Alert(
            "Please upload a file to summarize.".to_string()
        )]
    );
}

#[test]
fn text_submission_carries_the_raw_text() {
    init_logging();
    let (state, _) = update_summarize(
        SummarizeState::new(),
        SummarizeMsg::TextEdited("lecture notes".to_string()),
    );
    let (state, effects) = update_summarize(state, SummarizeMsg::SummarizeClicked);

    assert!(state.is_busy());
    assert!(!state.view().summarize_enabled);
    assert_eq!(
        effects,
        vec![SummarizeEffect::SubmitSummary {
            input: SummaryInput::Text("lecture notes".to_string()),
        }]
    );

    let (state, effects) =
        update_summarize(state, SummarizeMsg::SummarySettled(Ok(sample_result())));
    assert!(!state.is_busy());
    assert!(effects.is_empty());
    assert_eq!(
        state.view().output,
        SummaryOutputView::Result(sample_result())
    );
}

#[test]
fn only_the_active_mode_is_submitted() {
    init_logging();
    // Both inputs populated; File mode active.
    let (state, _) = update_summarize(
        SummarizeState::new(),
        SummarizeMsg::TextEdited("ignored".to_string()),
    );
    let (state, _) = update_summarize(state, SummarizeMsg::FileAttached(notes_pdf()));
    let (state, _) = update_summarize(state, SummarizeMsg::ModeSelected(InputMode::File));
    let (_state, effects) = update_summarize(state, SummarizeMsg::SummarizeClicked);

    assert_eq!(
        effects,
        vec![SummarizeEffect::SubmitSummary {
            input: SummaryInput::File(notes_pdf()),
        }]
    );
}

#[test]
fn failure_alerts_and_keeps_prior_output() {
    init_logging();
    let (state, _) = update_summarize(
        SummarizeState::new(),
        SummarizeMsg::TextEdited("first run".to_string()),
    );
    let (state, _) = update_summarize(state, SummarizeMsg::SummarizeClicked);
    let (state, _) = update_summarize(state, SummarizeMsg::SummarySettled(Ok(sample_result())));

    let (state, _) = update_summarize(state, SummarizeMsg::SummarizeClicked);
    let (state, effects) = update_summarize(
        state,
        SummarizeMsg::SummarySettled(Err(FlowError::Transport("service down".to_string()))),
    );

    assert!(!state.is_busy());
    assert_eq!(
        effects,
        vec![SummarizeEffect::Alert("service down".to_string())]
    );
    assert_eq!(
        state.view().output,
        SummaryOutputView::Result(sample_result())
    );
}

#[test]
fn invalid_attachment_is_rejected() {
    init_logging();
    let (state, effects) = update_summarize(
        SummarizeState::new(),
        SummarizeMsg::FileAttached(FileCandidate::new("a.zip", "application/zip", 10)),
    );

    assert!(state.view().file_label.is_none());
    assert_eq!(effects.len(), 1);
}

#[test]
fn clear_resets_both_inputs_and_the_output() {
    init_logging();
    let (state, _) = update_summarize(
        SummarizeState::new(),
        SummarizeMsg::TextEdited("some text".to_string()),
    );
    let (state, _) = update_summarize(state, SummarizeMsg::FileAttached(notes_pdf()));
    let (state, _) = update_summarize(state, SummarizeMsg::ModeSelected(InputMode::File));
    let (state, _) = update_summarize(state, SummarizeMsg::SummarizeClicked);
    let (state, _) = update_summarize(state, SummarizeMsg::SummarySettled(Ok(sample_result())));

    let (state, effects) = update_summarize(state, SummarizeMsg::ClearClicked);

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.char_count, 0);
    assert!(view.text.is_empty());
    assert!(view.file_label.is_none());
    assert_eq!(view.output, SummaryOutputView::Placeholder);
    // The active mode itself is preserved.
    assert_eq!(view.mode, InputMode::File);
}

#[test]
fn resubmission_is_blocked_while_busy() {
    init_logging();
    let (state, _) = update_summarize(
        SummarizeState::new(),
        SummarizeMsg::TextEdited("text".to_string()),
    );
    let (state, _) = update_summarize(state, SummarizeMsg::SummarizeClicked);
    let (state, effects) = update_summarize(state, SummarizeMsg::SummarizeClicked);

    assert!(state.is_busy());
    assert!(effects.is_empty());
}
