use std::sync::Once;

use analyzer_core::{
    update_upload, FileCandidate, FlowError, OptionFlag, SelectionSummary, UploadAck,
    UploadEffect, UploadMsg, UploadOptions, UploadState, WorkflowState, SUBMIT_STATUS,
    UPLOAD_FAILED_STATUS,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(flow_logging::initialize_for_tests);
}

fn two_mb_png() -> FileCandidate {
    FileCandidate::new("scan.png", "image/png", 2 * 1024 * 1024)
}

fn ready_state() -> UploadState {
    let (state, effects) = update_upload(
        UploadState::default(),
        UploadMsg::FilesChosen(vec![two_mb_png()]),
    );
    assert!(effects.is_empty());
    state
}

fn narration_advanced(generation: u64, status: &str) -> UploadMsg {
    UploadMsg::NarrationAdvanced {
        generation,
        index: 0,
        status: status.to_string(),
    }
}

#[test]
fn valid_selection_moves_idle_to_ready() {
    init_logging();
    let state = ready_state();

    assert_eq!(state.workflow(), WorkflowState::Ready);
    let view = state.view();
    assert!(view.submit_enabled);
    assert_eq!(
        view.selection_summary,
        Some(SelectionSummary::Single {
            name: "scan.png".to_string(),
            size_label: "2.00 MB".to_string(),
        })
    );
}

#[test]
fn submit_issues_request_and_narration() {
    init_logging();
    let (state, effects) = update_upload(ready_state(), UploadMsg::SubmitClicked);

    assert_eq!(state.workflow(), WorkflowState::Submitting);
    let view = state.view();
    assert!(!view.submit_enabled);
    assert_eq!(view.status_line.as_deref(), Some(SUBMIT_STATUS));
    assert_eq!(
        effects,
        vec![
            UploadEffect::SubmitUpload {
                files: vec![two_mb_png()],
                options: UploadOptions::default(),
            },
            UploadEffect::BeginNarration { generation: 1 },
        ]
    );
}

#[test]
fn settlement_then_narration_completes_and_navigates() {
    init_logging();
    let (state, _) = update_upload(ready_state(), UploadMsg::SubmitClicked);

    let ack = UploadAck {
        message: Some("ok".to_string()),
        redirect_url: Some("/results".to_string()),
    };
    let (state, effects) = update_upload(state, UploadMsg::UploadSettled(Ok(ack)));
    // Narration still running: the flow must not advance yet.
    assert_eq!(state.workflow(), WorkflowState::Submitting);
    assert!(effects.is_empty());

    let (state, effects) = update_upload(state, narration_advanced(1, "Classifying topics..."));
    assert_eq!(
        state.view().status_line.as_deref(),
        Some("Classifying topics...")
    );
    assert!(effects.is_empty());

    let (state, effects) = update_upload(state, UploadMsg::NarrationFinished { generation: 1 });
    assert_eq!(state.workflow(), WorkflowState::Complete);
    assert_eq!(state.view().status_line.as_deref(), Some("ok"));
    assert_eq!(state.view().navigate_to.as_deref(), Some("/results"));
    assert_eq!(
        effects,
        vec![UploadEffect::Navigate {
            url: "/results".to_string(),
        }]
    );
}

#[test]
fn narration_then_settlement_completes_with_fallbacks() {
    init_logging();
    let (state, _) = update_upload(ready_state(), UploadMsg::SubmitClicked);

    let (state, effects) = update_upload(state, UploadMsg::NarrationFinished { generation: 1 });
    assert_eq!(state.workflow(), WorkflowState::Submitting);
    assert!(effects.is_empty());

    let (state, effects) =
        update_upload(state, UploadMsg::UploadSettled(Ok(UploadAck::default())));
    assert_eq!(state.workflow(), WorkflowState::Complete);
    assert_eq!(state.view().status_line.as_deref(), Some("Analysis complete!"));
    assert_eq!(
        effects,
        vec![UploadEffect::Navigate {
            url: "/results".to_string(),
        }]
    );
}

#[test]
fn failure_surfaces_without_waiting_for_narration() {
    init_logging();
    let (state, _) = update_upload(ready_state(), UploadMsg::SubmitClicked);

    let (state, effects) = update_upload(
        state,
        UploadMsg::UploadSettled(Err(FlowError::Transport("connection refused".to_string()))),
    );

    assert_eq!(state.workflow(), WorkflowState::Failed);
    assert_eq!(
        state.view().status_line.as_deref(),
        Some(UPLOAD_FAILED_STATUS)
    );
    // Trigger re-enabled for a manual retry.
    assert!(state.view().submit_enabled);
    assert!(effects.is_empty());

    // Stale narration events after the failure change nothing.
    let before = state.view();
    let (state, effects) = update_upload(state, UploadMsg::NarrationFinished { generation: 1 });
    assert_eq!(state.view(), before);
    assert!(effects.is_empty());
}

#[test]
fn retry_ignores_narration_from_the_aborted_attempt() {
    init_logging();
    let (state, _) = update_upload(ready_state(), UploadMsg::SubmitClicked);
    let (state, _) = update_upload(
        state,
        UploadMsg::UploadSettled(Err(FlowError::Transport("connection refused".to_string()))),
    );
    let (state, _) = update_upload(state, UploadMsg::SubmitClicked);
    assert_eq!(state.workflow(), WorkflowState::Submitting);

    // The first attempt's narration may still be running; its events
    // must not feed the second attempt's join or status line.
    let (state, _) = update_upload(state, narration_advanced(1, "stale status"));
    assert_eq!(state.view().status_line.as_deref(), Some(SUBMIT_STATUS));
    let (state, _) = update_upload(state, UploadMsg::NarrationFinished { generation: 1 });

    let (state, effects) =
        update_upload(state, UploadMsg::UploadSettled(Ok(UploadAck::default())));
    assert_eq!(state.workflow(), WorkflowState::Submitting);
    assert!(effects.is_empty());

    let (state, effects) = update_upload(state, UploadMsg::NarrationFinished { generation: 2 });
    assert_eq!(state.workflow(), WorkflowState::Complete);
    assert_eq!(
        effects,
        vec![UploadEffect::Navigate {
            url: "/results".to_string(),
        }]
    );
}

#[test]
fn oversized_selection_is_rejected_with_alert() {
    init_logging();
    let (state, effects) = update_upload(
        UploadState::default(),
        UploadMsg::FilesChosen(vec![FileCandidate::new(
            "paper.pdf",
            "application/pdf",
            12 * 1024 * 1024,
        )]),
    );

    assert_eq!(state.workflow(), WorkflowState::Idle);
    assert!(state.selection().is_empty());
    assert!(!state.view().submit_enabled);
    assert_eq!(
        effects,
        vec![UploadEffect::Alert(
            "File size must be below 10MB.".to_string()
        )]
    );
}

#[test]
fn submit_without_selection_prompts() {
    init_logging();
    let (state, effects) = update_upload(UploadState::default(), UploadMsg::SubmitClicked);

    assert_eq!(state.workflow(), WorkflowState::Idle);
    assert_eq!(
        effects,
        vec![UploadEffect::Alert(
            "Please select at least one file.".to_string()
        )]
    );
}

#[test]
fn resubmission_is_blocked_while_in_flight() {
    init_logging();
    let (state, _) = update_upload(ready_state(), UploadMsg::SubmitClicked);
    let (state, effects) = update_upload(state, UploadMsg::SubmitClicked);

    assert_eq!(state.workflow(), WorkflowState::Submitting);
    assert!(effects.is_empty());
}

#[test]
fn enabled_options_travel_with_the_request() {
    init_logging();
    let state = ready_state();
    let (state, _) = update_upload(
        state,
        UploadMsg::OptionToggled {
            flag: OptionFlag::TopicClassification,
            enabled: true,
        },
    );
    let (_state, effects) = update_upload(state, UploadMsg::SubmitClicked);

    match &effects[0] {
        UploadEffect::SubmitUpload { options, .. } => {
            assert_eq!(options.enabled_flags(), vec!["topic_classification"]);
        }
        other => panic!("expected SubmitUpload, got {other:?}"),
    }
}

#[test]
fn removal_returns_to_idle() {
    init_logging();
    let (state, effects) = update_upload(ready_state(), UploadMsg::RemoveClicked);

    assert_eq!(state.workflow(), WorkflowState::Idle);
    assert!(state.selection().is_empty());
    assert!(state.view().selection_summary.is_none());
    assert!(effects.is_empty());
}
