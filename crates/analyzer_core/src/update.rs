use crate::effect::{AnalyzeEffect, SummarizeEffect, UploadEffect};
use crate::msg::{AnalyzeMsg, SummarizeMsg, UploadMsg};
use crate::state::{
    AnalyzeState, FailedPhase, FlowError, InputMode, NarratedCall, SummarizeState,
    SummaryInput, UploadAck, UploadState, WorkflowState, DEFAULT_REDIRECT, SUBMIT_STATUS,
    UPLOAD_DONE_STATUS, UPLOAD_FAILED_STATUS,
};
use crate::validate::validate_selection;

/// Pure update for the upload form: applies a message to state and
/// returns any effects. Re-entrant triggers are rejected here, mirroring
/// the disabled controls in the view.
pub fn update_upload(mut state: UploadState, msg: UploadMsg) -> (UploadState, Vec<UploadEffect>) {
    let effects = match msg {
        UploadMsg::FilesChosen(candidates) => {
            if candidates.is_empty() || state.workflow == WorkflowState::Submitting {
                return (state, Vec::new());
            }
            match validate_selection(candidates) {
                Ok(selection) => {
                    state.selection = selection;
                    state.workflow = WorkflowState::Ready;
                    state.status_line = None;
                    state.navigate_to = None;
                    state.mark_dirty();
                    Vec::new()
                }
                // Atomic rejection: the previous selection stands.
                Err(err) => vec![UploadEffect::Alert(err.prompt().to_string())],
            }
        }
        UploadMsg::RemoveClicked => {
            if state.workflow == WorkflowState::Submitting {
                return (state, Vec::new());
            }
            if state.workflow == WorkflowState::Idle && state.selection.is_empty() {
                return (state, Vec::new());
            }
            state.selection = crate::SelectionSet::empty();
            state.workflow = WorkflowState::Idle;
            state.status_line = None;
            state.navigate_to = None;
            state.in_flight = None;
            state.mark_dirty();
            Vec::new()
        }
        UploadMsg::OptionToggled { flag, enabled } => {
            if state.workflow == WorkflowState::Submitting {
                return (state, Vec::new());
            }
            state.options.set(flag, enabled);
            state.mark_dirty();
            Vec::new()
        }
        UploadMsg::SubmitClicked => match state.workflow {
            WorkflowState::Ready | WorkflowState::Failed => {
                state.workflow = WorkflowState::Submitting;
                state.status_line = Some(SUBMIT_STATUS.to_string());
                state.in_flight = Some(NarratedCall::default());
                state.narration_gen += 1;
                state.navigate_to = None;
                state.mark_dirty();
                vec![
                    UploadEffect::SubmitUpload {
                        files: state.selection.files().to_vec(),
                        options: state.options,
                    },
                    UploadEffect::BeginNarration {
                        generation: state.narration_gen,
                    },
                ]
            }
            WorkflowState::Idle => {
                vec![UploadEffect::Alert(
                    "Please select at least one file.".to_string(),
                )]
            }
            _ => Vec::new(),
        },
        UploadMsg::NarrationAdvanced {
            generation, status, ..
        } => {
            if generation != state.narration_gen
                || state.workflow != WorkflowState::Submitting
                || state.in_flight.is_none()
            {
                return (state, Vec::new());
            }
            state.status_line = Some(status);
            state.mark_dirty();
            Vec::new()
        }
        UploadMsg::NarrationFinished { generation } => {
            if generation != state.narration_gen || state.workflow != WorkflowState::Submitting {
                return (state, Vec::new());
            }
            let Some(mut call) = state.in_flight.take() else {
                return (state, Vec::new());
            };
            call.narration_done = true;
            match call.settled.take() {
                Some(result) => settle_upload(&mut state, result),
                None => {
                    state.in_flight = Some(call);
                    Vec::new()
                }
            }
        }
        UploadMsg::UploadSettled(result) => {
            if state.workflow != WorkflowState::Submitting {
                return (state, Vec::new());
            }
            let Some(mut call) = state.in_flight.take() else {
                return (state, Vec::new());
            };
            // Failures never wait on the cosmetic narration.
            if result.is_err() || call.narration_done {
                settle_upload(&mut state, result)
            } else {
                call.settled = Some(result);
                state.in_flight = Some(call);
                Vec::new()
            }
        }
        UploadMsg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn settle_upload(
    state: &mut UploadState,
    result: Result<UploadAck, FlowError>,
) -> Vec<UploadEffect> {
    state.in_flight = None;
    state.mark_dirty();
    match result {
        Ok(ack) => {
            state.workflow = WorkflowState::Complete;
            state.status_line = Some(
                ack.message
                    .unwrap_or_else(|| UPLOAD_DONE_STATUS.to_string()),
            );
            let url = ack
                .redirect_url
                .unwrap_or_else(|| DEFAULT_REDIRECT.to_string());
            state.navigate_to = Some(url.clone());
            vec![UploadEffect::Navigate { url }]
        }
        Err(_) => {
            state.workflow = WorkflowState::Failed;
            state.status_line = Some(UPLOAD_FAILED_STATUS.to_string());
            Vec::new()
        }
    }
}

/// Pure update for the extract/predict workflow.
pub fn update_analyze(
    mut state: AnalyzeState,
    msg: AnalyzeMsg,
) -> (AnalyzeState, Vec<AnalyzeEffect>) {
    let effects = match msg {
        AnalyzeMsg::FileChosen(candidate) => {
            if request_in_flight(state.workflow) {
                return (state, Vec::new());
            }
            match validate_selection(vec![candidate]) {
                Ok(selection) => {
                    // A new file restarts the workflow from Ready.
                    state.reset();
                    state.selection = selection;
                    state.workflow = WorkflowState::Ready;
                    Vec::new()
                }
                Err(err) => vec![AnalyzeEffect::Alert(err.prompt().to_string())],
            }
        }
        AnalyzeMsg::RemoveClicked => {
            if request_in_flight(state.workflow) {
                return (state, Vec::new());
            }
            if state.workflow == WorkflowState::Idle && state.selection.is_empty() {
                return (state, Vec::new());
            }
            state.reset();
            Vec::new()
        }
        AnalyzeMsg::ExtractClicked => {
            let retrying = state.workflow == WorkflowState::Failed
                && state.failed_phase == Some(FailedPhase::Extraction);
            if state.workflow != WorkflowState::Ready && !retrying {
                return (state, Vec::new());
            }
            let Some(file) = state.selection.first().cloned() else {
                return (state, Vec::new());
            };
            state.workflow = WorkflowState::Submitting;
            state.status_line = Some(SUBMIT_STATUS.to_string());
            state.extract_error = None;
            state.failed_phase = None;
            state.in_flight = Some(NarratedCall::default());
            state.narration_gen += 1;
            state.mark_dirty();
            vec![
                AnalyzeEffect::StartExtraction { file },
                AnalyzeEffect::BeginNarration {
                    generation: state.narration_gen,
                },
            ]
        }
        AnalyzeMsg::NarrationAdvanced {
            generation, status, ..
        } => {
            if generation != state.narration_gen
                || state.workflow != WorkflowState::Submitting
                || state.in_flight.is_none()
            {
                return (state, Vec::new());
            }
            state.status_line = Some(status);
            state.mark_dirty();
            Vec::new()
        }
        AnalyzeMsg::NarrationFinished { generation } => {
            if generation != state.narration_gen || state.workflow != WorkflowState::Submitting {
                return (state, Vec::new());
            }
            let Some(mut call) = state.in_flight.take() else {
                return (state, Vec::new());
            };
            call.narration_done = true;
            match call.settled.take() {
                Some(result) => {
                    settle_extraction(&mut state, result);
                    Vec::new()
                }
                None => {
                    state.in_flight = Some(call);
                    Vec::new()
                }
            }
        }
        AnalyzeMsg::ExtractionSettled(result) => {
            if state.workflow != WorkflowState::Submitting {
                return (state, Vec::new());
            }
            let Some(mut call) = state.in_flight.take() else {
                return (state, Vec::new());
            };
            if result.is_err() || call.narration_done {
                settle_extraction(&mut state, result);
            } else {
                call.settled = Some(result);
                state.in_flight = Some(call);
            }
            Vec::new()
        }
        AnalyzeMsg::PredictClicked => {
            let retrying = state.workflow == WorkflowState::Failed
                && state.failed_phase == Some(FailedPhase::Prediction);
            if state.workflow != WorkflowState::ExtractionDone && !retrying {
                return (state, Vec::new());
            }
            let Some(text) = state.extracted_text.clone() else {
                return (state, Vec::new());
            };
            state.workflow = WorkflowState::Predicting;
            state.topics_error = None;
            state.failed_phase = None;
            state.mark_dirty();
            vec![AnalyzeEffect::StartPrediction { text }]
        }
        AnalyzeMsg::PredictionSettled(result) => {
            if state.workflow != WorkflowState::Predicting {
                return (state, Vec::new());
            }
            state.mark_dirty();
            match result {
                Ok(topics) => {
                    state.workflow = WorkflowState::Complete;
                    state.topics = Some(topics);
                    state.topics_error = None;
                }
                // A backend error renders verbatim and keeps the flow at
                // ExtractionDone; only transport failures reach Failed.
                Err(FlowError::Backend(message)) => {
                    state.workflow = WorkflowState::ExtractionDone;
                    state.topics_error = Some(message);
                }
                Err(FlowError::Transport(message)) => {
                    state.workflow = WorkflowState::Failed;
                    state.failed_phase = Some(FailedPhase::Prediction);
                    state.topics_error = Some(message);
                }
            }
            Vec::new()
        }
        AnalyzeMsg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn request_in_flight(workflow: WorkflowState) -> bool {
    matches!(
        workflow,
        WorkflowState::Submitting | WorkflowState::Predicting
    )
}

fn settle_extraction(state: &mut AnalyzeState, result: Result<String, FlowError>) {
    state.in_flight = None;
    state.status_line = None;
    state.mark_dirty();
    match result {
        Ok(text) => {
            state.workflow = WorkflowState::ExtractionDone;
            state.extracted_text = Some(text);
            state.extract_error = None;
            state.failed_phase = None;
        }
        Err(err) => {
            state.workflow = WorkflowState::Failed;
            state.failed_phase = Some(FailedPhase::Extraction);
            state.extract_error = Some(err.message().to_string());
        }
    }
}

/// Pure update for the summarizer.
pub fn update_summarize(
    mut state: SummarizeState,
    msg: SummarizeMsg,
) -> (SummarizeState, Vec<SummarizeEffect>) {
    let effects = match msg {
        SummarizeMsg::ModeSelected(mode) => {
            if state.mode != mode {
                state.mode = mode;
                state.mark_dirty();
            }
            Vec::new()
        }
        SummarizeMsg::TextEdited(text) => {
            state.text = text;
            state.mark_dirty();
            Vec::new()
        }
        SummarizeMsg::FileAttached(candidate) => match validate_selection(vec![candidate]) {
            Ok(selection) => {
                state.file = selection.first().cloned();
                state.mark_dirty();
                Vec::new()
            }
            Err(err) => vec![SummarizeEffect::Alert(err.prompt().to_string())],
        },
        SummarizeMsg::RemoveFileClicked => {
            if state.file.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        SummarizeMsg::SummarizeClicked => {
            if state.busy {
                return (state, Vec::new());
            }
            let input = match state.mode {
                InputMode::Text => {
                    if state.text.trim().is_empty() {
                        return (
                            state,
                            vec![SummarizeEffect::Alert(
                                "Please enter some text to summarize.".to_string(),
                            )],
                        );
                    }
                    SummaryInput::Text(state.text.clone())
                }
                InputMode::File => match state.file.clone() {
                    Some(file) => SummaryInput::File(file),
                    None => {
                        return (
                            state,
                            vec![SummarizeEffect::Alert(
                                "Please upload a file to summarize.".to_string(),
                            )],
                        );
                    }
                },
            };
            state.busy = true;
            state.mark_dirty();
            vec![SummarizeEffect::SubmitSummary { input }]
        }
        SummarizeMsg::SummarySettled(result) => {
            if !state.busy {
                return (state, Vec::new());
            }
            state.busy = false;
            state.mark_dirty();
            match result {
                Ok(summary) => {
                    state.output = Some(summary);
                    Vec::new()
                }
                // Prior output stays untouched on failure.
                Err(err) => vec![SummarizeEffect::Alert(err.message().to_string())],
            }
        }
        SummarizeMsg::ClearClicked => {
            state.text.clear();
            state.file = None;
            state.output = None;
            state.mark_dirty();
            Vec::new()
        }
        SummarizeMsg::NoOp => Vec::new(),
    };

    (state, effects)
}
