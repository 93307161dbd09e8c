use crate::file::{format_size_scaled, SelectionSummary};
use crate::state::{
    AnalyzeState, FailedPhase, InputMode, SummarizeState, SummaryResult, UploadOptions,
    UploadState, WorkflowState,
};

/// Number of steps in the analyze page indicator.
pub const STEP_COUNT: usize = 3;

/// Placeholder shown in the summarizer output region when empty.
pub const SUMMARY_PLACEHOLDER: &str = "Your AI-generated summary will appear here";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

/// One slot of the step indicator (1-based index).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepView {
    pub index: usize,
    pub status: StepStatus,
}

/// The step indicator is a pure function of the workflow state (plus
/// the failed phase); re-rendering the same state is idempotent.
pub fn step_indicator(
    workflow: WorkflowState,
    failed_phase: Option<FailedPhase>,
) -> [StepView; STEP_COUNT] {
    let current = match workflow {
        WorkflowState::Idle => 1,
        WorkflowState::Ready | WorkflowState::Submitting => 2,
        WorkflowState::ExtractionDone | WorkflowState::Predicting => 3,
        // Past the last step: everything renders as completed.
        WorkflowState::Complete => STEP_COUNT + 1,
        WorkflowState::Failed => match failed_phase {
            Some(FailedPhase::Prediction) => 3,
            _ => 2,
        },
    };

    std::array::from_fn(|slot| {
        let index = slot + 1;
        let status = if index < current {
            StepStatus::Completed
        } else if index == current {
            StepStatus::Current
        } else {
            StepStatus::Upcoming
        };
        StepView { index, status }
    })
}

/// An output region that is hidden until it has content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionView {
    Hidden,
    Text(String),
    Error(String),
}

/// The topics container: labeled tags in insertion order, or an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicsView {
    Hidden,
    Topics(Vec<String>),
    Error(String),
}

/// The summarizer output region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutputView {
    Placeholder,
    Result(SummaryResult),
}

/// Read-only projection of the upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadViewModel {
    pub workflow: WorkflowState,
    pub selection_summary: Option<SelectionSummary>,
    pub options: UploadOptions,
    pub submit_enabled: bool,
    pub remove_visible: bool,
    pub status_line: Option<String>,
    pub navigate_to: Option<String>,
}

pub(crate) fn upload_view(state: &UploadState) -> UploadViewModel {
    UploadViewModel {
        workflow: state.workflow,
        selection_summary: state.selection.summary(),
        options: state.options,
        submit_enabled: matches!(
            state.workflow,
            WorkflowState::Ready | WorkflowState::Failed
        ),
        remove_visible: !state.selection.is_empty()
            && state.workflow != WorkflowState::Submitting,
        status_line: state.status_line.clone(),
        navigate_to: state.navigate_to.clone(),
    }
}

/// Read-only projection of the analyze page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeViewModel {
    pub workflow: WorkflowState,
    pub steps: [StepView; STEP_COUNT],
    pub file_label: Option<String>,
    pub extract_enabled: bool,
    pub extract_busy: bool,
    pub predict_enabled: bool,
    pub predict_busy: bool,
    pub status_line: Option<String>,
    pub extraction_region: RegionView,
    pub topics_region: TopicsView,
}

pub(crate) fn analyze_view(state: &AnalyzeState) -> AnalyzeViewModel {
    let extraction_region = if let Some(error) = &state.extract_error {
        RegionView::Error(error.clone())
    } else if let Some(text) = &state.extracted_text {
        RegionView::Text(text.clone())
    } else {
        RegionView::Hidden
    };

    let topics_region = if let Some(error) = &state.topics_error {
        TopicsView::Error(error.clone())
    } else if let Some(topics) = &state.topics {
        TopicsView::Topics(topics.clone())
    } else {
        TopicsView::Hidden
    };

    AnalyzeViewModel {
        workflow: state.workflow,
        steps: step_indicator(state.workflow, state.failed_phase),
        file_label: state.selection.first().map(|file| file.name.clone()),
        extract_enabled: state.workflow == WorkflowState::Ready
            || (state.workflow == WorkflowState::Failed
                && state.failed_phase == Some(FailedPhase::Extraction)),
        extract_busy: state.workflow == WorkflowState::Submitting,
        predict_enabled: state.workflow == WorkflowState::ExtractionDone
            || (state.workflow == WorkflowState::Failed
                && state.failed_phase == Some(FailedPhase::Prediction)),
        predict_busy: state.workflow == WorkflowState::Predicting,
        status_line: state.status_line.clone(),
        extraction_region,
        topics_region,
    }
}

/// Read-only projection of the summarizer page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizeViewModel {
    pub mode: InputMode,
    pub text: String,
    pub char_count: usize,
    pub file_label: Option<String>,
    pub busy: bool,
    pub summarize_enabled: bool,
    pub output: SummaryOutputView,
}

pub(crate) fn summarize_view(state: &SummarizeState) -> SummarizeViewModel {
    SummarizeViewModel {
        mode: state.mode,
        text: state.text.clone(),
        char_count: state.text.chars().count(),
        file_label: state
            .file
            .as_ref()
            .map(|file| format!("{} ({})", file.name, format_size_scaled(file.size_bytes))),
        busy: state.busy,
        summarize_enabled: !state.busy,
        output: match &state.output {
            Some(result) => SummaryOutputView::Result(result.clone()),
            None => SummaryOutputView::Placeholder,
        },
    }
}
