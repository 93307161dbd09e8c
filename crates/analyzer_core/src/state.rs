use crate::file::{FileCandidate, SelectionSet};
use crate::view_model::{AnalyzeViewModel, SummarizeViewModel, UploadViewModel};

/// The discrete step a flow currently occupies.
///
/// Each flow moves through a strict forward order; backward movement
/// happens only via explicit removal/reset. The upload flow occupies
/// the subset without the extraction states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Ready,
    Submitting,
    ExtractionDone,
    Predicting,
    Complete,
    Failed,
}

/// Which request failed; decides which trigger a manual retry uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedPhase {
    Extraction,
    Prediction,
}

/// Normalized failure handed to a flow by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// Connectivity, status, or parse failure normalized by the gateway.
    Transport(String),
    /// Verbatim `error` field returned by the backend.
    Backend(String),
}

impl FlowError {
    pub fn message(&self) -> &str {
        match self {
            FlowError::Transport(message) | FlowError::Backend(message) => message,
        }
    }
}

/// Checkbox-sourced flags forwarded with an upload submission. Only
/// enabled flags appear in the outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadOptions {
    pub extract_questions: bool,
    pub difficulty_analysis: bool,
    pub topic_classification: bool,
    pub answer_suggestions: bool,
}

/// One upload option checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFlag {
    ExtractQuestions,
    DifficultyAnalysis,
    TopicClassification,
    AnswerSuggestions,
}

impl UploadOptions {
    pub(crate) fn set(&mut self, flag: OptionFlag, enabled: bool) {
        match flag {
            OptionFlag::ExtractQuestions => self.extract_questions = enabled,
            OptionFlag::DifficultyAnalysis => self.difficulty_analysis = enabled,
            OptionFlag::TopicClassification => self.topic_classification = enabled,
            OptionFlag::AnswerSuggestions => self.answer_suggestions = enabled,
        }
    }

    /// Form field names of the enabled flags, in form order.
    pub fn enabled_flags(&self) -> Vec<&'static str> {
        let all = [
            (self.extract_questions, "extract_questions"),
            (self.difficulty_analysis, "difficulty_analysis"),
            (self.topic_classification, "topic_classification"),
            (self.answer_suggestions, "answer_suggestions"),
        ];
        all.into_iter()
            .filter_map(|(enabled, field)| enabled.then_some(field))
            .collect()
    }
}

/// Acknowledgement body of an upload submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadAck {
    pub message: Option<String>,
    pub redirect_url: Option<String>,
}

/// Structured summarization result. Replaced wholesale on each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub summary: String,
    pub key_points: Vec<String>,
}

/// The active summarizer input mode. Exactly one is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Text,
    File,
}

/// Payload of a summarization submission: the active mode's data only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryInput {
    Text(String),
    File(FileCandidate),
}

/// Join bookkeeping for a request raced against the cosmetic narration.
/// The flow advances only once both have arrived; the settlement is
/// authoritative for data. Narration events carry the generation of
/// the submission that started them, so a retry never credits the
/// aborted attempt's narration to its own join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NarratedCall<T> {
    pub(crate) narration_done: bool,
    pub(crate) settled: Option<T>,
}

impl<T> Default for NarratedCall<T> {
    fn default() -> Self {
        Self {
            narration_done: false,
            settled: None,
        }
    }
}

/// Status line shown the moment a narrated submission starts.
pub const SUBMIT_STATUS: &str = "Processing OCR and extracting text...";
/// Status line for a failed upload submission.
pub const UPLOAD_FAILED_STATUS: &str = "Something went wrong. Please try again.";
/// Fallback completion message when the backend sends none.
pub const UPLOAD_DONE_STATUS: &str = "Analysis complete!";
/// Fallback navigation target when the backend sends none.
pub const DEFAULT_REDIRECT: &str = "/results";

/// Controller state for the multi-file upload form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadState {
    pub(crate) workflow: WorkflowState,
    pub(crate) selection: SelectionSet,
    pub(crate) options: UploadOptions,
    pub(crate) status_line: Option<String>,
    pub(crate) in_flight: Option<NarratedCall<Result<UploadAck, FlowError>>>,
    pub(crate) narration_gen: u64,
    pub(crate) navigate_to: Option<String>,
    pub(crate) dirty: bool,
}

impl UploadState {
    pub fn new(options: UploadOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn workflow(&self) -> WorkflowState {
        self.workflow
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn view(&self) -> UploadViewModel {
        crate::view_model::upload_view(self)
    }

    /// Returns and clears the render-needed flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

/// Controller state for the single-file extract/predict workflow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalyzeState {
    pub(crate) workflow: WorkflowState,
    pub(crate) selection: SelectionSet,
    pub(crate) extracted_text: Option<String>,
    pub(crate) extract_error: Option<String>,
    pub(crate) topics: Option<Vec<String>>,
    pub(crate) topics_error: Option<String>,
    pub(crate) status_line: Option<String>,
    pub(crate) in_flight: Option<NarratedCall<Result<String, FlowError>>>,
    pub(crate) narration_gen: u64,
    pub(crate) failed_phase: Option<FailedPhase>,
    pub(crate) dirty: bool,
}

impl AnalyzeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workflow(&self) -> WorkflowState {
        self.workflow
    }

    /// The extraction payload, once the flow has reached it.
    pub fn extracted_text(&self) -> Option<&str> {
        self.extracted_text.as_deref()
    }

    pub fn view(&self) -> AnalyzeViewModel {
        crate::view_model::analyze_view(self)
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Drops everything back to a fresh Idle controller. The narration
    /// generation survives so events from an aborted attempt stay stale.
    pub(crate) fn reset(&mut self) {
        *self = Self {
            dirty: true,
            narration_gen: self.narration_gen,
            ..Self::default()
        };
    }
}

/// Controller state for the summarizer page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SummarizeState {
    pub(crate) mode: InputMode,
    pub(crate) text: String,
    pub(crate) file: Option<FileCandidate>,
    pub(crate) busy: bool,
    pub(crate) output: Option<SummaryResult>,
    pub(crate) dirty: bool,
}

impl SummarizeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn view(&self) -> SummarizeViewModel {
        crate::view_model::summarize_view(self)
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
