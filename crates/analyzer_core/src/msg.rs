use crate::file::FileCandidate;
use crate::state::{FlowError, InputMode, OptionFlag, SummaryResult, UploadAck};

/// Events driving the upload form controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadMsg {
    /// User dropped or picked files; the whole batch replaces the
    /// current selection if it passes the policy.
    FilesChosen(Vec<FileCandidate>),
    /// User removed the current selection.
    RemoveClicked,
    /// User toggled one of the analysis option checkboxes.
    OptionToggled { flag: OptionFlag, enabled: bool },
    /// User submitted the form.
    SubmitClicked,
    /// Narration timer advanced to the next status string.
    NarrationAdvanced {
        generation: u64,
        index: usize,
        status: String,
    },
    /// Narration sequence ran out.
    NarrationFinished { generation: u64 },
    /// The `/upload` call settled.
    UploadSettled(Result<UploadAck, FlowError>),
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Events driving the extract/predict workflow controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeMsg {
    /// User dropped or picked a single file.
    FileChosen(FileCandidate),
    /// Explicit reset back to Idle.
    RemoveClicked,
    /// User triggered text extraction.
    ExtractClicked,
    /// Narration timer advanced to the next status string.
    NarrationAdvanced {
        generation: u64,
        index: usize,
        status: String,
    },
    /// Narration sequence ran out.
    NarrationFinished { generation: u64 },
    /// The `/extract_text` call settled.
    ExtractionSettled(Result<String, FlowError>),
    /// User triggered topic prediction.
    PredictClicked,
    /// The `/predict_topics` call settled.
    PredictionSettled(Result<Vec<String>, FlowError>),
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Events driving the summarizer controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizeMsg {
    /// User switched the input mode toggle.
    ModeSelected(InputMode),
    /// User edited the text input (full current value).
    TextEdited(String),
    /// User attached a file in File mode.
    FileAttached(FileCandidate),
    /// User removed the attached file.
    RemoveFileClicked,
    /// User triggered summarization.
    SummarizeClicked,
    /// The `/api/summarize` call settled.
    SummarySettled(Result<SummaryResult, FlowError>),
    /// User cleared inputs and output.
    ClearClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}
