use crate::file::FileCandidate;
use crate::state::{SummaryInput, UploadOptions};

/// Side effects requested by the upload controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEffect {
    /// Issue the multipart `/upload` request.
    SubmitUpload {
        files: Vec<FileCandidate>,
        options: UploadOptions,
    },
    /// Start the timed status narration for this submission.
    BeginNarration { generation: u64 },
    /// Leave the page for the result view.
    Navigate { url: String },
    /// Blocking prompt for a locally rejected action.
    Alert(String),
}

/// Side effects requested by the analyze controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeEffect {
    /// Issue the multipart `/extract_text` request.
    StartExtraction { file: FileCandidate },
    /// Start the timed status narration for this submission.
    BeginNarration { generation: u64 },
    /// Issue the `/predict_topics` request.
    StartPrediction { text: String },
    /// Blocking prompt for a locally rejected action.
    Alert(String),
}

/// Side effects requested by the summarize controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizeEffect {
    /// Issue the `/api/summarize` request with the active mode's data.
    SubmitSummary { input: SummaryInput },
    /// Blocking prompt for a locally rejected action.
    Alert(String),
}
