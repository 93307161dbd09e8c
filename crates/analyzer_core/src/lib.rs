//! Analyzer core: pure workflow state machines and view-model helpers.
mod effect;
mod file;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::{AnalyzeEffect, SummarizeEffect, UploadEffect};
pub use file::{
    format_size_mb, format_size_scaled, FileCandidate, SelectionSet, SelectionSummary,
};
pub use msg::{AnalyzeMsg, SummarizeMsg, UploadMsg};
pub use state::{
    AnalyzeState, FailedPhase, FlowError, InputMode, OptionFlag, SummarizeState, SummaryInput,
    SummaryResult, UploadAck, UploadOptions, UploadState, WorkflowState, DEFAULT_REDIRECT,
    SUBMIT_STATUS, UPLOAD_DONE_STATUS, UPLOAD_FAILED_STATUS,
};
pub use update::{update_analyze, update_summarize, update_upload};
pub use validate::{
    is_media_type_allowed, validate_selection, SelectionError, ALLOWED_MEDIA_TYPES,
    MAX_FILE_BYTES,
};
pub use view_model::{
    step_indicator, AnalyzeViewModel, RegionView, StepStatus, StepView, SummarizeViewModel,
    SummaryOutputView, TopicsView, UploadViewModel, STEP_COUNT, SUMMARY_PLACEHOLDER,
};
