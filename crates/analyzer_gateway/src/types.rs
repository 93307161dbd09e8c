use std::fmt;

use serde::Deserialize;

/// Normalized outcome of a failed call. Every gateway call resolves to
/// exactly one of success-with-payload or this.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct GatewayError {
    pub kind: FailureKind,
    pub message: String,
}

impl GatewayError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The request could not be built (bad base URL, bad media type).
    InvalidRequest,
    Network,
    Timeout,
    HttpStatus(u16),
    /// The body parsed but carried neither a payload nor an error.
    MalformedResponse,
    /// The service answered with an `error` field; the message is the
    /// verbatim field value.
    Backend,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Backend => write!(f, "backend error"),
        }
    }
}

/// A file resolved to bytes, ready to become a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Analysis flags forwarded with an upload; only enabled ones are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadFlags {
    pub extract_questions: bool,
    pub difficulty_analysis: bool,
    pub topic_classification: bool,
    pub answer_suggestions: bool,
}

impl UploadFlags {
    /// Form field names of the enabled flags, in form order.
    pub fn form_fields(&self) -> Vec<&'static str> {
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

/// Acknowledgement body of `/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UploadReply {
    pub message: Option<String>,
    pub redirect_url: Option<String>,
}

/// Parsed body of `/api/summarize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryReply {
    pub summary: String,
    pub key_points: Vec<String>,
}

/// Payload for `/api/summarize`: the active input mode's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryRequest {
    Text(String),
    File(FilePayload),
}

/// Events flowing out of the gateway handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEvent {
    UploadSettled(Result<UploadReply, GatewayError>),
    ExtractSettled(Result<String, GatewayError>),
    PredictSettled(Result<Vec<String>, GatewayError>),
    SummarizeSettled(Result<SummaryReply, GatewayError>),
    /// Cosmetic narration advanced to the next status string. The
    /// generation identifies which submission started the run.
    NarrationStatus {
        generation: u64,
        index: usize,
        status: String,
    },
    /// Cosmetic narration ran out.
    NarrationFinished { generation: u64 },
}
