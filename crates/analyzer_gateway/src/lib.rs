//! Analyzer gateway: outbound HTTP calls and effect execution.
mod client;
mod handle;
mod narrate;
mod types;

pub use client::{AnalysisGateway, GatewaySettings, ReqwestGateway};
pub use handle::{GatewayCommand, GatewayHandle};
pub use narrate::{
    ChannelEventSink, EventSink, NarrationScript, NARRATION_INTERVAL, NARRATION_STATUSES,
};
pub use types::{
    FailureKind, FilePayload, GatewayError, GatewayEvent, SummaryReply, SummaryRequest,
    UploadFlags, UploadReply,
};
