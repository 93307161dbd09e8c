use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use analyzer_core::{
    AnalyzeEffect, AnalyzeMsg, FileCandidate, FlowError, SummarizeEffect, SummarizeMsg,
    SummaryInput, SummaryResult, UploadAck, UploadEffect, UploadMsg, UploadOptions,
};
use analyzer_gateway::{
    FailureKind, FilePayload, GatewayCommand, GatewayError, GatewayEvent, GatewayHandle,
    GatewaySettings, NarrationScript, SummaryReply, SummaryRequest, UploadFlags, UploadReply,
};
use flow_logging::{flow_info, flow_warn};

use crate::render;

/// Executes flow effects against the background gateway and pumps its
/// events back into the flow's message channel.
pub struct EffectRunner {
    gateway: GatewayHandle,
}

impl EffectRunner {
    pub fn new(settings: GatewaySettings, script: NarrationScript) -> Self {
        Self {
            gateway: GatewayHandle::new(settings, script),
        }
    }

    pub fn run_upload(&self, effects: Vec<UploadEffect>, msg_tx: &mpsc::Sender<UploadMsg>) {
        for effect in effects {
            match effect {
                UploadEffect::SubmitUpload { files, options } => {
                    match resolve_payloads(&files) {
                        Ok(payloads) => {
                            flow_info!("upload: submitting {} file(s)", payloads.len());
                            self.gateway.submit(GatewayCommand::Upload {
                                files: payloads,
                                flags: map_options(options),
                            });
                        }
                        Err(message) => {
                            // Settle locally; the request never went out.
                            let _ = msg_tx
                                .send(UploadMsg::UploadSettled(Err(FlowError::Transport(message))));
                        }
                    }
                }
                UploadEffect::BeginNarration { generation } => {
                    self.gateway.submit(GatewayCommand::Narrate { generation });
                }
                UploadEffect::Navigate { url } => {
                    flow_info!("upload: navigating to {}", url);
                }
                UploadEffect::Alert(message) => render::alert(&message),
            }
        }
    }

    pub fn run_analyze(&self, effects: Vec<AnalyzeEffect>, msg_tx: &mpsc::Sender<AnalyzeMsg>) {
        for effect in effects {
            match effect {
                AnalyzeEffect::StartExtraction { file } => match resolve_payload(&file) {
                    Ok(payload) => {
                        flow_info!("analyze: extracting text from {}", payload.file_name);
                        self.gateway
                            .submit(GatewayCommand::ExtractText { file: payload });
                    }
                    Err(message) => {
                        let _ = msg_tx.send(AnalyzeMsg::ExtractionSettled(Err(
                            FlowError::Transport(message),
                        )));
                    }
                },
                AnalyzeEffect::BeginNarration { generation } => {
                    self.gateway.submit(GatewayCommand::Narrate { generation });
                }
                AnalyzeEffect::StartPrediction { text } => {
                    flow_info!("analyze: predicting topics over {} chars", text.len());
                    self.gateway.submit(GatewayCommand::PredictTopics { text });
                }
                AnalyzeEffect::Alert(message) => render::alert(&message),
            }
        }
    }

    pub fn run_summarize(&self, effects: Vec<SummarizeEffect>, msg_tx: &mpsc::Sender<SummarizeMsg>) {
        for effect in effects {
            match effect {
                SummarizeEffect::SubmitSummary { input } => {
                    let request = match input {
                        SummaryInput::Text(text) => Ok(SummaryRequest::Text(text)),
                        SummaryInput::File(file) => resolve_payload(&file).map(SummaryRequest::File),
                    };
                    match request {
                        Ok(request) => self.gateway.submit(GatewayCommand::Summarize { request }),
                        Err(message) => {
                            let _ = msg_tx.send(SummarizeMsg::SummarySettled(Err(
                                FlowError::Transport(message),
                            )));
                        }
                    }
                }
                SummarizeEffect::Alert(message) => render::alert(&message),
            }
        }
    }

    pub fn spawn_upload_pump(&self, msg_tx: mpsc::Sender<UploadMsg>) {
        self.spawn_pump(msg_tx, map_upload_event);
    }

    pub fn spawn_analyze_pump(&self, msg_tx: mpsc::Sender<AnalyzeMsg>) {
        self.spawn_pump(msg_tx, map_analyze_event);
    }

    pub fn spawn_summarize_pump(&self, msg_tx: mpsc::Sender<SummarizeMsg>) {
        self.spawn_pump(msg_tx, map_summarize_event);
    }

    fn spawn_pump<M: Send + 'static>(
        &self,
        msg_tx: mpsc::Sender<M>,
        map: fn(GatewayEvent) -> Option<M>,
    ) {
        let gateway = self.gateway.clone();
        thread::spawn(move || loop {
            if let Some(event) = gateway.try_recv() {
                if let Some(msg) = map(event) {
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

/// Reads every candidate's bytes; one unreadable file fails the batch.
fn resolve_payloads(files: &[FileCandidate]) -> Result<Vec<FilePayload>, String> {
    files.iter().map(resolve_payload).collect()
}

fn resolve_payload(file: &FileCandidate) -> Result<FilePayload, String> {
    let Some(path) = &file.path else {
        return Err(format!("{} has no local path", file.name));
    };
    let bytes = std::fs::read(path).map_err(|err| {
        flow_warn!("Failed to read {:?}: {}", path, err);
        format!("failed to read {}: {}", file.name, err)
    })?;
    Ok(FilePayload {
        file_name: file.name.clone(),
        media_type: file.media_type.clone(),
        bytes,
    })
}

fn map_options(options: UploadOptions) -> UploadFlags {
    UploadFlags {
        extract_questions: options.extract_questions,
        difficulty_analysis: options.difficulty_analysis,
        topic_classification: options.topic_classification,
        answer_suggestions: options.answer_suggestions,
    }
}

fn map_ack(reply: UploadReply) -> UploadAck {
    UploadAck {
        message: reply.message,
        redirect_url: reply.redirect_url,
    }
}

fn map_summary(reply: SummaryReply) -> SummaryResult {
    SummaryResult {
        summary: reply.summary,
        key_points: reply.key_points,
    }
}

fn map_error(error: GatewayError) -> FlowError {
    match error.kind {
        FailureKind::Backend => FlowError::Backend(error.message),
        _ => FlowError::Transport(error.message),
    }
}

fn map_upload_event(event: GatewayEvent) -> Option<UploadMsg> {
    match event {
        GatewayEvent::UploadSettled(result) => Some(UploadMsg::UploadSettled(
            result.map(map_ack).map_err(map_error),
        )),
        GatewayEvent::NarrationStatus {
            generation,
            index,
            status,
        } => Some(UploadMsg::NarrationAdvanced {
            generation,
            index,
            status,
        }),
        GatewayEvent::NarrationFinished { generation } => {
            Some(UploadMsg::NarrationFinished { generation })
        }
        _ => None,
    }
}

fn map_analyze_event(event: GatewayEvent) -> Option<AnalyzeMsg> {
    match event {
        GatewayEvent::ExtractSettled(result) => {
            Some(AnalyzeMsg::ExtractionSettled(result.map_err(map_error)))
        }
        GatewayEvent::PredictSettled(result) => {
            Some(AnalyzeMsg::PredictionSettled(result.map_err(map_error)))
        }
        GatewayEvent::NarrationStatus {
            generation,
            index,
            status,
        } => Some(AnalyzeMsg::NarrationAdvanced {
            generation,
            index,
            status,
        }),
        GatewayEvent::NarrationFinished { generation } => {
            Some(AnalyzeMsg::NarrationFinished { generation })
        }
        _ => None,
    }
}

fn map_summarize_event(event: GatewayEvent) -> Option<SummarizeMsg> {
    match event {
        GatewayEvent::SummarizeSettled(result) => Some(SummarizeMsg::SummarySettled(
            result.map(map_summary).map_err(map_error),
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_failures_keep_their_kind() {
        let error = GatewayError {
            kind: FailureKind::Backend,
            message: "no readable text".to_string(),
        };
        assert_eq!(
            map_error(error),
            FlowError::Backend("no readable text".to_string())
        );
    }

    #[test]
    fn transport_failures_collapse_to_transport() {
        for kind in [
            FailureKind::Network,
            FailureKind::Timeout,
            FailureKind::HttpStatus(500),
            FailureKind::MalformedResponse,
            FailureKind::InvalidRequest,
        ] {
            let error = GatewayError {
                kind,
                message: "boom".to_string(),
            };
            assert_eq!(map_error(error), FlowError::Transport("boom".to_string()));
        }
    }

    #[test]
    fn pathless_candidate_cannot_resolve() {
        let candidate = FileCandidate::new("scan.png", "image/png", 10);
        assert!(resolve_payload(&candidate).is_err());
    }

    #[test]
    fn summarize_pump_ignores_narration() {
        assert_eq!(
            map_summarize_event(GatewayEvent::NarrationFinished { generation: 1 }),
            None
        );
    }
}
