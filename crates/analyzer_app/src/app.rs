//! One-shot drivers for the three flows.
//!
//! Each driver seeds the flow with the gestures a page would produce
//! (choose files, click submit), then runs the message loop until the
//! flow reaches a terminal state: receive a message, apply the pure
//! update, execute effects, re-render when the state marked itself
//! dirty.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use analyzer_core::{
    update_analyze, update_summarize, update_upload, AnalyzeMsg, AnalyzeState, InputMode,
    RegionView, SummarizeMsg, SummarizeState, TopicsView, UploadMsg, UploadOptions, UploadState,
    WorkflowState,
};
use flow_logging::flow_info;

use crate::config::AppConfig;
use crate::media::candidate_from_path;
use crate::render;
use crate::runner::EffectRunner;

pub fn run_upload(
    config: &AppConfig,
    paths: &[PathBuf],
    options: UploadOptions,
) -> anyhow::Result<()> {
    anyhow::ensure!(!paths.is_empty(), "no files given");
    let candidates = paths
        .iter()
        .map(|path| candidate_from_path(path))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let (msg_tx, msg_rx) = mpsc::channel();
    let runner = EffectRunner::new(config.gateway_settings(), config.narration_script());
    runner.spawn_upload_pump(msg_tx.clone());

    let mut state = UploadState::new(options);
    let _ = msg_tx.send(UploadMsg::FilesChosen(candidates));
    let _ = msg_tx.send(UploadMsg::SubmitClicked);

    loop {
        let msg = msg_rx.recv()?;
        let submit_trigger = matches!(msg, UploadMsg::SubmitClicked);

        let (next, effects) = update_upload(state, msg);
        state = next;
        runner.run_upload(effects, &msg_tx);
        if state.consume_dirty() {
            render::print_lines(&render::upload_lines(&state.view()));
        }

        if submit_trigger && state.workflow() != WorkflowState::Submitting {
            anyhow::bail!("upload was not submitted");
        }
        match state.workflow() {
            WorkflowState::Complete => {
                flow_info!("upload complete");
                return Ok(());
            }
            WorkflowState::Failed => anyhow::bail!("upload failed"),
            _ => {}
        }
    }
}

pub fn run_analyze(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let candidate = candidate_from_path(path)?;

    let (msg_tx, msg_rx) = mpsc::channel();
    let runner = EffectRunner::new(config.gateway_settings(), config.narration_script());
    runner.spawn_analyze_pump(msg_tx.clone());

    let mut state = AnalyzeState::new();
    let _ = msg_tx.send(AnalyzeMsg::FileChosen(candidate));
    let _ = msg_tx.send(AnalyzeMsg::ExtractClicked);
    let mut predict_sent = false;

    loop {
        let msg = msg_rx.recv()?;
        let extract_trigger = matches!(msg, AnalyzeMsg::ExtractClicked);

        let (next, effects) = update_analyze(state, msg);
        state = next;
        runner.run_analyze(effects, &msg_tx);
        if state.consume_dirty() {
            render::print_lines(&render::analyze_lines(&state.view()));
        }

        if extract_trigger && state.workflow() != WorkflowState::Submitting {
            anyhow::bail!("extraction was not started");
        }
        match state.workflow() {
            // Extraction landed: chain straight into prediction, once.
            WorkflowState::ExtractionDone if !predict_sent => {
                predict_sent = true;
                let _ = msg_tx.send(AnalyzeMsg::PredictClicked);
            }
            WorkflowState::ExtractionDone => {
                if let TopicsView::Error(message) = state.view().topics_region {
                    anyhow::bail!("topic prediction failed: {}", message);
                }
            }
            WorkflowState::Complete => {
                flow_info!("analysis complete");
                return Ok(());
            }
            WorkflowState::Failed => {
                let view = state.view();
                if let RegionView::Error(message) = view.extraction_region {
                    anyhow::bail!("text extraction failed: {}", message);
                }
                if let TopicsView::Error(message) = view.topics_region {
                    anyhow::bail!("topic prediction failed: {}", message);
                }
                anyhow::bail!("analysis failed");
            }
            _ => {}
        }
    }
}

/// What the summarize subcommand was given on the command line.
pub enum SummarizeSource {
    Text(String),
    File(PathBuf),
}

pub fn run_summarize(config: &AppConfig, source: SummarizeSource) -> anyhow::Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel();
    let runner = EffectRunner::new(config.gateway_settings(), config.narration_script());
    runner.spawn_summarize_pump(msg_tx.clone());

    let mut state = SummarizeState::new();
    match source {
        SummarizeSource::Text(text) => {
            let _ = msg_tx.send(SummarizeMsg::TextEdited(text));
        }
        SummarizeSource::File(path) => {
            let candidate = candidate_from_path(&path)?;
            let _ = msg_tx.send(SummarizeMsg::ModeSelected(InputMode::File));
            let _ = msg_tx.send(SummarizeMsg::FileAttached(candidate));
        }
    }
    let _ = msg_tx.send(SummarizeMsg::SummarizeClicked);

    loop {
        let msg = msg_rx.recv()?;
        let submit_trigger = matches!(msg, SummarizeMsg::SummarizeClicked);
        let settled = matches!(&msg, SummarizeMsg::SummarySettled(_));
        let failed = matches!(&msg, SummarizeMsg::SummarySettled(Err(_)));

        let (next, effects) = update_summarize(state, msg);
        state = next;
        runner.run_summarize(effects, &msg_tx);
        if state.consume_dirty() {
            render::print_lines(&render::summarize_lines(&state.view()));
        }

        if submit_trigger && !state.is_busy() {
            anyhow::bail!("nothing was submitted");
        }
        if settled {
            // The alert with the failure message has already printed.
            if failed {
                anyhow::bail!("summarization failed");
            }
            flow_info!("summary received");
            return Ok(());
        }
    }
}
