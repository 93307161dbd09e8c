use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use flow_logging::flow_debug;

use crate::client::{AnalysisGateway, GatewaySettings, ReqwestGateway};
use crate::narrate::{ChannelEventSink, NarrationScript};
use crate::types::{FilePayload, GatewayEvent, SummaryRequest, UploadFlags};

/// Work submitted to the gateway thread.
#[derive(Debug, Clone)]
pub enum GatewayCommand {
    Upload {
        files: Vec<FilePayload>,
        flags: UploadFlags,
    },
    ExtractText {
        file: FilePayload,
    },
    PredictTopics {
        text: String,
    },
    Summarize {
        request: SummaryRequest,
    },
    /// Run the cosmetic narration sequence for one submission.
    Narrate { generation: u64 },
}

/// Handle to the background gateway: commands in, events out.
///
/// Commands are spawned individually so calls overlap freely;
/// one-request-per-step exclusivity is enforced by the flow state
/// machines, not here.
#[derive(Clone)]
pub struct GatewayHandle {
    cmd_tx: mpsc::Sender<GatewayCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<GatewayEvent>>>,
}

impl GatewayHandle {
    pub fn new(settings: GatewaySettings, script: NarrationScript) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel::<GatewayEvent>();
        let gateway = Arc::new(ReqwestGateway::new(settings));
        let script = Arc::new(script);

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let gateway = gateway.clone();
                let event_tx = event_tx.clone();
                let script = script.clone();
                runtime.spawn(async move {
                    handle_command(gateway.as_ref(), script.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn submit(&self, command: GatewayCommand) {
        let _ = self.cmd_tx.send(command);
    }

    pub fn try_recv(&self) -> Option<GatewayEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    gateway: &dyn AnalysisGateway,
    script: &NarrationScript,
    command: GatewayCommand,
    event_tx: mpsc::Sender<GatewayEvent>,
) {
    match command {
        GatewayCommand::Upload { files, flags } => {
            flow_debug!("gateway: upload with {} file(s)", files.len());
            let result = gateway.upload(&files, &flags).await;
            let _ = event_tx.send(GatewayEvent::UploadSettled(result));
        }
        GatewayCommand::ExtractText { file } => {
            flow_debug!("gateway: extract_text for {}", file.file_name);
            let result = gateway.extract_text(&file).await;
            let _ = event_tx.send(GatewayEvent::ExtractSettled(result));
        }
        GatewayCommand::PredictTopics { text } => {
            flow_debug!("gateway: predict_topics over {} chars", text.len());
            let result = gateway.predict_topics(&text).await;
            let _ = event_tx.send(GatewayEvent::PredictSettled(result));
        }
        GatewayCommand::Summarize { request } => {
            let result = gateway.summarize(&request).await;
            let _ = event_tx.send(GatewayEvent::SummarizeSettled(result));
        }
        GatewayCommand::Narrate { generation } => {
            let sink = ChannelEventSink::new(event_tx);
            script.run(generation, &sink).await;
        }
    }
}
