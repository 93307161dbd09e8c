use std::time::Duration;

use crate::types::GatewayEvent;

/// Status strings narrated while an upload/extraction request is in
/// flight. Cosmetic only: the settlement is authoritative for data.
pub const NARRATION_STATUSES: [&str; 3] = [
    "Analyzing question patterns...",
    "Classifying topics and difficulty...",
    "Generating insights and suggestions...",
];

/// Default delay between narration statuses.
pub const NARRATION_INTERVAL: Duration = Duration::from_millis(1500);

/// Receiver of gateway events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: GatewayEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<GatewayEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<GatewayEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: GatewayEvent) {
        let _ = self.tx.send(event);
    }
}

/// A fixed, timer-driven sequence of status messages that runs
/// independently of any real request; the two may finish in either
/// order and the workflow joins them.
#[derive(Debug, Clone)]
pub struct NarrationScript {
    statuses: Vec<String>,
    interval: Duration,
}

impl Default for NarrationScript {
    fn default() -> Self {
        Self::new(
            NARRATION_STATUSES.iter().map(ToString::to_string).collect(),
            NARRATION_INTERVAL,
        )
    }
}

impl NarrationScript {
    pub fn new(statuses: Vec<String>, interval: Duration) -> Self {
        Self { statuses, interval }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Emits each status after one interval, then the terminal event.
    /// Every event carries the caller's generation so overlapping runs
    /// stay distinguishable.
    pub async fn run(&self, generation: u64, sink: &dyn EventSink) {
        for (index, status) in self.statuses.iter().enumerate() {
            tokio::time::sleep(self.interval).await;
            sink.emit(GatewayEvent::NarrationStatus {
                generation,
                index,
                status: status.clone(),
            });
        }
        sink.emit(GatewayEvent::NarrationFinished { generation });
    }
}
