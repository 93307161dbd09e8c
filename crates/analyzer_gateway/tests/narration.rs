use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use analyzer_gateway::{
    EventSink, GatewayCommand, GatewayEvent, GatewayHandle, GatewaySettings, NarrationScript,
    NARRATION_STATUSES,
};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<GatewayEvent>>>,
}

impl TestSink {
    fn new() -> Self {
        Self::default()
    }

    fn take(&self) -> Vec<GatewayEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: GatewayEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[tokio::test]
async fn script_emits_statuses_in_order_then_finishes() {
    let script = NarrationScript::default().with_interval(Duration::from_millis(5));
    let sink = TestSink::new();

    script.run(3, &sink).await;

    let mut expected: Vec<GatewayEvent> = NARRATION_STATUSES
        .iter()
        .enumerate()
        .map(|(index, status)| GatewayEvent::NarrationStatus {
            generation: 3,
            index,
            status: status.to_string(),
        })
        .collect();
    expected.push(GatewayEvent::NarrationFinished { generation: 3 });
    assert_eq!(sink.take(), expected);
}

#[tokio::test]
async fn custom_script_is_honored() {
    let script = NarrationScript::new(
        vec!["one".to_string(), "two".to_string()],
        Duration::from_millis(1),
    );
    let sink = TestSink::new();

    script.run(1, &sink).await;

    let events = sink.take();
    assert_eq!(events.len(), 3);
    assert_eq!(
        events[0],
        GatewayEvent::NarrationStatus {
            generation: 1,
            index: 0,
            status: "one".to_string(),
        }
    );
    assert_eq!(
        events.last(),
        Some(&GatewayEvent::NarrationFinished { generation: 1 })
    );
}

#[test]
fn handle_runs_narration_on_its_own_runtime() {
    let handle = GatewayHandle::new(
        GatewaySettings::default(),
        NarrationScript::default().with_interval(Duration::from_millis(2)),
    );
    handle.submit(GatewayCommand::Narrate { generation: 7 });

    let deadline = Instant::now() + Duration::from_secs(2);
    let mut events = Vec::new();
    while Instant::now() < deadline {
        if let Some(event) = handle.try_recv() {
            let finished = event == GatewayEvent::NarrationFinished { generation: 7 };
            events.push(event);
            if finished {
                break;
            }
        } else {
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    assert_eq!(events.len(), NARRATION_STATUSES.len() + 1);
    assert_eq!(
        events.last(),
        Some(&GatewayEvent::NarrationFinished { generation: 7 })
    );
}
