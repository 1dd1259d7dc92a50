use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use bullet_core::selection::{BulletSelector, SelectionConfig, StrategyKind};
use serde_json::json;
use tracing::Level;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_captured_logs<F: FnOnce()>(f: F) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    captured.text()
}

fn heap_selector() -> BulletSelector {
    BulletSelector::new(SelectionConfig::v0().with_strategy(StrategyKind::Heap)).unwrap()
}

#[test]
fn failed_input_is_logged_as_aborted_not_complete() {
    let records = vec![
        json!({"company": "A", "relevance_score": 90}),
        json!({"company": "A"}),
    ];

    let logs = with_captured_logs(|| {
        assert!(heap_selector().select_values(records).is_err());
    });

    assert!(logs.contains("bullet selection aborted"), "{logs}");
    assert!(!logs.contains("bullet selection complete"), "{logs}");
}

#[test]
fn successful_selection_is_logged_once_as_complete() {
    let records = vec![json!({"company": "A", "relevance_score": 90})];

    let logs = with_captured_logs(|| {
        assert!(heap_selector().select_values(records).is_ok());
    });

    assert_eq!(logs.matches("bullet selection complete").count(), 1, "{logs}");
    assert!(!logs.contains("aborted"), "{logs}");
}
