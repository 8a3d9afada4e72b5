#![allow(dead_code)]

use std::sync::Mutex;

use authlog_core::{ProgressMarker, Window};
use authlog_store::{LogStore, StorePaths};
use ingest::{EventSource, FetchError};
use serde_json::{Value, json};
use tempfile::TempDir;

pub struct TestStore {
    pub _dir: TempDir,
    pub paths: StorePaths,
}

pub fn store_paths() -> TestStore {
    let dir = tempfile::tempdir().expect("temp dir");
    let paths = StorePaths {
        log_path: dir.path().join("Logs.json"),
        progress_path: dir.path().join("EntryInfo.json"),
        lock_path: dir.path().join(".authlog.lock"),
    };
    TestStore { _dir: dir, paths }
}

pub fn open_store(test: &TestStore) -> LogStore {
    LogStore::open(test.paths.clone()).expect("open store")
}

pub fn raw_event(id: i64) -> Value {
    let action = if id % 2 == 0 { "Idksuccess" } else { "Failed login" };
    json!({
        "id": id,
        "user_Name": format!("Username is: User{id}"),
        "ips": [format!("10.0.0.{}", id % 250), "172.16.0.1"],
        "target": format!("server-{}/auth", id % 3),
        "EVENT_0_ACTION": action,
        "DateTimeAndStuff": 1_600_000_000 + id,
    })
}

pub fn raw_events(count: i64) -> Vec<Value> {
    (0..count).map(raw_event).collect()
}

/// In-memory remote. Like the real API, a window starting above zero also
/// returns the entry just below `from`.
pub struct FakeSource {
    pub marker: Option<ProgressMarker>,
    pub records: Vec<Value>,
    pub failing: Vec<Window>,
    pub calls: Mutex<Vec<Window>>,
}

impl FakeSource {
    pub fn new(count: i64) -> Self {
        Self::with_records(count, raw_events(count))
    }

    pub fn with_records(count: i64, records: Vec<Value>) -> Self {
        Self {
            marker: Some(ProgressMarker::new(count, format!("hash-{count}"))),
            records,
            failing: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            marker: None,
            records: Vec::new(),
            failing: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, window: Window) -> Self {
        self.failing.push(window);
        self
    }

    pub fn calls(&self) -> Vec<Window> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl EventSource for FakeSource {
    fn fetch_total_count(&self) -> Result<ProgressMarker, FetchError> {
        self.marker.clone().ok_or(FetchError::Status {
            status: 503,
            body: "unavailable".to_string(),
        })
    }

    fn fetch_window(&self, window: Window) -> Result<Vec<Value>, FetchError> {
        self.calls.lock().expect("calls lock").push(window);
        if self.failing.contains(&window) {
            return Err(FetchError::Status {
                status: 502,
                body: "bad gateway".to_string(),
            });
        }
        let low = (window.from - 1).max(0);
        Ok(self
            .records
            .iter()
            .filter(|record| {
                let id = record.get("id").and_then(Value::as_i64).unwrap_or(-1);
                id >= low && id <= window.to
            })
            .cloned()
            .collect())
    }
}
