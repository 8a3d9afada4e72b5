#![allow(dead_code)]

use authlog_core::NormalizedEvent;
use authlog_store::{LogStore, StorePaths};
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

pub fn make_event(id: i64, user: &str) -> NormalizedEvent {
    NormalizedEvent {
        id,
        user_name: user.to_string(),
        source_ip: "192.168.1.10".to_string(),
        target: "server-1".to_string(),
        action: "Login Success".to_string(),
        event_time: "2020-09-13 12:26:40 UTC".to_string(),
    }
}
