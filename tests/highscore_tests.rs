//! High score file store tests

use std::fs;

use stackfall::core::GameSnapshot;
use stackfall::{HighScoreStore, HighScoreTracker, JsonFileStore, STORAGE_KEY};
use tempfile::tempdir;

fn snapshot_with(score: u64) -> GameSnapshot {
    GameSnapshot {
        score,
        ..GameSnapshot::default()
    }
}

#[test]
fn missing_file_means_no_score() {
    let dir = tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("scores.json"));
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("scores.json");

    let mut store = JsonFileStore::new(&path);
    store.save(4200).unwrap();
    assert_eq!(JsonFileStore::new(&path).load().unwrap(), Some(4200));

    let text = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value[STORAGE_KEY], 4200);
}

#[test]
fn save_keeps_other_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.json");
    fs::write(&path, r#"{ "theme": "dark", "stackfall.highscore": 10 }"#).unwrap();

    let mut store = JsonFileStore::new(&path);
    assert_eq!(store.load().unwrap(), Some(10));
    store.save(99).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["theme"], "dark");
    assert_eq!(value[STORAGE_KEY], 99);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.json");
    fs::write(&path, "not json").unwrap();
    assert!(JsonFileStore::new(&path).load().is_err());

    fs::write(&path, r#"{ "stackfall.highscore": "lots" }"#).unwrap();
    assert!(JsonFileStore::new(&path).load().is_err());
}

#[test]
fn tracker_with_unreadable_file_keeps_playing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.json");
    fs::write(&path, "{ broken").unwrap();

    let mut tracker = HighScoreTracker::new(JsonFileStore::new(&path));
    assert!(!tracker.is_persisting());
    assert_eq!(tracker.best(), 0);

    assert!(tracker.observe(&snapshot_with(300)));
    assert_eq!(tracker.best(), 300);
    // Nothing was written over the broken file.
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ broken");
}

#[test]
fn tracker_persists_new_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.json");

    let mut tracker = HighScoreTracker::new(JsonFileStore::new(&path));
    assert!(tracker.observe(&snapshot_with(150)));
    assert!(!tracker.observe(&snapshot_with(100)));

    let reloaded = HighScoreTracker::new(JsonFileStore::new(&path));
    assert_eq!(reloaded.best(), 150);
}
