mod common;

use common::make_item;
use dayplan::model::ItemKind;
use dayplan::storage::{LocalStorage, LoggingStorage, Persistence};
use dayplan::store::{ItemStore, Snapshot};
use dayplan::tracker::Tracker;
use std::fs;

fn sample() -> Snapshot {
    let mut store = ItemStore::new();
    for (kind, name, time, date) in [
        (ItemKind::Task, "Buy milk", "08:00", ""),
        (ItemKind::Event, "Meeting", "09:00", "2025-01-01"),
        (ItemKind::Task, "Call mom", "07:30", "2025-01-02"),
    ] {
        let item = make_item(&mut store, kind, name, time, date);
        store.add(item);
    }
    let first = store.tasks()[0].id;
    store.toggle_completed(first);
    store.snapshot()
}

#[test]
fn json_round_trip_keeps_fields_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path().join("items.json"));
    let snapshot = sample();

    storage.save(&snapshot).unwrap();
    assert_eq!(storage.load().unwrap(), snapshot);
}

#[test]
fn json_uses_readable_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");
    LocalStorage::new(&path).save(&sample()).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"type\": \"event\""));
    assert!(raw.contains("\"date\": null"));
    assert!(raw.contains("\"completed\": true"));
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path().join("nope.json"));
    assert!(storage.load().unwrap().is_empty());
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("items.json");
    LocalStorage::new(&path).save(&sample()).unwrap();
    assert!(path.exists());
}

#[test]
fn corrupt_file_is_an_error_and_tracker_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");
    fs::write(&path, "{ not json").unwrap();

    let storage = LocalStorage::new(&path);
    assert!(storage.load().is_err());

    let tracker = Tracker::open(Box::new(storage));
    assert!(tracker.store().is_empty());
    assert!(tracker.rendered().tasks.is_placeholder());
}

#[test]
fn tracker_restores_state_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");
    LocalStorage::new(&path).save(&sample()).unwrap();

    let tracker = Tracker::open(Box::new(LocalStorage::new(&path)));
    assert_eq!(tracker.store().tasks().len(), 2);
    assert_eq!(tracker.store().events().len(), 1);
    assert!(tracker.store().tasks()[0].completed);
}

#[test]
fn in_dir_places_file_under_override() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::in_dir(Some(dir.path())).unwrap();
    assert_eq!(storage.path(), dir.path().join("items.json"));
}

#[test]
fn logging_storage_keeps_nothing() {
    let storage = LoggingStorage;
    storage.save(&sample()).unwrap();
    assert!(storage.load().unwrap().is_empty());
}
