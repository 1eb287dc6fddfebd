#![allow(dead_code)]
use anyhow::{Result, bail};
use chrono::{DateTime, TimeZone, Utc};
use dayplan::form::FormController;
use dayplan::model::{Item, ItemKind};
use dayplan::storage::Persistence;
use dayplan::store::{ItemStore, Snapshot};
use dayplan::tracker::Tracker;
use std::sync::{Arc, Mutex};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()
}

/// Builds an item through the same validated path the UI uses.
pub fn make_item(store: &mut ItemStore, kind: ItemKind, name: &str, time: &str, date: &str) -> Item {
    let mut form = FormController::new(kind);
    form.name = name.to_string();
    form.time = time.to_string();
    form.date = date.to_string();
    form.submit(store, fixed_now()).expect("valid input")
}

/// Remembers every saved snapshot; can be told to fail.
#[derive(Clone, Default)]
pub struct RecordingStorage {
    pub saved: Arc<Mutex<Vec<Snapshot>>>,
    pub initial: Snapshot,
    pub fail_load: bool,
    pub fail_save: bool,
}

impl Persistence for RecordingStorage {
    fn load(&self) -> Result<Snapshot> {
        if self.fail_load {
            bail!("disk on fire");
        }
        Ok(self.initial.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if self.fail_save {
            bail!("read-only filesystem");
        }
        self.saved.lock().unwrap().push(snapshot.clone());
        Ok(())
    }
}

pub fn tracker_with(storage: RecordingStorage) -> Tracker {
    Tracker::open(Box::new(storage)).with_clock(Box::new(fixed_now))
}

pub fn fill(tracker: &mut Tracker, kind: ItemKind, name: &str, time: &str, date: &str) {
    let form = tracker.form_mut();
    form.select_kind(kind);
    form.name = name.to_string();
    form.time = time.to_string();
    form.date = date.to_string();
}
