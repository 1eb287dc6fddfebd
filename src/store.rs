// File: ./src/store.rs
use crate::model::{Item, ItemId, ItemKind};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Full contents of the store, as handed to persistence.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    #[serde(default)]
    pub tasks: Vec<Item>,
    #[serde(default)]
    pub events: Vec<Item>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.tasks.len() + self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owns every item. Tasks and events are kept in separate lists, each in
/// insertion order until `sort_by_time` is applied.
#[derive(Debug, Default)]
pub struct ItemStore {
    tasks: Vec<Item>,
    events: Vec<Item>,
    last_id: ItemId,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from persisted data.
    ///
    /// Times like "9:00" are rewritten to "09:00". Records that break an item
    /// invariant (unparseable time, id outside `1..=MAX_ITEM_ID`, event with
    /// no date, reused id) are dropped rather than failing the whole load.
    /// Items are filed by their own kind, whichever list they were saved under.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut store = Self::new();
        let mut seen = HashSet::new();
        for mut item in snapshot.tasks.into_iter().chain(snapshot.events) {
            if !item.normalize_time() || !item.is_well_formed() {
                warn!("event=restore_skip reason=invalid id={}", item.id);
                continue;
            }
            if !seen.insert(item.id) {
                warn!("event=restore_skip reason=duplicate_id id={}", item.id);
                continue;
            }
            store.last_id = store.last_id.max(item.id);
            store.list_mut(item.kind).push(item);
        }
        store
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tasks: self.tasks.clone(),
            events: self.events.clone(),
        }
    }

    pub fn tasks(&self) -> &[Item] {
        &self.tasks
    }

    pub fn events(&self) -> &[Item] {
        &self.events
    }

    pub fn list(&self, kind: ItemKind) -> &[Item] {
        match kind {
            ItemKind::Task => &self.tasks,
            ItemKind::Event => &self.events,
        }
    }

    fn list_mut(&mut self, kind: ItemKind) -> &mut Vec<Item> {
        match kind {
            ItemKind::Task => &mut self.tasks,
            ItemKind::Event => &mut self.events,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len() + self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.tasks.iter().chain(&self.events).find(|i| i.id == id)
    }

    fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.tasks
            .iter_mut()
            .chain(self.events.iter_mut())
            .find(|i| i.id == id)
    }

    /// Hands out an id derived from the clock: `now_ms` unless that is not
    /// past the last id issued, in which case the next free integer.
    pub fn next_id(&mut self, now_ms: i64) -> ItemId {
        let mut id = now_ms.max(self.last_id.saturating_add(1));
        while self.get(id).is_some() && id < ItemId::MAX {
            id = id.saturating_add(1);
        }
        self.last_id = id;
        id
    }

    /// Appends to the list matching the item's kind.
    pub fn add(&mut self, item: Item) {
        self.last_id = self.last_id.max(item.id);
        self.list_mut(item.kind).push(item);
    }

    /// Flips `completed`. Returns false (and does nothing) for an unknown id.
    pub fn toggle_completed(&mut self, id: ItemId) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.completed = !item.completed;
                true
            }
            None => {
                debug!("event=toggle_miss id={}", id);
                false
            }
        }
    }

    /// Removes the item with this id. Returns false for an unknown id.
    pub fn delete(&mut self, id: ItemId) -> bool {
        let before = self.len();
        self.tasks.retain(|i| i.id != id);
        self.events.retain(|i| i.id != id);
        let removed = self.len() != before;
        if !removed {
            debug!("event=delete_miss id={}", id);
        }
        removed
    }

    /// Orders both lists by "HH:MM". Stable, so equal times keep their
    /// relative order and a second call changes nothing.
    pub fn sort_by_time(&mut self) {
        self.tasks.sort_by(|a, b| a.time.cmp(&b.time));
        self.events.sort_by(|a, b| a.time.cmp(&b.time));
    }
}
