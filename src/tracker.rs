// File: ./src/tracker.rs
// Owns the store and routes every command through mutate -> save -> render
use crate::form::{FormController, FormError};
use crate::model::ItemKind;
use crate::render::{Command, Rendered, render};
use crate::storage::Persistence;
use crate::store::ItemStore;
use chrono::{DateTime, Utc};
use log::{error, info};

pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send>;

pub struct Tracker {
    store: ItemStore,
    form: FormController,
    persistence: Box<dyn Persistence>,
    clock: Clock,
    sort_on_add: bool,
    rendered: Rendered,
}

impl Tracker {
    /// Loads the previous snapshot. A failed load leaves the tracker empty
    /// instead of failing startup.
    pub fn open(persistence: Box<dyn Persistence>) -> Self {
        let store = match persistence.load() {
            Ok(snapshot) => ItemStore::from_snapshot(snapshot),
            Err(e) => {
                error!("event=items_load status=error fallback=empty error={:#}", e);
                ItemStore::new()
            }
        };
        let rendered = render(&store);
        Self {
            store,
            form: FormController::default(),
            persistence,
            clock: Box::new(Utc::now),
            sort_on_add: false,
            rendered,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_default_kind(mut self, kind: ItemKind) -> Self {
        self.form.select_kind(kind);
        self
    }

    /// Keep both lists in time order after every add.
    pub fn with_sort_on_add(mut self, sort: bool) -> Self {
        self.sort_on_add = sort;
        self
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }

    pub fn rendered(&self) -> &Rendered {
        &self.rendered
    }

    /// Single entry point for user commands.
    ///
    /// Only a rejected submit returns an error, and in that case the store is
    /// untouched and nothing is saved.
    pub fn dispatch(&mut self, command: Command) -> Result<&Rendered, FormError> {
        match command {
            Command::SelectKind(kind) => {
                self.form.select_kind(kind);
                Ok(&self.rendered)
            }
            Command::Submit => {
                let now = (self.clock)();
                let item = self.form.submit(&mut self.store, now)?;
                info!("event=item_added kind={} id={}", item.kind, item.id);
                self.form.clear();
                let sort = self.sort_on_add;
                Ok(self.apply_and_sync(move |store| {
                    store.add(item);
                    if sort {
                        store.sort_by_time();
                    }
                }))
            }
            Command::Toggle(id) => Ok(self.apply_and_sync(|store| {
                store.toggle_completed(id);
            })),
            Command::Delete(id) => Ok(self.apply_and_sync(|store| {
                store.delete(id);
            })),
            Command::SortByTime => Ok(self.apply_and_sync(ItemStore::sort_by_time)),
        }
    }

    /// Runs `mutation`, hands the new snapshot to persistence, then rebuilds
    /// the rendered lists. A failed save is logged; memory stays authoritative.
    pub fn apply_and_sync<F>(&mut self, mutation: F) -> &Rendered
    where
        F: FnOnce(&mut ItemStore),
    {
        mutation(&mut self.store);
        if let Err(e) = self.persistence.save(&self.store.snapshot()) {
            error!("event=items_save status=error error={:#}", e);
        }
        self.rendered = render(&self.store);
        &self.rendered
    }
}
