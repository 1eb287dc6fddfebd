// File: ./src/model/item.rs
// The one record type held by the store
use crate::model::format::parse_time;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Millisecond timestamp of creation, bumped when needed to stay unique.
pub type ItemId = i64;

/// 9999-12-31T23:59:59.999Z in milliseconds; no clock-derived id goes past it.
pub const MAX_ITEM_ID: ItemId = 253_402_300_799_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Task,
    Event,
}

impl ItemKind {
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Task => "Task",
            ItemKind::Event => "Event",
        }
    }

    /// Events always carry a date; tasks may not.
    pub fn requires_date(self) -> bool {
        matches!(self, ItemKind::Event)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Zero-padded 24-hour "HH:MM", so string order is chronological.
    pub time: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Checks the invariants every stored item must hold.
    ///
    /// Items built by the form always pass; this guards records coming back
    /// from disk.
    pub fn is_well_formed(&self) -> bool {
        (1..=MAX_ITEM_ID).contains(&self.id)
            && !self.name.trim().is_empty()
            && self.has_canonical_time()
            && (!self.kind.requires_date() || self.date.is_some())
    }

    /// `time` parses and is already written as zero-padded "HH:MM".
    pub fn has_canonical_time(&self) -> bool {
        parse_time(&self.time).is_some_and(|t| t.format("%H:%M").to_string() == self.time)
    }

    /// Rewrites a parseable time such as "9:00" into "09:00". Returns false
    /// when the time cannot be parsed at all.
    pub fn normalize_time(&mut self) -> bool {
        match parse_time(&self.time) {
            Some(t) => {
                self.time = t.format("%H:%M").to_string();
                true
            }
            None => false,
        }
    }
}
