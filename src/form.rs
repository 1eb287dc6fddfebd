// File: ./src/form.rs
// Input capture and validation for new items
use crate::model::{Item, ItemKind, parse_date, parse_time};
use crate::store::ItemStore;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in all required fields (Name and Time)")]
    MissingRequired,
    #[error("Date is required for events")]
    MissingEventDate,
    #[error("Time must look like HH:MM, got `{0}`")]
    InvalidTime(String),
    #[error("Date must look like YYYY-MM-DD, got `{0}`")]
    InvalidDate(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Name,
    Time,
    Date,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Name => Field::Time,
            Field::Time => Field::Date,
            Field::Date => Field::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Time => "Time",
            Field::Date => "Date",
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct FormController {
    kind: ItemKind,
    pub name: String,
    pub time: String,
    pub date: String,
}

impl FormController {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Switches between task and event. Typed fields are kept.
    pub fn select_kind(&mut self, kind: ItemKind) {
        self.kind = kind;
    }

    pub fn date_required(&self) -> bool {
        self.kind.requires_date()
    }

    pub fn submit_label(&self) -> String {
        format!("Add {}", self.kind.label())
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Time => &self.time,
            Field::Date => &self.date,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Time => &mut self.time,
            Field::Date => &mut self.date,
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.time.clear();
        self.date.clear();
    }

    /// Validates the current input and builds a new item.
    ///
    /// The store is only consulted for a fresh id; inserting the item is the
    /// caller's job. On error nothing is consumed and the fields stay as typed.
    pub fn submit(&self, store: &mut ItemStore, now: DateTime<Utc>) -> Result<Item, FormError> {
        let name = self.name.trim();
        let time = self.time.trim();
        let date = self.date.trim();

        if name.is_empty() || time.is_empty() {
            return Err(FormError::MissingRequired);
        }
        if self.kind.requires_date() && date.is_empty() {
            return Err(FormError::MissingEventDate);
        }

        let time = parse_time(time).ok_or_else(|| FormError::InvalidTime(time.to_string()))?;
        let date = if date.is_empty() {
            None
        } else {
            Some(parse_date(date).ok_or_else(|| FormError::InvalidDate(date.to_string()))?)
        };

        Ok(Item {
            id: store.next_id(now.timestamp_millis()),
            name: name.to_string(),
            time: time.format("%H:%M").to_string(),
            date,
            kind: self.kind,
            completed: false,
            created_at: now,
        })
    }
}
