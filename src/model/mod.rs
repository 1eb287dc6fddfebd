// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod format;
pub mod item;

// Re-export types so callers can use `crate::model::Item`
pub use format::{format_date, format_time, parse_date, parse_time};
pub use item::{Item, ItemId, ItemKind, MAX_ITEM_ID};
