pub mod config;
pub mod form;
pub mod logging;
pub mod model;
pub mod render;
pub mod storage;
pub mod store;
pub mod tracker;

#[cfg(feature = "tui")]
pub mod tui;
