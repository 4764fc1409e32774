//! devlog: a personal developer journal in the terminal.
//!
//! Entries are appended from a text form, kept in insertion order, filtered
//! with a substring search, deleted after confirmation and exported as
//! plain text. The whole collection is persisted as a single JSON snapshot
//! in a key-value storage.

pub mod cli;
pub mod config;
pub mod controller;
pub mod entry;
pub mod entry_store;
pub mod error;
pub mod input;
pub mod keymap;
pub mod logging;
pub mod storage;
pub mod ui;
pub mod view;

pub use config::Config;
pub use controller::{ExportFile, Host, ViewController};
pub use entry::Entry;
pub use entry_store::EntryStore;
pub use error::{Error, Result};
pub use logging::init_logging;
