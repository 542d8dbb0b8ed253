//! File watcher for live config reload.
//!
//! Uses the `notify` crate to watch the config file's directory, so
//! editors that save by write-and-rename are still seen, and debounces
//! bursts of events into a single reload signal.

mod config_watcher;


pub use config_watcher::{ConfigWatcher, DEFAULT_DEBOUNCE};
