//! Adapter implementations
//!
//! Concrete implementations of the ports: the reqwest transport, the JSON
//! preference file, the downloads folder and a log-only notifier.

pub mod downloads;
pub mod http;
pub mod notifier;
pub mod prefs;
