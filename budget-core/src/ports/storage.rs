//! Key-value preference storage port

use serde_json::Value as JsonValue;

use crate::domain::result::Result;

/// Durable flat key-value storage (the platform preference store)
///
/// Writes are synchronous and durable once they return. A single `set` call
/// is applied atomically: either all of its entries land or none do.
pub trait KeyValueStore: Send + Sync {
    /// Read one key
    fn get(&self, key: &str) -> Result<Option<JsonValue>>;

    /// Write one or more keys in a single atomic update
    fn set(&self, entries: &[(&str, JsonValue)]) -> Result<()>;

    /// Remove every key
    fn clear(&self) -> Result<()>;
}
