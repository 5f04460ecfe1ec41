//! Settings store contract
//!
//! Values live outside the panels. The session reads initial values through
//! [`SettingsStore::get`] and writes confirmed changes through
//! [`SettingsStore::set`]. There are no multi-key transactions and the last
//! write wins.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

pub trait SettingsStore {
    /// Stored value of `id` in `scope`, or `fallback` when unset
    fn get(&self, scope: &str, id: &str, fallback: &Value) -> Value;

    /// Store `value` for `id` in `scope`
    fn set(&mut self, scope: &str, id: &str, value: Value);
}

/// In-memory store keyed by `(scope, id)`
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    values: HashMap<(String, String), Value>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored values as `{scope: {id: value}}`, keys sorted
    pub fn snapshot(&self) -> Value {
        let mut scopes: BTreeMap<&str, BTreeMap<&str, &Value>> = BTreeMap::new();
        for ((scope, id), value) in &self.values {
            scopes
                .entry(scope.as_str())
                .or_default()
                .insert(id.as_str(), value);
        }

        let mut root = Map::new();
        for (scope, entries) in scopes {
            let entries: Map<String, Value> = entries
                .into_iter()
                .map(|(id, value)| (id.to_string(), value.clone()))
                .collect();
            root.insert(scope.to_string(), Value::Object(entries));
        }
        Value::Object(root)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, scope: &str, id: &str, fallback: &Value) -> Value {
        self.values
            .get(&(scope.to_string(), id.to_string()))
            .cloned()
            .unwrap_or_else(|| fallback.clone())
    }

    fn set(&mut self, scope: &str, id: &str, value: Value) {
        tracing::trace!("store {}/{} = {}", scope, id, value);
        self.values.insert((scope.to_string(), id.to_string()), value);
    }
}
