//! In-memory TTL cache for GraphQL responses.
//!
//! Entries are keyed by a deterministic fingerprint of the query text and
//! variables, and expire lazily: a lookup that finds a stale entry removes it
//! and reports a miss.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde_json::Value;

/// Computes the cache fingerprint for a query and its variables.
///
/// When `variables` is absent the fingerprint is the query text alone.
/// Otherwise it is `"{query}:{canonical_json}"`, where the canonical form
/// serializes objects with recursively sorted keys and compact separators.
/// Two variable mappings with the same values in different key order produce
/// the same fingerprint.
pub(crate) fn fingerprint(query: &str, variables: Option<&Value>) -> String {
    variables.map_or_else(
        || query.to_string(),
        |vars| format!("{query}:{}", canonical_json(vars)),
    )
}

/// Serializes a JSON value with recursively sorted object keys.
///
/// `serde_json`'s default map type already sorts keys, but canonicalizing here
/// keeps fingerprints stable even if the `preserve_order` feature is enabled
/// by another crate in the dependency graph.
fn canonical_json(value: &Value) -> String {
    fn write_value(out: &mut String, value: &Value) {
        match value {
            Value::Object(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort_unstable();
                out.push('{');
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    // Key strings never fail to serialize.
                    out.push_str(&Value::String((*key).clone()).to_string());
                    out.push(':');
                    write_value(out, &map[*key]);
                }
                out.push('}');
            }
            Value::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write_value(out, item);
                }
                out.push(']');
            }
            // Scalars have a single canonical rendering already.
            other => out.push_str(&other.to_string()),
        }
    }

    let mut out = String::new();
    write_value(&mut out, value);
    out
}

/// A cached response payload and the instant it was stored.
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Value,
    inserted_at: Instant,
}

/// TTL cache for successful query payloads.
///
/// The entry map sits behind a [`parking_lot::Mutex`]; the guard is only held
/// for the map operation itself and never across an await point, so the cache
/// is safe to share between concurrent queries on one client.
#[derive(Debug)]
pub(crate) struct QueryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl QueryCache {
    /// Creates an empty cache whose entries expire after `ttl`.
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Looks up a fresh entry, removing it if it has expired.
    ///
    /// Freshness is `elapsed < ttl`, so a zero TTL never serves from cache.
    pub(crate) fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => Some(entry.data.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores a payload under `key`, replacing any previous entry.
    pub(crate) fn insert(&self, key: String, data: Value) {
        let entry = CacheEntry {
            data,
            inserted_at: Instant::now(),
        };
        self.entries.lock().insert(key, entry);
    }

    /// Returns the number of live (possibly stale) entries.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.lock().len()
    }
}
