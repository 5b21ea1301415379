//! Persistent key/value storage backed by `localStorage`.
//!
//! Values are wrapped in a small JSON envelope carrying an optional expiry so
//! the session token can lapse the way a cookie would.  Expired entries are
//! removed on read.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use web_sys::Storage;

use crate::error::FetchError;

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StoredEntry {
    pub value: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredEntry {
    pub fn new(value: &str, ttl_days: Option<i64>, now: DateTime<Utc>) -> Self {
        Self {
            value: value.to_string(),
            expires_at: ttl_days.map(|days| now + Duration::days(days)),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    pub fn encode(&self) -> Result<String, FetchError> {
        serde_json::to_string(self).map_err(|e| FetchError::Storage(e.to_string()))
    }

    /// Values written without the envelope (or by hand in devtools) read as
    /// non-expiring.
    pub fn decode(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|_| Self {
            value: raw.to_string(),
            expires_at: None,
        })
    }
}

fn local_storage() -> Result<Storage, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;
    window
        .local_storage()
        .map_err(|e| FetchError::Storage(FetchError::describe(&e)))?
        .ok_or_else(|| FetchError::Storage("localStorage is unavailable".into()))
}

/// Store `value` under `key`, expiring after `ttl_days` when given.
pub fn set_item(key: &str, value: &str, ttl_days: Option<i64>) -> Result<(), FetchError> {
    let encoded = StoredEntry::new(value, ttl_days, Utc::now()).encode()?;
    local_storage()?
        .set_item(key, &encoded)
        .map_err(|e| FetchError::Storage(FetchError::describe(&e)))
}

pub fn get_item(key: &str) -> Option<String> {
    let storage = local_storage().ok()?;
    let raw = storage.get_item(key).ok().flatten()?;
    let entry = StoredEntry::decode(&raw);
    if entry.is_expired(Utc::now()) {
        let _ = storage.remove_item(key);
        return None;
    }
    Some(entry.value)
}

pub fn remove_item(key: &str) {
    if let Ok(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn set_get_remove_roundtrip() {
        set_item("storage-test", "value with spaces", Some(1)).unwrap();
        assert_eq!(get_item("storage-test").as_deref(), Some("value with spaces"));
        remove_item("storage-test");
        assert_eq!(get_item("storage-test"), None);
    }

    #[wasm_bindgen_test]
    fn expired_entries_read_as_absent() {
        set_item("storage-expired", "old", Some(-1)).unwrap();
        assert_eq!(get_item("storage-expired"), None);
    }

    #[wasm_bindgen_test]
    fn removing_missing_key_is_harmless() {
        remove_item("storage-never-set");
    }
}
