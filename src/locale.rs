//! Locale store — localized strings fetched from the banking backend.
//!
//! The table is replaced wholesale on every successful load and never
//! mutated in place; readers resolve against an `Arc` snapshot and can
//! never observe a half-applied table. Load failures are logged and
//! leave the previous table untouched, so the widget keeps rendering
//! with whatever strings (or fallbacks) it already has.
//!
//! The store is an explicit object built at bootstrap and shared as
//! `Arc<LocaleStore>` — there is no process-global table.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tracing::{error, info};

use crate::net::{self, FetchError, RequestOptions};

/// Fallback served when the table has no `currency` entry.
pub const DEFAULT_CURRENCY: &str = "USD";
/// Fallback served when the table has no `currency_language` entry.
pub const DEFAULT_CURRENCY_LANGUAGE: &str = "en-US";

pub struct LocaleStore {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
    strings: RwLock<Arc<HashMap<String, String>>>,
}

impl LocaleStore {
    /// Create an empty store. `get` serves fallbacks until the first
    /// successful [`LocaleStore::load`].
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
            strings: RwLock::new(Arc::new(HashMap::new())),
        }
    }

    /// Look up `key`.
    ///
    /// The two reserved keys fall back to fixed defaults when absent;
    /// any other miss echoes the key back so untranslated UI stays
    /// legible. An entry holding an empty string counts as a miss for
    /// ordinary keys but not for the reserved ones.
    pub fn get(&self, key: &str) -> String {
        let strings = self.strings.read().expect("locale table lock poisoned");
        match key {
            "currency" => strings
                .get(key)
                .cloned()
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            "currency_language" => strings
                .get(key)
                .cloned()
                .unwrap_or_else(|| DEFAULT_CURRENCY_LANGUAGE.to_string()),
            _ => match strings.get(key) {
                Some(value) if !value.is_empty() => value.clone(),
                _ => key.to_string(),
            },
        }
    }

    /// Fetch the table from the backend and replace the current one.
    ///
    /// Never fails from the caller's point of view: any error (timeout,
    /// network, HTTP status, parse) is logged and the previous table is
    /// kept.
    pub async fn load(&self) {
        match self.try_load().await {
            Ok(count) => info!(endpoint = %self.endpoint, strings = count, "locale table loaded"),
            Err(e) if e.is_timeout() => {
                error!(endpoint = %self.endpoint, "locale load aborted: {e}");
            }
            Err(e) => error!(endpoint = %self.endpoint, "locale load failed: {e}"),
        }
    }

    async fn try_load(&self) -> Result<usize, FetchError> {
        let response = net::fetch_bounded(
            &self.client,
            &self.endpoint,
            RequestOptions::post(),
            self.timeout,
        )
        .await?;
        let response = response.error_for_status()?;
        let table: HashMap<String, String> = response.json().await?;

        let count = table.len();
        self.replace(table);
        Ok(count)
    }

    /// Swap in a complete replacement table (single assignment — readers
    /// see either the old table or the new one, never a mix).
    pub fn replace(&self, table: HashMap<String, String>) {
        let mut strings = self.strings.write().expect("locale table lock poisoned");
        *strings = Arc::new(table);
    }

    /// Cheap snapshot of the current table.
    pub fn snapshot(&self) -> Arc<HashMap<String, String>> {
        self.strings.read().expect("locale table lock poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_store() -> LocaleStore {
        LocaleStore::new(
            reqwest::Client::new(),
            "http://127.0.0.1:0/loadLocale",
            Duration::from_millis(100),
        )
    }

    #[test]
    fn reserved_defaults_on_empty_table() {
        let store = empty_store();
        assert_eq!(store.get("currency"), "USD");
        assert_eq!(store.get("currency_language"), "en-US");
    }

    #[test]
    fn unknown_key_echoes_back() {
        let store = empty_store();
        assert_eq!(store.get("anything_else"), "anything_else");
    }

    #[test]
    fn stored_values_win_over_defaults() {
        let store = empty_store();
        store.replace(HashMap::from([
            ("currency".to_string(), "EUR".to_string()),
            ("greeting".to_string(), "hi".to_string()),
        ]));
        assert_eq!(store.get("currency"), "EUR");
        assert_eq!(store.get("greeting"), "hi");
    }

    #[test]
    fn empty_value_echoes_key_except_for_reserved() {
        let store = empty_store();
        store.replace(HashMap::from([
            ("greeting".to_string(), String::new()),
            ("currency".to_string(), String::new()),
        ]));
        // Ordinary keys treat an empty entry as a miss…
        assert_eq!(store.get("greeting"), "greeting");
        // …the reserved keys return whatever is stored.
        assert_eq!(store.get("currency"), "");
    }

    #[test]
    fn replace_is_wholesale() {
        let store = empty_store();
        store.replace(HashMap::from([("old".to_string(), "x".to_string())]));
        store.replace(HashMap::from([("new".to_string(), "y".to_string())]));

        assert_eq!(store.get("new"), "y");
        // The old entry is gone, not merged.
        assert_eq!(store.get("old"), "old");
    }

    #[test]
    fn snapshot_is_stable_across_replace() {
        let store = empty_store();
        store.replace(HashMap::from([("k".to_string(), "v1".to_string())]));
        let snapshot = store.snapshot();
        store.replace(HashMap::from([("k".to_string(), "v2".to_string())]));

        assert_eq!(snapshot.get("k").map(String::as_str), Some("v1"));
        assert_eq!(store.get("k"), "v2");
    }
}
