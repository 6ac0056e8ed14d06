//! Conversion of raw secrets into published configuration entries.
//!
//! Responsibilities:
//! - Resolve duplicate raw keys: the first occurrence in service order wins.
//! - Rewrite the `__` separator to `:` and prepend the prefix.
//!
//! Invariants:
//! - A [`SecretSnapshot`] never holds the same output key twice.
//! - Entry order is first-occurrence order of the raw keys.

use std::collections::HashSet;

use infisical_config::constants::{OUTPUT_KEY_SEPARATOR, RAW_KEY_SEPARATOR};
use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use crate::models::RawSecret;
use crate::sink::ConfigSink;

/// Output key for a raw secret key: `prefix + key` with `__` rewritten to `:`.
pub fn output_key(prefix: &str, raw_key: &str) -> String {
    let mut key = String::with_capacity(prefix.len() + raw_key.len());
    key.push_str(prefix);
    key.push_str(&raw_key.replace(RAW_KEY_SEPARATOR, OUTPUT_KEY_SEPARATOR));
    key
}

/// Turns service responses into publishable snapshots.
#[derive(Debug, Clone, Default)]
pub struct SecretTransformer {
    prefix: String,
}

impl SecretTransformer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Build a snapshot from secrets in service order.
    pub fn transform(&self, secrets: Vec<RawSecret>) -> SecretSnapshot {
        let mut seen_raw = HashSet::with_capacity(secrets.len());
        let mut seen_output = HashSet::with_capacity(secrets.len());
        let mut entries = Vec::with_capacity(secrets.len());

        for secret in secrets {
            if !seen_raw.insert(secret.secret_key.clone()) {
                continue;
            }

            let key = output_key(&self.prefix, &secret.secret_key);
            if !seen_output.insert(key.clone()) {
                warn!(
                    raw_key = %secret.secret_key,
                    output_key = %key,
                    "Secret key collides with an earlier key after separator rewrite; keeping the earlier value"
                );
                continue;
            }

            entries.push((key, SecretString::new(secret.secret_value.into())));
        }

        SecretSnapshot { entries }
    }
}

/// Immutable, ordered set of published entries.
#[derive(Clone, Default)]
pub struct SecretSnapshot {
    entries: Vec<(String, SecretString)>,
}

impl SecretSnapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Output keys in publish order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SecretString)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, key: &str) -> Option<&SecretString> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Add every entry to `sink`, in order.
    pub fn publish<S: ConfigSink + ?Sized>(&self, sink: &mut S) {
        for (key, value) in &self.entries {
            sink.add(key, value.expose_secret());
        }
    }
}

impl std::fmt::Debug for SecretSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretSnapshot")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> Vec<RawSecret> {
        pairs.iter().map(|(k, v)| RawSecret::new(*k, *v)).collect()
    }

    fn published(snapshot: &SecretSnapshot) -> Vec<(String, String)> {
        let mut sink = Vec::new();
        snapshot.publish(&mut sink);
        sink
    }

    #[test]
    fn test_first_occurrence_wins() {
        let snapshot =
            SecretTransformer::default().transform(raw(&[("A", "1"), ("B", "2"), ("A", "3")]));
        assert_eq!(
            published(&snapshot),
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn test_prefix_and_separator_rewrite() {
        let snapshot = SecretTransformer::new("APP_").transform(raw(&[("DB__HOST", "db.local")]));
        assert_eq!(snapshot.keys().collect::<Vec<_>>(), ["APP_DB:HOST"]);
        assert_eq!(
            snapshot.get("APP_DB:HOST").map(|v| v.expose_secret().to_string()),
            Some("db.local".to_string())
        );
    }

    #[test]
    fn test_nested_separators() {
        assert_eq!(output_key("", "A__B__C"), "A:B:C");
        assert_eq!(output_key("", "A___B"), "A:_B");
        assert_eq!(output_key("P:", "PLAIN"), "P:PLAIN");
    }

    #[test]
    fn test_output_collision_keeps_first() {
        let snapshot = SecretTransformer::default()
            .transform(raw(&[("A__B", "nested"), ("A:B", "literal")]));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.get("A:B").map(|v| v.expose_secret().to_string()),
            Some("nested".to_string())
        );
    }

    #[test]
    fn test_empty_input() {
        let snapshot = SecretTransformer::new("X_").transform(Vec::new());
        assert!(snapshot.is_empty());
        assert!(published(&snapshot).is_empty());
    }

    #[test]
    fn test_debug_lists_keys_only() {
        let snapshot = SecretTransformer::default().transform(raw(&[("TOKEN", "s3cr3t")]));
        let debug = format!("{snapshot:?}");
        assert!(debug.contains("TOKEN"));
        assert!(!debug.contains("s3cr3t"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn first_value_per_key_is_published(
                pairs in prop::collection::vec(("[A-C]{1,2}", "[a-z0-9]{0,4}"), 0..20)
            ) {
                let secrets: Vec<RawSecret> =
                    pairs.iter().map(|(k, v)| RawSecret::new(k.clone(), v.clone())).collect();
                let snapshot = SecretTransformer::default().transform(secrets);

                let mut expected: Vec<(String, String)> = Vec::new();
                for (k, v) in &pairs {
                    if !expected.iter().any(|(ek, _)| ek == k) {
                        expected.push((k.clone(), v.clone()));
                    }
                }

                prop_assert_eq!(published(&snapshot), expected);
            }
        }
    }
}
