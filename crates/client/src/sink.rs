//! Output sinks receiving published configuration entries.

use std::collections::{BTreeMap, HashMap};

/// Add-only destination for loaded configuration entries.
///
/// Within one publish pass every key is distinct. Across passes a sink may
/// see the same key again; map sinks keep the latest value.
pub trait ConfigSink {
    fn add(&mut self, key: &str, value: &str);
}

impl ConfigSink for Vec<(String, String)> {
    fn add(&mut self, key: &str, value: &str) {
        self.push((key.to_string(), value.to_string()));
    }
}

impl<S: std::hash::BuildHasher> ConfigSink for HashMap<String, String, S> {
    fn add(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

impl ConfigSink for BTreeMap<String, String> {
    fn add(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

impl<T: ConfigSink + ?Sized> ConfigSink for &mut T {
    fn add(&mut self, key: &str, value: &str) {
        (**self).add(key, value);
    }
}
