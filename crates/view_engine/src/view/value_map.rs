//! Named string variables for placeholder substitution
//!
//! Hosts clear and refill a [`ValueMap`] whenever the visible state changes.
//! Keys are unique; updating a key keeps its original position so the map
//! can be dumped back out in insertion order.

use crate::foundation::math::parse_leading_int;

/// Insertion-ordered string-to-string store with unique keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueMap {
    items: Vec<(String, String)>,
}

impl ValueMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing an existing entry in place
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.items.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.items.push((key, value)),
        }
    }

    /// Set `key` to the decimal form of `value`
    pub fn set_int(&mut self, key: impl Into<String>, value: i64) {
        self.set(key, value.to_string());
    }

    /// Set `key` only when it is not present yet
    pub fn set_if_missing(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if self.get(&key).is_none() {
            self.items.push((key, value.into()));
        }
    }

    /// Value stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Integer value of `key` (leading-digits parse), or `default` when absent
    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        self.get(key).map_or(default, parse_leading_int)
    }

    /// Remove `key`, returning its value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.items.iter().position(|(k, _)| k == key)?;
        Some(self.items.remove(index).1)
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for ValueMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}
