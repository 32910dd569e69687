// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The resolved environment handed to a process launcher.
//!
//! ```text
//! ResolvedEnvironment
//!   values:  BTreeMap<String, Option<String>>  (null preserved)
//!   origins: BTreeMap<String, Layer>           (last layer to write the key)
//! ```

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use super::Layer;

/// Final key → value mapping for one server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedEnvironment {
    values: BTreeMap<String, Option<String>>,
    origins: BTreeMap<String, Layer>,
}

impl ResolvedEnvironment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any previous value and origin.
    pub fn set(&mut self, key: impl Into<String>, value: Option<String>, layer: Layer) -> &mut Self {
        let key = key.into();
        self.origins.insert(key.clone(), layer);
        self.values.insert(key, value);
        self
    }

    /// Returns the value of `key`; both absent and null keys yield `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Option::as_deref)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns true if `key` is present with a null value.
    #[must_use]
    pub fn is_null(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(None))
    }

    /// Layer that supplied the current value of `key`.
    #[must_use]
    pub fn origin(&self, key: &str) -> Option<Layer> {
        self.origins.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Keeps only the keys for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.values.retain(|k, _| keep(k.as_str()));
        let values = &self.values;
        self.origins.retain(|k, _| values.contains_key(k));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the values as a map, nulls preserved.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, Option<String>> {
        self.values.clone()
    }

    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, Option<String>> {
        self.values
    }

    /// Renders `KEY=VALUE` assignments; null values become empty strings.
    #[must_use]
    pub fn to_assignments(&self) -> Vec<String> {
        self.iter()
            .map(|(key, value)| format!("{key}={}", value.unwrap_or_default()))
            .collect()
    }
}

impl Serialize for ResolvedEnvironment {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.values.serialize(serializer)
    }
}
