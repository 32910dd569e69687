// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Registry of dynamically registered compute entries.
//!
//! ```text
//! register(key, fn) --write lock--> BTreeMap<String, ComputeFn>
//! entries()         --read lock---> Vec<MappingEntry> (Arc clones)
//!                                   lock released before any fn runs
//! ```
//!
//! The registry lives as long as its resolver and is shared by every
//! `resolve()` call on it. Registrations are idempotent per key: registering
//! an existing key replaces its function.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::Layer;
use super::source::{ComputeFn, MappingEntry, MappingProvider, MappingSource};
use crate::error::Result;
use crate::model::Server;

/// Thread-safe `{key → compute fn}` registry.
#[derive(Default)]
pub struct DynamicRegistry {
    entries: RwLock<BTreeMap<String, ComputeFn>>,
}

impl DynamicRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the entry for `key`.
    pub fn register<F>(&self, key: impl Into<String>, f: F)
    where
        F: Fn(&Server) -> Result<Option<String>> + Send + Sync + 'static,
    {
        let key = key.into();
        let replaced = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone(), Arc::new(f))
            .is_some();

        tracing::trace!(key = %key, replaced, "Registered dynamic environment entry");
    }

    /// Snapshot of the current registrations.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, ComputeFn> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes all registrations.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for DynamicRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<String> = self.snapshot().into_keys().collect();
        f.debug_struct("DynamicRegistry").field("keys", &keys).finish()
    }
}

impl MappingProvider for DynamicRegistry {
    fn layer(&self) -> Layer {
        Layer::Dynamic
    }

    fn entries(&self) -> Vec<MappingEntry> {
        self.snapshot()
            .into_iter()
            .map(|(key, f)| MappingEntry::new(key, MappingSource::Compute(f)))
            .collect()
    }
}
