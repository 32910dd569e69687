// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mapping sources and the providers that supply them.
//!
//! ```text
//! MappingSource = Path(AttributePath) | Compute(ComputeFn)
//!
//! MappingProvider
//!   BuiltinMappings      3 fixed paths          (builtin)
//!   ConfiguredMappings   config paths + fns     (configured)
//!   DynamicRegistry      registered fns         (dynamic, see registry.rs)
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use super::Layer;
use super::extract::AttributePath;
use crate::error::{ConfigError, Result};
use crate::model::Server;

/// A computed mapping value.
///
/// Returning `Ok(None)` resolves the key to null; returning `Err` is a
/// compute failure.
pub type ComputeFn = Arc<dyn Fn(&Server) -> Result<Option<String>> + Send + Sync>;

/// The fixed built-in mapping: key → attribute path.
pub const BUILTIN_MAPPINGS: [(&str, AttributePath); 3] = [
    ("STARTUP", AttributePath::from_static("startup")),
    ("P_SERVER_LOCATION", AttributePath::from_static("location.short")),
    ("P_SERVER_UUID", AttributePath::from_static("uuid")),
];

/// Where a mapped value comes from.
#[derive(Clone)]
pub enum MappingSource {
    /// Extract an attribute path from the server.
    Path(AttributePath),
    /// Invoke a function with the server.
    Compute(ComputeFn),
}

impl MappingSource {
    /// Wraps a closure as a compute source.
    pub fn compute<F>(f: F) -> Self
    where
        F: Fn(&Server) -> Result<Option<String>> + Send + Sync + 'static,
    {
        Self::Compute(Arc::new(f))
    }
}

impl std::fmt::Debug for MappingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(&path.as_str()).finish(),
            Self::Compute(_) => f.write_str("Compute(<fn>)"),
        }
    }
}

/// A key paired with its source.
#[derive(Debug, Clone)]
pub struct MappingEntry {
    pub key: String,
    pub source: MappingSource,
}

impl MappingEntry {
    pub fn new(key: impl Into<String>, source: MappingSource) -> Self {
        Self {
            key: key.into(),
            source,
        }
    }
}

/// A layer of mapping entries applied by the resolver.
pub trait MappingProvider {
    /// Layer recorded for keys this provider supplies.
    fn layer(&self) -> Layer;

    /// Snapshot of the entries to apply, in application order.
    fn entries(&self) -> Vec<MappingEntry>;
}

/// The fixed set of system identifiers every server receives.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMappings;

impl MappingProvider for BuiltinMappings {
    fn layer(&self) -> Layer {
        Layer::Builtin
    }

    fn entries(&self) -> Vec<MappingEntry> {
        BUILTIN_MAPPINGS
            .into_iter()
            .map(|(key, path)| MappingEntry::new(key, MappingSource::Path(path)))
            .collect()
    }
}

/// Operator configured entries, usually loaded from `[environment_variables]`.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredMappings {
    entries: BTreeMap<String, MappingSource>,
}

impl ConfiguredMappings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the mappings from a key → path table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] for the first malformed path.
    pub fn from_table(table: &BTreeMap<String, String>) -> std::result::Result<Self, ConfigError> {
        let mut mappings = Self::new();
        for (key, path) in table {
            mappings.insert_path(key.clone(), path)?;
        }
        Ok(mappings)
    }

    /// Adds or replaces a path entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] if `path` is malformed.
    pub fn insert_path(
        &mut self,
        key: impl Into<String>,
        path: &str,
    ) -> std::result::Result<&mut Self, ConfigError> {
        let key = key.into();
        let parsed = AttributePath::parse(path).map_err(|message| ConfigError::InvalidPath {
            key: key.clone(),
            path: path.to_string(),
            message: message.to_string(),
        })?;
        self.entries.insert(key, MappingSource::Path(parsed));
        Ok(self)
    }

    /// Adds or replaces a computed entry.
    pub fn insert_compute<F>(&mut self, key: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&Server) -> Result<Option<String>> + Send + Sync + 'static,
    {
        self.entries.insert(key.into(), MappingSource::compute(f));
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MappingSource> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MappingProvider for ConfiguredMappings {
    fn layer(&self) -> Layer {
        Layer::Configured
    }

    fn entries(&self) -> Vec<MappingEntry> {
        self.entries
            .iter()
            .map(|(key, source)| MappingEntry::new(key.clone(), source.clone()))
            .collect()
    }
}
