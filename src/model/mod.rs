// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Server model consumed by the resolver.
//!
//! ```text
//! Server
//!   uuid, startup, memory, ...   scalar attributes
//!   location   -> Location { id, short, long }
//!   allocation -> Allocation { ip, port, alias }
//!   extra      -> any further JSON fields (objects, arrays)
//!   variables  -> [VariableRecord { env_variable, name, server_value, default_value }]
//! ```
//!
//! The server is loaded and owned by the caller; the resolver only reads it
//! through the [`Attributes`] capability and [`Server::variables`].

pub mod attributes;


use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EnvResult, ModelError};

pub use attributes::{Attr, Attributes};

/// A managed server and its associated variable records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub id: Option<u64>,
    pub uuid: Option<String>,
    #[serde(alias = "uuidShort")]
    pub uuid_short: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub startup: Option<String>,
    pub image: Option<String>,
    /// Memory limit in MiB.
    pub memory: Option<u64>,
    /// Swap limit in MiB (`-1` for unlimited).
    pub swap: Option<i64>,
    /// Disk limit in MiB.
    pub disk: Option<u64>,
    /// Block IO weight.
    pub io: Option<u64>,
    /// CPU limit in percent.
    pub cpu: Option<u64>,
    pub allocation_limit: Option<u32>,
    pub database_limit: Option<u32>,
    pub location: Option<Location>,
    pub allocation: Option<Allocation>,
    /// Variable records bound to this server, in storage order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<VariableRecord>,
    /// Any other attributes supplied by the storage layer.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Server {
    /// Parses a server from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ParseError`] if the JSON does not describe a server.
    pub fn from_json_str(content: &str) -> EnvResult<Self> {
        serde_json::from_str(content).map_err(|source| {
            ModelError::ParseError {
                path: "<string>".to_string(),
                source,
            }
            .into()
        })
    }

    /// Loads a server from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ReadError`] if the file cannot be read and
    /// [`ModelError::ParseError`] if its content is not a valid server.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> EnvResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| {
            ModelError::ParseError {
                path: path.display().to_string(),
                source,
            }
            .into()
        })
    }

    /// Returns the variable records bound to this server.
    #[must_use]
    pub fn variables(&self) -> &[VariableRecord] {
        &self.variables
    }
}

/// Location a server's node belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub id: Option<u64>,
    /// Short location code, e.g. `us.nyc`.
    pub short: Option<String>,
    /// Human readable description.
    pub long: Option<String>,
}

/// Primary network allocation of a server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Allocation {
    pub ip: Option<String>,
    pub port: Option<u16>,
    pub alias: Option<String>,
}

/// A configurable variable bound to a server.
///
/// `name` must be unique within a server's variable collection. It is read
/// from `env_variable`; the panel's display `name` is kept as `label`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableRecord {
    /// Emitted environment key.
    #[serde(rename = "env_variable")]
    pub name: String,
    /// Human readable label, not used for resolution.
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Server specific value.
    #[serde(alias = "server_value")]
    pub override_value: Option<String>,
    /// Fallback when no override is set.
    pub default_value: Option<String>,
}

impl VariableRecord {
    pub fn new(name: impl Into<String>, default_value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            override_value: None,
            default_value: Some(default_value.into()),
        }
    }

    #[must_use]
    pub fn with_override(mut self, value: impl Into<String>) -> Self {
        self.override_value = Some(value.into());
        self
    }

    /// Override value if set, otherwise the default.
    #[must_use]
    pub fn effective_value(&self) -> Option<&str> {
        self.override_value
            .as_deref()
            .or(self.default_value.as_deref())
    }
}
