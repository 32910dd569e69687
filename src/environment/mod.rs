// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment resolution for servers.
//!
//! # Layers
//!
//! ```text
//! Priority (low → high), each layer overwrites colliding keys
//! 1. variables    server.variables: override ?? default
//! 2. builtin      STARTUP, P_SERVER_LOCATION, P_SERVER_UUID
//! 3. configured   [environment_variables] paths + compute entries
//! 4. dynamic      register_dynamic() entries, per resolver
//!        |
//!        v
//!   ResolvedEnvironment (key → value | null, + layer per key)
//! ```
//!
//! - **Safe navigation**: a missing attribute resolves that key to null
//! - **Abort on compute failure**: unless configured to degrade to null
//! - **No interpolation**: values are never expanded or substituted

pub mod extract;
pub mod registry;
pub mod resolved;
pub mod resolver;
pub mod source;
pub mod variables;


use serde::{Deserialize, Serialize};

pub use extract::{AttributePath, extract};
pub use registry::DynamicRegistry;
pub use resolved::ResolvedEnvironment;
pub use resolver::EnvironmentResolver;
pub use source::{
    BuiltinMappings, ComputeFn, ConfiguredMappings, MappingEntry, MappingProvider, MappingSource,
};

/// Pattern accepted for environment variable names.
pub const ENV_KEY_PATTERN: &str = r"^[A-Z_][A-Z0-9_]*$";

/// Source layer that supplied a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Seeded from the server's variable records.
    Variables,
    /// Fixed built-in mapping.
    Builtin,
    /// Operator configured mapping.
    Configured,
    /// Entries registered on the resolver.
    Dynamic,
}

impl Layer {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Variables => "variables",
            Self::Builtin => "builtin",
            Self::Configured => "configured",
            Self::Dynamic => "dynamic",
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do when a computed entry fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputeErrorPolicy {
    /// Abort the resolution and return the error.
    #[default]
    Abort,
    /// Log a warning and resolve the key to null.
    Null,
}

impl std::fmt::Display for ComputeErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Abort => write!(f, "abort"),
            Self::Null => write!(f, "null"),
        }
    }
}
