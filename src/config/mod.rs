// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for panel-env.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. panel-env.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. PANEL_ENV_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! PANEL_ENV_GLOBAL__OUTPUT_LOG_LEVEL=4        → global.output_log_level = 4
//! PANEL_ENV_ENVIRONMENT__ON_COMPUTE_ERROR=null → environment.on_compute_error = "null"
//! ```
//!
//! # Configured Variables
//!
//! ```toml
//! [environment_variables]
//! SERVER_MEMORY = "memory"
//! SERVER_IP = "allocation.ip"
//! SERVER_PORT = "allocation.port"
//! ```
//!
//! Keys are normalized to upper case and must be valid variable names;
//! values must be valid attribute paths. Both are checked at load time.

pub mod loader;

#[cfg(test)]
mod tests;

use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::environment::{AttributePath, ComputeErrorPolicy, ENV_KEY_PATTERN};
use crate::error::{ConfigError, Result};
use crate::logging::LogLevel;

use loader::ConfigLoader;

/// Section holding configured variable mappings.
pub const ENVIRONMENT_VARIABLES_SECTION: &str = "environment_variables";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelConfig {
    /// Global options.
    pub global: GlobalConfig,
    /// Resolver behavior.
    pub environment: EnvironmentConfig,
    /// Configured variables: key → attribute path.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub environment_variables: BTreeMap<String, String>,
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::WARN,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Resolver configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Behavior when a computed variable fails.
    pub on_compute_error: ComputeErrorPolicy,
}

impl PanelConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use panel_env::config::PanelConfig;
    ///
    /// let config = PanelConfig::builder()
    ///     .add_toml_file("config/panel-env.toml")
    ///     .add_toml_file_optional("panel-env.local.toml")
    ///     .with_env_prefix("PANEL_ENV")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or fails validation.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Normalize configured keys and validate keys and paths.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidKey`] for a key that is not a valid
    /// variable name, [`ConfigError::DuplicateKey`] when two keys differ only
    /// in case, and [`ConfigError::InvalidPath`] for a malformed path.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        let pattern =
            Regex::new(ENV_KEY_PATTERN).context("failed to compile variable name regex")?;

        let mut normalized = BTreeMap::new();
        let mut originals: BTreeMap<String, String> = BTreeMap::new();
        for (original, path) in std::mem::take(&mut self.environment_variables) {
            let key = original.to_ascii_uppercase();
            if let Some(first) = originals.get(&key) {
                return Err(ConfigError::DuplicateKey {
                    section: ENVIRONMENT_VARIABLES_SECTION.to_string(),
                    key,
                    first: first.clone(),
                    second: original,
                }
                .into());
            }
            if !pattern.is_match(&key) {
                return Err(ConfigError::InvalidKey {
                    section: ENVIRONMENT_VARIABLES_SECTION.to_string(),
                    key,
                }
                .into());
            }
            if let Err(message) = AttributePath::parse(path.as_str()) {
                return Err(ConfigError::InvalidPath {
                    key,
                    path,
                    message: message.to_string(),
                }
                .into());
            }
            originals.insert(key.clone(), original);
            normalized.insert(key, path);
        }
        self.environment_variables = normalized;

        Ok(())
    }

    /// Format configuration options for display, deterministically ordered.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert(
            "global.output_log_level".to_string(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".to_string(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".to_string(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert(
            "environment.on_compute_error".to_string(),
            self.environment.on_compute_error.to_string(),
        );
        for (key, path) in &self.environment_variables {
            options.insert(format!("{ENVIRONMENT_VARIABLES_SECTION}.{key}"), path.clone());
        }

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
