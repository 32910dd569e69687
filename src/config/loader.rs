// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered loading of `PanelConfig`.
//!
//! ```text
//! sources, later wins:
//!   TOML files / strings  (in the order added)
//!   PANEL_ENV_<SECTION>__<KEY> environment variables
//!   CLI overrides (set)
//!        |
//!        v
//!   build() --> deserialize --> resolve_and_validate --> PanelConfig
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use config::{File, FileFormat};

use super::PanelConfig;
use crate::error::{ConfigError, Result};

/// How a configuration source was added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A file that must exist.
    Required,
    /// A file that is skipped when absent.
    Optional,
    /// Inline TOML text.
    Inline,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Required => "file",
            Self::Optional => "optional",
            Self::Inline => "string",
        })
    }
}

/// A configuration source that contributes to the merged config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSource {
    pub kind: SourceKind,
    pub path: PathBuf,
}

/// Collects configuration sources and merges them into a validated
/// [`PanelConfig`].
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<LoadedSource>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    /// Adds a TOML file that `build()` requires to exist.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), true)
    }

    /// Adds a TOML file that is ignored when absent.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), false)
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));

        let kind = if required {
            SourceKind::Required
        } else if path.exists() {
            SourceKind::Optional
        } else {
            return self;
        };
        self.sources.push(LoadedSource {
            kind,
            path: path.to_path_buf(),
        });
        self
    }

    /// Adds inline TOML, mostly used by `PanelConfig::parse` and tests.
    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(LoadedSource {
            kind: SourceKind::Inline,
            path: PathBuf::from("<string>"),
        });
        self
    }

    /// Reads `<PREFIX>_<SECTION>__<KEY>` environment variables at build time.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Overrides a dotted key such as `global.output_log_level`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] if the key cannot be parsed.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })?;
        Ok(self)
    }

    /// Merges all sources and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] when a required file is missing, a
    /// source is not valid TOML, or the merged table has unknown or mistyped
    /// fields. Validation errors from `PanelConfig::resolve_and_validate` are
    /// passed through.
    pub fn build(self) -> Result<PanelConfig> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };

        let mut config = builder
            .build()
            .and_then(|merged| merged.try_deserialize::<PanelConfig>())
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })?;
        config.resolve_and_validate()?;
        Ok(config)
    }

    /// Sources that exist, in load order.
    #[must_use]
    pub fn loaded_files(&self) -> &[LoadedSource] {
        &self.sources
    }

    /// Numbered `N. [kind] path` lines for the `configs` command.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, source)| format!("{}. [{}] {}", i + 1, source.kind, source.path.display()))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
