// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          EnvError (16 bytes)
//!                |
//!      +---------+---------+
//!      |         |         |
//!      v         v         v
//!   Compute    Config    Model
//!     Box       Box       Box
//!
//! Sub-errors (unboxed internally):
//!   Compute  Failed
//!   Config   ParseError, InvalidKey, DuplicateKey, InvalidPath, InvalidValue
//!   Model    ReadError, ParseError
//!
//! Missing attributes are not errors: they resolve to null.
//! ```

use thiserror::Error;

use crate::environment::Layer;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`EnvError`].
pub type EnvResult<T> = std::result::Result<T, EnvError>;

/// Top-level error type.
///
/// All sub-errors are boxed to keep this enum at 16 bytes on the stack.
#[derive(Debug, Error)]
pub enum EnvError {
    /// A computed entry failed during resolution.
    #[error("compute error: {0}")]
    Compute(#[from] Box<ComputeError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Server model could not be loaded.
    #[error("model error: {0}")]
    Model(#[from] Box<ModelError>),
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for EnvError {
                fn from(err: $error) -> Self {
                    EnvError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ComputeError => Compute,
    ConfigError => Config,
    ModelError => Model,
}

// --- Compute Errors ---

/// Errors raised by computed mapping entries.
#[derive(Debug, Error)]
pub enum ComputeError {
    /// The compute function returned an error.
    #[error("computed variable '{key}' ({layer}) failed: {message}")]
    Failed {
        key: String,
        layer: Layer,
        message: String,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sources could not be read, merged or deserialized.
    #[error("failed to parse config: {message}")]
    ParseError { message: String },

    /// Key is not a valid environment variable name.
    #[error("invalid environment variable name '{key}' in section '[{section}]'")]
    InvalidKey { section: String, key: String },

    /// Two keys normalize to the same variable name.
    #[error("keys '{first}' and '{second}' in section '[{section}]' both map to '{key}'")]
    DuplicateKey {
        section: String,
        key: String,
        first: String,
        second: String,
    },

    /// Attribute path is malformed.
    #[error("invalid attribute path '{path}' for '{key}': {message}")]
    InvalidPath {
        key: String,
        path: String,
        message: String,
    },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Model Errors ---

/// Errors loading a server description.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Failed to read the server file.
    #[error("failed to read server file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Server JSON did not match the expected shape.
    #[error("failed to parse server '{path}': {source}")]
    ParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
