// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Resolve and explain command arguments.

use clap::{ArgAction, Args, ValueEnum};
use std::path::PathBuf;

/// Output format for resolved environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `KEY=VALUE` lines, nulls as empty values.
    #[default]
    Env,
    /// JSON object, nulls preserved.
    Json,
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Server description (JSON).
    #[arg(value_name = "SERVER")]
    pub server: PathBuf,

    /// Sets KEY to VALUE with the highest precedence.
    /// Can be specified multiple times.
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_assignment, action = ArgAction::Append)]
    pub vars: Vec<(String, String)>,

    /// Only prints keys matching this glob, e.g. 'P_SERVER_*'.
    #[arg(short = 'f', long = "filter", value_name = "GLOB")]
    pub filter: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Env)]
    pub format: OutputFormat,
}

/// Arguments for the `explain` command.
#[derive(Debug, Clone, Args)]
pub struct ExplainArgs {
    /// Server description (JSON).
    #[arg(value_name = "SERVER")]
    pub server: PathBuf,

    /// Sets KEY to VALUE with the highest precedence.
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_assignment, action = ArgAction::Append)]
    pub vars: Vec<(String, String)>,

    /// Only shows keys matching this glob.
    #[arg(short = 'f', long = "filter", value_name = "GLOB")]
    pub filter: Option<String>,
}

/// Parses a `KEY=VALUE` assignment; the value may be empty or contain `=`.
///
/// # Errors
///
/// Returns an error message if there is no `=` or the key is empty.
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, _)) if key.trim().is_empty() => Err(format!("missing key in '{s}'")),
        Some((key, value)) => Ok((key.trim().to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}
