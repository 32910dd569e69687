// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for panel-env using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! panel-env [global options] <command>
//! resolve <SERVER> [--var K=V]... [--filter GLOB] [--format env|json]
//! explain <SERVER> [--var K=V]... [--filter GLOB]
//! builtins
//! options
//! configs
//! version
//! ```

pub mod global;
pub mod resolve;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::resolve::{ExplainArgs, ResolveArgs};
use clap::{Parser, Subcommand};

/// Server environment resolver.
///
/// Resolves the environment variables handed to a server's process.
#[derive(Debug, Parser)]
#[command(
    name = "panel-env",
    author,
    version,
    about = "Server environment resolver",
    long_about = "panel-env Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Resolves the environment variables for a server from its\n\
                  variable records, the built-in mapping, the configured\n\
                  [environment_variables] table and --var overrides, in that\n\
                  order of increasing precedence.",
    after_help = "CONFIG FILES:\n\n\
                  By default, panel-env loads `panel-env.toml` from the current\n\
                  directory if it exists. Additional files can be given with\n\
                  --config and are loaded after it. PANEL_ENV_<SECTION>__<KEY>\n\
                  environment variables override file values. Use\n\
                  --no-default-config to only use --config."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Resolves and prints a server's environment.
    Resolve(ResolveArgs),

    /// Shows each resolved variable and the layer that supplied it.
    Explain(ExplainArgs),

    /// Lists the built-in variable mapping.
    Builtins,

    /// Lists all options and their values from the config files.
    Options,

    /// Lists the config files used.
    Configs,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
