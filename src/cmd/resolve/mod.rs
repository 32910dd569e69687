// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Resolve and explain command implementations.
//!
//! ```text
//! SERVER json --> Server --+
//! PanelConfig -------------+--> EnvironmentResolver
//! --var K=V  --> register_dynamic(K, || V)
//!                               |
//!                               v
//!                  ResolvedEnvironment --filter--> stdout
//! ```

use anyhow::Context;
use std::path::Path;
use wax::{Glob, Program as _};

use crate::cli::resolve::{ExplainArgs, OutputFormat, ResolveArgs};
use crate::config::PanelConfig;
use crate::environment::{EnvironmentResolver, ResolvedEnvironment};
use crate::error::Result;
use crate::model::Server;

/// Main handler for the resolve command.
///
/// # Errors
///
/// Returns an error if the server cannot be loaded, the filter is not a
/// valid glob, or a computed variable fails.
pub fn run_resolve_command(args: &ResolveArgs, config: &PanelConfig) -> Result<()> {
    let mut env = resolve_server(&args.server, &args.vars, config)?;
    if let Some(pattern) = &args.filter {
        filter_keys(&mut env, pattern)?;
    }

    match args.format {
        OutputFormat::Env => {
            for line in env.to_assignments() {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&env)
                .context("failed to serialize resolved environment")?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Main handler for the explain command.
///
/// # Errors
///
/// Same as [`run_resolve_command`].
pub fn run_explain_command(args: &ExplainArgs, config: &PanelConfig) -> Result<()> {
    let mut env = resolve_server(&args.server, &args.vars, config)?;
    if let Some(pattern) = &args.filter {
        filter_keys(&mut env, pattern)?;
    }

    if env.is_empty() {
        println!("No variables resolved");
    } else {
        for line in format_explain(&env) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Loads a server and resolves it with the configured resolver.
///
/// Each `(key, value)` in `vars` is registered as a dynamic entry.
///
/// # Errors
///
/// Returns an error if the server cannot be loaded, the configuration is
/// invalid, or a computed variable fails.
pub fn resolve_server(
    path: &Path,
    vars: &[(String, String)],
    config: &PanelConfig,
) -> Result<ResolvedEnvironment> {
    let server = Server::from_json_file(path)?;
    let resolver = EnvironmentResolver::from_config(config)?;

    for (key, value) in vars {
        let value = value.clone();
        resolver.register_dynamic(key.clone(), move |_| Ok(Some(value.clone())));
    }

    tracing::info!(
        server = server.uuid.as_deref().unwrap_or_default(),
        path = %path.display(),
        configured = resolver.configured().len(),
        overrides = vars.len(),
        "Resolving server environment"
    );

    Ok(resolver.resolve(&server)?)
}

/// Keeps only keys matching the glob `pattern`.
///
/// # Errors
///
/// Returns an error if `pattern` is not a valid glob.
pub fn filter_keys(env: &mut ResolvedEnvironment, pattern: &str) -> Result<()> {
    let glob = Glob::new(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?;
    env.retain(|key| glob.is_match(key));

    if env.is_empty() {
        tracing::warn!(pattern = %pattern, "Filter matched no variables");
    }
    Ok(())
}

/// Formats `KEY  LAYER  VALUE` rows aligned on the key and layer columns.
#[must_use]
pub fn format_explain(env: &ResolvedEnvironment) -> Vec<String> {
    let key_width = env.keys().map(str::len).max().unwrap_or(0);
    let layer_width = env
        .keys()
        .filter_map(|key| env.origin(key))
        .map(|layer| layer.as_str().len())
        .max()
        .unwrap_or(0);

    env.iter()
        .map(|(key, value)| {
            let layer = env.origin(key).map_or("", |layer| layer.as_str());
            let value = value.unwrap_or("<null>");
            format!("{key:<key_width$}  {layer:<layer_width$}  {value}")
        })
        .collect()
}
