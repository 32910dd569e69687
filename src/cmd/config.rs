// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for panel-env.

use crate::config::PanelConfig;
use crate::environment::source::BUILTIN_MAPPINGS;

/// Display current configuration options.
pub fn run_options_command(config: &PanelConfig) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Display loaded configuration files.
pub fn run_configs_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
}

/// Display the built-in variable mapping.
pub fn run_builtins_command() {
    for line in format_builtins() {
        println!("{line}");
    }
}

/// Formats the built-in mapping as aligned `KEY = path` lines.
#[must_use]
pub fn format_builtins() -> Vec<String> {
    let width = BUILTIN_MAPPINGS
        .iter()
        .map(|(key, _)| key.len())
        .max()
        .unwrap_or(0);

    BUILTIN_MAPPINGS
        .iter()
        .map(|(key, path)| format!("{key:<width$} = {path}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::format_builtins;

    #[test]
    fn test_format_builtins() {
        insta::assert_snapshot!(format_builtins().join("\n"), @r"
        STARTUP           = startup
        P_SERVER_LOCATION = location.short
        P_SERVER_UUID     = uuid
        ");
    }
}
