// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::loader::SourceKind;
use super::{ConfigLoader, PanelConfig};
use crate::environment::ComputeErrorPolicy;
use crate::error::ConfigError;
use crate::logging::LogLevel;

#[test]
fn test_default_config() {
    let config = PanelConfig::default();

    assert_eq!(config.global.output_log_level, LogLevel::WARN);
    assert_eq!(config.global.file_log_level, LogLevel::TRACE);
    assert!(config.global.log_file.is_none());
    assert_eq!(
        config.environment.on_compute_error,
        ComputeErrorPolicy::Abort
    );
    assert!(config.environment_variables.is_empty());
}

#[test]
fn test_config_parse() {
    let toml = r#"
[global]
output_log_level = 4

[environment]
on_compute_error = "null"

[environment_variables]
SERVER_MEMORY = "memory"
SERVER_IP = "allocation.ip"
"#;
    let config = PanelConfig::parse(toml).unwrap();

    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.environment.on_compute_error, ComputeErrorPolicy::Null);
    assert_eq!(
        config
            .environment_variables
            .get("SERVER_IP")
            .map(String::as_str),
        Some("allocation.ip")
    );
}

#[test]
fn test_config_missing_table_is_empty() {
    let config = PanelConfig::parse("[global]\noutput_log_level = 2").unwrap();
    assert!(config.environment_variables.is_empty());
}

#[test]
fn test_config_keys_normalized_to_upper_case() {
    let config = PanelConfig::parse("[environment_variables]\nserver_port = \"allocation.port\"")
        .unwrap();
    assert!(config.environment_variables.contains_key("SERVER_PORT"));
}

#[test]
fn test_config_invalid_key() {
    let err = PanelConfig::parse("[environment_variables]\n\"1BAD\" = \"uuid\"").unwrap_err();
    let config_err = err.downcast_ref::<ConfigError>().unwrap();
    assert!(matches!(config_err, ConfigError::InvalidKey { key, .. } if key == "1BAD"));
}

#[test]
fn test_config_case_colliding_keys_rejected() {
    let err = PanelConfig::parse("[environment_variables]\nfoo = \"uuid\"\nFOO = \"startup\"")
        .unwrap_err();
    let config_err = err.downcast_ref::<ConfigError>().unwrap();
    assert!(matches!(
        config_err,
        ConfigError::DuplicateKey { key, first, second, .. }
            if key == "FOO" && first == "FOO" && second == "foo"
    ));
}

#[test]
fn test_config_invalid_path() {
    let err =
        PanelConfig::parse("[environment_variables]\nSERVER_IP = \"allocation..ip\"").unwrap_err();
    let config_err = err.downcast_ref::<ConfigError>().unwrap();
    assert!(matches!(config_err, ConfigError::InvalidPath { path, .. } if path == "allocation..ip"));
}

#[test]
fn test_config_non_string_path_rejected() {
    let result = PanelConfig::parse("[environment_variables]\nSERVER_IP = { path = \"ip\" }");
    assert!(result.is_err());
}

#[test]
fn test_config_invalid_policy() {
    let result = PanelConfig::parse("[environment]\non_compute_error = \"retry\"");
    assert!(result.is_err());
}

#[test]
fn test_config_unknown_section_rejected() {
    let result = PanelConfig::parse("[paths]\nprefix = \"/srv\"");
    assert!(result.is_err());
}

#[test]
fn test_format_options() {
    let config = PanelConfig::parse(
        r#"
[global]
log_file = "panel-env.log"

[environment_variables]
SERVER_IP = "allocation.ip"
"#,
    )
    .unwrap();

    insta::assert_snapshot!(config.format_options().join("\n"), @r"
    environment.on_compute_error    = abort
    environment_variables.SERVER_IP = allocation.ip
    global.file_log_level           = 5
    global.log_file                 = panel-env.log
    global.output_log_level         = 2
    ");
}

// --- ConfigLoader Tests ---

#[test]
fn test_config_loader_add_toml_file_success() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(
        file,
        r#"
[global]
log_file = "logs/panel-env.log"

[environment_variables]
SERVER_PORT = "allocation.port"
"#
    )
    .expect("failed to write temp file");

    let config = ConfigLoader::new()
        .add_toml_file(file.path())
        .build()
        .expect("build should succeed");

    assert_eq!(
        config.global.log_file.as_deref(),
        Some(std::path::Path::new("logs/panel-env.log"))
    );
    assert_eq!(config.environment_variables.len(), 1);
}

#[test]
fn test_config_loader_add_toml_file_not_found() {
    let loader = ConfigLoader::new().add_toml_file("/nonexistent/path/to/panel-env.toml");
    assert!(loader.build().is_err());
}

#[test]
fn test_config_loader_optional_file_not_found() {
    let loader = ConfigLoader::new().add_toml_file_optional("/nonexistent/panel-env.toml");
    assert!(loader.loaded_files().is_empty());
    assert!(loader.build().is_ok());
}

#[test]
fn test_config_loader_add_toml_file_invalid_toml() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(file, "this is not valid toml {{{{{{").expect("failed to write");

    let err = ConfigLoader::new()
        .add_toml_file(file.path())
        .build()
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_config_loader_with_env_prefix() {
    // SAFETY: This test runs in isolation (nextest runs each test in its own process)
    unsafe {
        std::env::set_var("PANELTEST_ENVIRONMENT__ON_COMPUTE_ERROR", "null");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[environment]\non_compute_error = \"abort\"")
        .with_env_prefix("PANELTEST")
        .build()
        .expect("build should succeed");

    assert_eq!(
        config.environment.on_compute_error,
        ComputeErrorPolicy::Null,
        "env var should override TOML value"
    );

    // SAFETY: Same as above
    unsafe {
        std::env::remove_var("PANELTEST_ENVIRONMENT__ON_COMPUTE_ERROR");
    }
}

#[test]
fn test_config_loader_set_override() {
    let config = ConfigLoader::new()
        .add_toml_str("[global]\noutput_log_level = 2")
        .set("global.output_log_level", 5)
        .expect("set should succeed")
        .build()
        .expect("build should succeed");

    assert_eq!(config.global.output_log_level, LogLevel::TRACE);
}

#[test]
fn test_config_loader_layered_sources() {
    let config = ConfigLoader::new()
        .add_toml_str("[environment_variables]\nSERVER_IP = \"allocation.ip\"\nSERVER_PORT = \"allocation.port\"")
        .add_toml_str("[environment_variables]\nSERVER_IP = \"allocation.alias\"")
        .build()
        .unwrap();

    assert_eq!(
        config
            .environment_variables
            .get("SERVER_IP")
            .map(String::as_str),
        Some("allocation.alias")
    );
    assert_eq!(config.environment_variables.len(), 2);
}

#[test]
fn test_config_loader_format_loaded_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("")
        .add_toml_str("[global]");

    insta::assert_snapshot!(loader.format_loaded_files().join("\n"), @r"
    1. [string] <string>
    2. [string] <string>
    ");
}

#[test]
fn test_config_loader_source_kinds() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("panel-env.toml");
    std::fs::write(&base, "[environment]\non_compute_error = \"null\"\n").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file(&base)
        .add_toml_file_optional(dir.path().join("missing.toml"))
        .add_toml_file_optional(&base);

    let kinds: Vec<_> = loader.loaded_files().iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![SourceKind::Required, SourceKind::Optional]);
    assert!(loader.build().is_ok());
}
