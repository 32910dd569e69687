// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::resolve::{OutputFormat, parse_assignment};
use crate::cli::{Cli, Command};
use crate::logging::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["panel-env", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_resolve() {
    let cli = Cli::try_parse_from([
        "panel-env",
        "-l",
        "4",
        "-c",
        "/etc/panel-env.toml",
        "resolve",
        "server.json",
        "--var",
        "FOO=bar",
        "--var",
        "EMPTY=",
        "--filter",
        "P_*",
        "--format",
        "json",
    ])
    .unwrap();

    assert_eq!(cli.global.log_level, Some(4));
    assert_eq!(cli.global.configs, vec![PathBuf::from("/etc/panel-env.toml")]);

    let Some(Command::Resolve(args)) = cli.command else {
        panic!("expected resolve command");
    };
    assert_eq!(args.server, PathBuf::from("server.json"));
    assert_eq!(
        args.vars,
        vec![
            ("FOO".to_string(), "bar".to_string()),
            ("EMPTY".to_string(), String::new()),
        ]
    );
    assert_eq!(args.filter.as_deref(), Some("P_*"));
    assert_eq!(args.format, OutputFormat::Json);
}

#[test]
fn test_parse_resolve_defaults_to_env_format() {
    let cli = Cli::try_parse_from(["panel-env", "resolve", "server.json"]).unwrap();
    let Some(Command::Resolve(args)) = cli.command else {
        panic!("expected resolve command");
    };
    assert_eq!(args.format, OutputFormat::Env);
    assert!(args.vars.is_empty());
}

#[test]
fn test_parse_explain() {
    let cli = Cli::try_parse_from(["panel-env", "explain", "server.json", "-f", "SERVER_*"]).unwrap();
    let Some(Command::Explain(args)) = cli.command else {
        panic!("expected explain command");
    };
    assert_eq!(args.filter.as_deref(), Some("SERVER_*"));
}

#[test]
fn test_parse_rejects_bad_assignment() {
    assert!(Cli::try_parse_from(["panel-env", "resolve", "s.json", "--var", "NOEQUALS"]).is_err());
    assert!(Cli::try_parse_from(["panel-env", "-l", "9", "builtins"]).is_err());
}

#[test]
fn test_parse_assignment() {
    assert_eq!(
        parse_assignment("JAVA_OPTS=-Dfoo=bar"),
        Ok(("JAVA_OPTS".to_string(), "-Dfoo=bar".to_string()))
    );
    assert!(parse_assignment("=value").is_err());
    assert!(parse_assignment("value").is_err());
}

#[test]
fn test_global_overrides_applied_to_config() {
    let cli = Cli::try_parse_from([
        "panel-env",
        "--no-default-config",
        "-l",
        "5",
        "--log-file",
        "panel-env.log",
        "options",
    ])
    .unwrap();

    let config = cli.global.config_loader().unwrap().build().unwrap();
    assert_eq!(config.global.output_log_level, LogLevel::TRACE);
    assert_eq!(config.global.file_log_level, LogLevel::TRACE);
    assert_eq!(
        config.global.log_file,
        Some(PathBuf::from("panel-env.log"))
    );
}

#[test]
fn test_file_log_level_overrides_log_level() {
    let cli = Cli::try_parse_from(["panel-env", "-l", "1", "--file-log-level", "4", "configs"])
        .unwrap();
    let overrides = cli.global.to_config_overrides();

    let keys: Vec<&str> = overrides.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, vec!["global.output_log_level", "global.file_log_level"]);
}
