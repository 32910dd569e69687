// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for environment resolution.
//!
//! Tests the resolver against servers loaded from JSON and mappings loaded
//! from TOML.

use panel_env::config::PanelConfig;
use panel_env::environment::{ComputeErrorPolicy, EnvironmentResolver, Layer};
use panel_env::error::EnvError;
use panel_env::model::Server;

const SERVER_JSON: &str = r#"{
    "id": 7,
    "uuid": "d3aac109-e5a0-4331-b03e-3454f7e136dc",
    "uuidShort": "d3aac109",
    "name": "Survival",
    "startup": "java -Xmx{{SERVER_MEMORY}}M -jar server.jar",
    "memory": 1024,
    "location": { "id": 1, "short": "us.nyc", "long": "New York" },
    "allocation": { "ip": "10.0.0.4", "port": 25565 },
    "egg": { "name": "Paper", "features": ["eula", "java_version"] },
    "variables": [
        { "name": "Server Jar File", "env_variable": "SERVER_JARFILE", "default_value": "server.jar" },
        { "name": "Build Number", "env_variable": "BUILD_NUMBER", "default_value": "latest", "server_value": "412" }
    ]
}"#;

fn server() -> Server {
    Server::from_json_str(SERVER_JSON).unwrap()
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn resolve_without_configuration() {
    let env = EnvironmentResolver::default().resolve(&server()).unwrap();

    insta::assert_snapshot!(env.to_assignments().join("\n"), @r"
    BUILD_NUMBER=412
    P_SERVER_LOCATION=us.nyc
    P_SERVER_UUID=d3aac109-e5a0-4331-b03e-3454f7e136dc
    SERVER_JARFILE=server.jar
    STARTUP=java -Xmx{{SERVER_MEMORY}}M -jar server.jar
    ");
}

#[test]
fn resolve_with_configured_table() {
    let config = PanelConfig::parse(
        r#"
[environment_variables]
SERVER_MEMORY = "memory"
SERVER_IP = "allocation.ip"
SERVER_PORT = "allocation.port"
EGG_NAME = "egg.name"
EGG_FIRST_FEATURE = "egg.features.0"
BUILD_NUMBER = "uuid_short"
NODE_NAME = "node.name"
"#,
    )
    .unwrap();
    let resolver = EnvironmentResolver::from_config(&config).unwrap();

    let env = resolver.resolve(&server()).unwrap();

    assert_eq!(env.get("SERVER_MEMORY"), Some("1024"));
    assert_eq!(env.get("SERVER_IP"), Some("10.0.0.4"));
    assert_eq!(env.get("SERVER_PORT"), Some("25565"));
    assert_eq!(env.get("EGG_NAME"), Some("Paper"));
    assert_eq!(env.get("EGG_FIRST_FEATURE"), Some("eula"));
    assert_eq!(env.get("BUILD_NUMBER"), Some("d3aac109"));
    assert_eq!(env.origin("BUILD_NUMBER"), Some(Layer::Configured));
    assert!(env.contains_key("NODE_NAME"));
    assert!(env.is_null("NODE_NAME"));
}

#[test]
fn dynamic_entries_take_precedence() {
    let config = PanelConfig::parse(
        r#"
[environment_variables]
STARTUP = "name"
"#,
    )
    .unwrap();
    let resolver = EnvironmentResolver::from_config(&config).unwrap();
    resolver.register_dynamic("STARTUP", |s: &Server| Ok(s.name.as_ref().map(|name| format!("run {name}"))));
    resolver.register_dynamic("P_SERVER_UUID", |_: &Server| Ok(None));

    let env = resolver.resolve(&server()).unwrap();

    assert_eq!(env.get("STARTUP"), Some("run Survival"));
    assert_eq!(env.origin("STARTUP"), Some(Layer::Dynamic));
    assert!(env.is_null("P_SERVER_UUID"));
    assert_eq!(
        resolver.list_dynamic().keys().collect::<Vec<_>>(),
        vec!["P_SERVER_UUID", "STARTUP"]
    );
}

#[test]
fn resolve_is_repeatable() {
    let resolver = EnvironmentResolver::default();
    resolver.register_dynamic("NAME", |s: &Server| Ok(s.name.clone()));
    let server = server();

    let first = resolver.resolve(&server).unwrap();
    let second = resolver.resolve(&server).unwrap();

    assert_eq!(first.to_map(), second.to_map());
}

// =============================================================================
// Compute Failures
// =============================================================================

#[test]
fn compute_failure_aborts_resolution() {
    let resolver = EnvironmentResolver::default();
    resolver.register_dynamic("BROKEN", |_: &Server| anyhow::bail!("lookup failed"));

    let err = resolver.resolve(&server()).unwrap_err();

    assert!(matches!(err, EnvError::Compute(_)));
    insta::assert_snapshot!(err.to_string(), @"compute error: computed variable 'BROKEN' (dynamic) failed: lookup failed");
}

#[test]
fn compute_failure_with_null_policy() {
    let config = PanelConfig::parse(
        r#"
[environment]
on_compute_error = "null"
"#,
    )
    .unwrap();
    let resolver = EnvironmentResolver::from_config(&config).unwrap();
    assert_eq!(resolver.compute_error_policy(), ComputeErrorPolicy::Null);
    resolver.register_dynamic("BROKEN", |_: &Server| anyhow::bail!("lookup failed"));

    let env = resolver.resolve(&server()).unwrap();

    assert!(env.is_null("BROKEN"));
    assert_eq!(env.get("BUILD_NUMBER"), Some("412"));
}

// =============================================================================
// Server Loading
// =============================================================================

#[test]
fn resolve_server_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server.json");
    std::fs::write(&path, SERVER_JSON).unwrap();

    let server = Server::from_json_file(&path).unwrap();
    let env = EnvironmentResolver::default().resolve(&server).unwrap();

    assert_eq!(env.get("P_SERVER_LOCATION"), Some("us.nyc"));
}

#[test]
fn resolve_server_without_location() {
    let server = Server::from_json_str(r#"{ "uuid": "abc", "startup": "./run" }"#).unwrap();

    let env = EnvironmentResolver::default().resolve(&server).unwrap();

    assert_eq!(env.len(), 3);
    assert!(env.is_null("P_SERVER_LOCATION"));
    assert_eq!(env.get("P_SERVER_UUID"), Some("abc"));
}
