// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The environment resolver.
//!
//! ```text
//! resolve(server)
//!   seed(server.variables)        --> Layer::Variables
//!   apply(BuiltinMappings)        --> Layer::Builtin
//!   apply(ConfiguredMappings)     --> Layer::Configured
//!   apply(DynamicRegistry)        --> Layer::Dynamic
//!        |
//!        v
//!   ResolvedEnvironment
//! ```

use bon::Builder;
use tracing::{debug, warn};

use super::registry::DynamicRegistry;
use super::resolved::ResolvedEnvironment;
use super::source::{
    BuiltinMappings, ComputeFn, ConfiguredMappings, MappingProvider, MappingSource,
};
use super::{ComputeErrorPolicy, Layer, variables};
use crate::config::PanelConfig;
use crate::error::{ComputeError, ConfigError, EnvResult, Result};
use crate::model::Server;

/// Merges the environment layers for a server.
///
/// The dynamic registry is owned by the resolver and shared by all of its
/// `resolve()` calls. It is internally synchronized, so a resolver can be
/// shared between threads behind an `Arc`.
///
/// # Example
///
/// ```
/// use panel_env::environment::EnvironmentResolver;
/// use panel_env::model::Server;
///
/// let resolver = EnvironmentResolver::default();
/// resolver.register_dynamic("FOO", |server| Ok(server.uuid.clone()));
///
/// let server = Server {
///     uuid: Some("1234".to_string()),
///     ..Default::default()
/// };
/// let env = resolver.resolve(&server)?;
/// assert_eq!(env.get("FOO"), Some("1234"));
/// # Ok::<(), panel_env::error::EnvError>(())
/// ```
#[derive(Debug, Builder)]
pub struct EnvironmentResolver {
    #[builder(setters(name = with_configured), default)]
    configured: ConfiguredMappings,
    #[builder(setters(name = with_compute_error_policy), default)]
    on_compute_error: ComputeErrorPolicy,
    #[builder(skip)]
    dynamic: DynamicRegistry,
}

impl Default for EnvironmentResolver {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl EnvironmentResolver {
    /// Creates a resolver from the `[environment]` and
    /// `[environment_variables]` configuration sections.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] if a configured path is malformed.
    pub fn from_config(config: &PanelConfig) -> std::result::Result<Self, ConfigError> {
        let configured = ConfiguredMappings::from_table(&config.environment_variables)?;
        Ok(Self::builder()
            .with_configured(configured)
            .with_compute_error_policy(config.environment.on_compute_error)
            .build())
    }

    /// Registers a dynamic entry, replacing any entry with the same key.
    pub fn register_dynamic<F>(&self, key: impl Into<String>, f: F)
    where
        F: Fn(&Server) -> Result<Option<String>> + Send + Sync + 'static,
    {
        self.dynamic.register(key, f);
    }

    /// Snapshot of the dynamic registrations.
    #[must_use]
    pub fn list_dynamic(&self) -> std::collections::BTreeMap<String, ComputeFn> {
        self.dynamic.snapshot()
    }

    /// Removes all dynamic registrations.
    pub fn clear_dynamic(&self) {
        self.dynamic.clear();
    }

    #[must_use]
    pub const fn configured(&self) -> &ConfiguredMappings {
        &self.configured
    }

    #[must_use]
    pub const fn compute_error_policy(&self) -> ComputeErrorPolicy {
        self.on_compute_error
    }

    /// Resolves the environment for `server`.
    ///
    /// Missing attributes resolve to null for their key only.
    ///
    /// # Errors
    ///
    /// Returns [`ComputeError::Failed`] if a computed entry fails and the
    /// policy is [`ComputeErrorPolicy::Abort`].
    pub fn resolve(&self, server: &Server) -> EnvResult<ResolvedEnvironment> {
        let mut resolved = ResolvedEnvironment::new();

        for (key, value) in variables::seed(server) {
            resolved.set(key, value, Layer::Variables);
        }
        let seeded = resolved.len();

        let builtin = self.apply(&BuiltinMappings, server, &mut resolved)?;
        let configured = self.apply(&self.configured, server, &mut resolved)?;
        let dynamic = self.apply(&self.dynamic, server, &mut resolved)?;

        debug!(
            server = server.uuid.as_deref().unwrap_or_default(),
            seeded,
            builtin,
            configured,
            dynamic,
            total = resolved.len(),
            "Resolved server environment"
        );

        Ok(resolved)
    }

    /// Applies one provider's entries, returning how many were applied.
    fn apply(
        &self,
        provider: &dyn MappingProvider,
        server: &Server,
        resolved: &mut ResolvedEnvironment,
    ) -> EnvResult<usize> {
        let layer = provider.layer();
        let entries = provider.entries();

        for entry in &entries {
            let value = match &entry.source {
                MappingSource::Path(path) => {
                    let value = path.extract(server);
                    if value.is_none() {
                        debug!(
                            key = %entry.key,
                            path = %path,
                            %layer,
                            "Attribute missing, resolving to null"
                        );
                    }
                    value
                }
                MappingSource::Compute(f) => self.compute(&entry.key, layer, f, server)?,
            };
            resolved.set(entry.key.clone(), value, layer);
        }

        Ok(entries.len())
    }

    fn compute(
        &self,
        key: &str,
        layer: Layer,
        f: &ComputeFn,
        server: &Server,
    ) -> EnvResult<Option<String>> {
        match f(server) {
            Ok(value) => Ok(value),
            Err(e) => match self.on_compute_error {
                ComputeErrorPolicy::Abort => Err(ComputeError::Failed {
                    key: key.to_string(),
                    layer,
                    message: format!("{e:#}"),
                }
                .into()),
                ComputeErrorPolicy::Null => {
                    warn!(key, %layer, error = %format!("{e:#}"), "Computed variable failed, resolving to null");
                    Ok(None)
                }
            },
        }
    }
}
