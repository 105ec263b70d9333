// SPDX-License-Identifier: MIT

//! The configuration binder.
//!
//! This module provides [`Configuration`], which turns an untyped
//! [`ConfigMap`] into a validated, typed value of a [`ConfigSchema`] type
//! while keeping the raw map available for dot-path access.

use crate::domain::casing::to_camel_case;
use crate::domain::errors::{ConfigError, Result};
use crate::domain::key::ConfigKey;
use crate::domain::map::ConfigMap;
use crate::domain::rules::FieldRules;
use crate::domain::value::ConfigValue;
use crate::ports::schema::{BindingRegistry, ConfigSchema, SetterMaps};
use tracing::{debug, trace};

/// A typed configuration bound from an untyped nested map.
///
/// Construction merges the schema's defaults under the supplied map (supplied
/// keys win at every nesting level) and loads the result: all declared
/// validation rules present in the map are checked first, then each top-level
/// string key is canonicalized to its camelCase field identifier and routed
/// through the binding registry (custom setter, then conventional setter,
/// then direct field slot). Keys with no registered binding stay available in
/// the raw snapshot only.
///
/// `get`, `has` and `set` operate on the raw snapshot. `set` revalidates the
/// touched path and writes to the snapshot without re-running any setter, so
/// a field bound at load time is not refreshed; the snapshot is the source of
/// truth for `get`.
///
/// # Examples
///
/// ```
/// use dotcfg::domain::{ConfigMap, ConfigValue, FieldRules, TypeRule, ValueKind};
/// use dotcfg::ports::{BindingRegistry, ConfigSchema};
/// use dotcfg::service::Configuration;
///
/// #[derive(Default)]
/// struct AppConfig {
///     name: String,
/// }
///
/// impl ConfigSchema for AppConfig {
///     fn validation_rules() -> FieldRules {
///         FieldRules::new().with("name", TypeRule::Primitive(ValueKind::Str))
///     }
///
///     fn bind(registry: &mut BindingRegistry<Self>) {
///         registry.field("name", |state, value| {
///             if let Some(name) = value.as_str() {
///                 state.name = name.to_string();
///             }
///         });
///     }
/// }
///
/// let mut supplied = ConfigMap::new();
/// supplied.insert("name", "demo");
///
/// let configuration = Configuration::<AppConfig>::new(supplied).unwrap();
/// assert_eq!(configuration.state().name, "demo");
/// assert_eq!(configuration.get("name").unwrap(), &ConfigValue::from("demo"));
/// ```
pub struct Configuration<S: ConfigSchema> {
    /// The raw merged configuration, source of truth for `get`/`has`/`set`.
    config: ConfigMap,
    /// The bound state, projected from the raw map at load time.
    state: S,
    /// Setter closures, built once from the schema at construction.
    registry: BindingRegistry<S>,
    rules: FieldRules,
    setter_maps: SetterMaps,
}

impl<S: ConfigSchema> std::fmt::Debug for Configuration<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("config", &self.config)
            .field("rules", &self.rules)
            .field("setter_maps", &self.setter_maps)
            .finish_non_exhaustive()
    }
}

impl<S: ConfigSchema> Configuration<S> {
    /// Builds a configuration from a supplied map.
    ///
    /// The schema's defaults are deep-merged under `supplied` and the result
    /// is loaded. Fails with [`ConfigError::TypeMismatch`] when a declared
    /// rule rejects a value.
    pub fn new(supplied: ConfigMap) -> Result<Self> {
        let mut effective = S::defaults();
        effective.merge(supplied);

        let mut registry = BindingRegistry::new();
        S::bind(&mut registry);

        let mut configuration = Configuration {
            config: ConfigMap::new(),
            state: S::default(),
            registry,
            rules: S::validation_rules(),
            setter_maps: S::setter_maps(),
        };
        configuration.load(effective)?;
        Ok(configuration)
    }

    /// Replaces the raw snapshot and re-projects the bound state.
    ///
    /// Every declared rule whose path resolves in `config` is validated
    /// before any field is bound; the first failure aborts the whole load.
    /// Fields absent from `config` keep their current value.
    pub fn load(&mut self, config: ConfigMap) -> Result<()> {
        self.config = config;

        for (path, rule) in self.rules.iter() {
            if let Some(value) = self.config.get(path) {
                rule.check(path, value)?;
            }
        }

        let Configuration {
            config,
            state,
            registry,
            setter_maps,
            ..
        } = self;
        for (key, value) in config.iter() {
            let Some(raw_key) = key.as_str() else {
                continue;
            };
            let id = to_camel_case(raw_key);
            match registry.resolve(&id, setter_maps) {
                Some(mutator) => {
                    debug!(field = %id, "binding configuration field");
                    mutator(state, value.clone());
                }
                None => {
                    trace!(field = %id, "no binding registered, kept in raw snapshot only");
                }
            }
        }
        Ok(())
    }

    /// Resolves a key or dot-path in the raw snapshot.
    ///
    /// Fails with [`ConfigError::KeyNotFound`] naming the path when it does
    /// not resolve; check [`has`](Configuration::has) first to treat a miss
    /// as normal control flow.
    pub fn get(&self, key: impl Into<ConfigKey>) -> Result<&ConfigValue> {
        let key = key.into();
        match self.config.get(key.clone()) {
            Some(value) => Ok(value),
            None => Err(ConfigError::KeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// Returns `true` if the key or dot-path resolves in the raw snapshot.
    pub fn has(&self, key: impl Into<ConfigKey>) -> bool {
        self.config.has(key)
    }

    /// Validates and writes a single value into the raw snapshot.
    ///
    /// Only the rule declared for the touched path is re-checked; a mismatch
    /// aborts without writing. The write updates the raw snapshot only: no
    /// setter is re-run and no bound field is refreshed, so `get` reflects
    /// the change while a field bound at load time keeps its old value.
    pub fn set(&mut self, key: impl Into<ConfigKey>, value: impl Into<ConfigValue>) -> Result<()> {
        let key = key.into();
        let value = value.into();

        if let Some(path) = key.as_str() {
            if let Some(rule) = self.rules.get(path) {
                rule.check(path, &value)?;
            }
        }

        debug!(key = %key, "updating raw configuration snapshot");
        self.config.set(key, value);
        Ok(())
    }

    /// The bound state as projected by the last `load`.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The raw configuration snapshot.
    pub fn raw(&self) -> &ConfigMap {
        &self.config
    }
}
