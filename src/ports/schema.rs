// SPDX-License-Identifier: MIT

//! Schema trait and binding registry.
//!
//! A [`ConfigSchema`] declares everything the binder needs to turn a raw
//! [`ConfigMap`](crate::domain::ConfigMap) into a typed value: default
//! configuration, validation rules, a custom setter map, and the registry of
//! setter closures that replaces reflective field assignment. The registry is
//! built once per [`Configuration`](crate::service::Configuration) at
//! construction time.

use crate::domain::casing::to_snake_case;
use crate::domain::map::ConfigMap;
use crate::domain::rules::FieldRules;
use crate::domain::value::ConfigValue;
use std::collections::HashMap;

/// A setter closure applied to the bound state for one configuration field.
pub type Mutator<S> = Box<dyn Fn(&mut S, ConfigValue) + Send + Sync>;

/// The registry of setters and field slots for a schema `S`.
///
/// Two tables back the three-tier resolution the binder performs for every
/// top-level configuration key:
///
/// 1. a custom setter named by the schema's [`SetterMaps`] entry for the
///    field,
/// 2. the conventionally named setter `set_<snake_case(field)>`,
/// 3. the direct field slot registered under the field identifier.
///
/// Setters registered with [`setter`](BindingRegistry::setter) serve tiers
/// one and two; slots registered with [`field`](BindingRegistry::field) serve
/// tier three.
///
/// # Examples
///
/// ```
/// use dotcfg::ports::BindingRegistry;
///
/// #[derive(Default)]
/// struct AppConfig {
///     host: String,
/// }
///
/// let mut registry: BindingRegistry<AppConfig> = BindingRegistry::new();
/// registry.field("host", |state, value| {
///     if let Some(host) = value.as_str() {
///         state.host = host.to_string();
///     }
/// });
/// ```
pub struct BindingRegistry<S> {
    setters: HashMap<String, Mutator<S>>,
    fields: HashMap<String, Mutator<S>>,
}

impl<S> BindingRegistry<S> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        BindingRegistry {
            setters: HashMap::new(),
            fields: HashMap::new(),
        }
    }

    /// Registers a named setter.
    ///
    /// A setter participates in resolution when a [`SetterMaps`] entry names
    /// it, or when its name is the conventional `set_<snake_case(field)>` for
    /// a bound field.
    pub fn setter(
        &mut self,
        name: impl Into<String>,
        mutator: impl Fn(&mut S, ConfigValue) + Send + Sync + 'static,
    ) -> &mut Self {
        self.setters.insert(name.into(), Box::new(mutator));
        self
    }

    /// Registers a direct field slot under its camelCase field identifier.
    ///
    /// The default slot closure simply moves the value into the state; it is
    /// only used when no custom or conventional setter resolves first.
    pub fn field(
        &mut self,
        id: impl Into<String>,
        mutator: impl Fn(&mut S, ConfigValue) + Send + Sync + 'static,
    ) -> &mut Self {
        self.fields.insert(id.into(), Box::new(mutator));
        self
    }

    /// Resolves the mutator for a camelCase field identifier.
    ///
    /// Resolution order: custom setter from `setter_maps`, then the
    /// conventional `set_<snake_case(id)>` setter, then the direct field
    /// slot. A custom mapping naming an unregistered setter falls through to
    /// the remaining tiers.
    pub fn resolve(&self, id: &str, setter_maps: &SetterMaps) -> Option<&Mutator<S>> {
        if let Some(name) = setter_maps.get(id) {
            if let Some(custom) = self.setters.get(name) {
                return Some(custom);
            }
        }
        if let Some(conventional) = self.setters.get(&format!("set_{}", to_snake_case(id))) {
            return Some(conventional);
        }
        self.fields.get(id)
    }

    /// The number of registered setters and field slots.
    pub fn len(&self) -> usize {
        self.setters.len() + self.fields.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.setters.is_empty() && self.fields.is_empty()
    }
}

impl<S> Default for BindingRegistry<S> {
    fn default() -> Self {
        BindingRegistry::new()
    }
}

/// Mapping from camelCase field identifiers to custom setter names.
///
/// # Examples
///
/// ```
/// use dotcfg::ports::SetterMaps;
///
/// let maps = SetterMaps::new().with("dArr", "set_array");
/// assert_eq!(maps.get("dArr"), Some("set_array"));
/// assert_eq!(maps.get("other"), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SetterMaps(HashMap<String, String>);

impl SetterMaps {
    /// Creates an empty setter map.
    pub fn new() -> Self {
        SetterMaps(HashMap::new())
    }

    /// Maps a field identifier to a setter name.
    pub fn with(mut self, field: impl Into<String>, setter: impl Into<String>) -> Self {
        self.0.insert(field.into(), setter.into());
        self
    }

    /// The setter name mapped to a field identifier, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// The number of mapped fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no fields are mapped.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Declarative description of a bindable configuration type.
///
/// Every method is an override point with an empty default, so a minimal
/// schema is just `impl ConfigSchema for T {}` on a `Default` type: nothing
/// validates, nothing binds, and all supplied values stay in the raw
/// snapshot.
///
/// # Examples
///
/// ```
/// use dotcfg::domain::{ConfigMap, FieldRules, TypeRule, ValueKind};
/// use dotcfg::ports::{BindingRegistry, ConfigSchema};
/// use dotcfg::service::Configuration;
///
/// #[derive(Default)]
/// struct AppConfig {
///     timeout: i64,
/// }
///
/// impl ConfigSchema for AppConfig {
///     fn defaults() -> ConfigMap {
///         let mut defaults = ConfigMap::new();
///         defaults.insert("timeout", 30);
///         defaults
///     }
///
///     fn validation_rules() -> FieldRules {
///         FieldRules::new().with("timeout", TypeRule::Primitive(ValueKind::Int))
///     }
///
///     fn bind(registry: &mut BindingRegistry<Self>) {
///         registry.field("timeout", |state, value| {
///             if let Some(timeout) = value.as_i64() {
///                 state.timeout = timeout;
///             }
///         });
///     }
/// }
///
/// let configuration = Configuration::<AppConfig>::new(ConfigMap::new()).unwrap();
/// assert_eq!(configuration.state().timeout, 30);
/// ```
pub trait ConfigSchema: Default {
    /// The default configuration, merged under the supplied configuration at
    /// construction time. Supplied keys win on conflict at every level.
    fn defaults() -> ConfigMap {
        ConfigMap::new()
    }

    /// The declared validation rules, keyed by dot-path into the raw
    /// configuration.
    fn validation_rules() -> FieldRules {
        FieldRules::new()
    }

    /// Custom setter dispatch, keyed by camelCase field identifier.
    fn setter_maps() -> SetterMaps {
        SetterMaps::new()
    }

    /// Registers the schema's setters and field slots.
    fn bind(_registry: &mut BindingRegistry<Self>) {}
}
