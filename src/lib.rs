// SPDX-License-Identifier: MIT

//! Declarative configuration binding over dot-notation nested maps.
//!
//! This crate provides two pieces that work together: a generic nested
//! key-value map addressed by dot-separated paths, and a binder that projects
//! such a map onto a typed Rust value with declared per-field validation
//! rules and custom setter dispatch.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: the nested map and its access semantics (`ConfigMap`,
//!   `ConfigKey`, `ConfigValue`), validation rules, casing conversion, errors
//! - **Ports**: the `ConfigSchema` trait a bindable type implements, and the
//!   `BindingRegistry` of setter closures it populates
//! - **Service**: `Configuration`, the binder that validates and projects a
//!   raw map onto the schema type
//! - **Adapters**: parsers turning YAML/JSON documents into maps
//!
//! # Access semantics
//!
//! Dot-paths walk one nesting level per segment, with two deliberate
//! precedence rules: a literal top-level key always wins over dot-splitting
//! (even when the key contains dots), and integer index keys are only ever
//! looked up directly. Lookups degrade to a miss instead of failing.
//!
//! # Feature Flags
//!
//! - `yaml`: YAML document adapter (default)
//! - `json`: JSON document adapter (default)
//! - `full`: all adapters
//!
//! # Quick Start
//!
//! ```rust
//! use dotcfg::prelude::*;
//!
//! #[derive(Default)]
//! struct AppConfig {
//!     workers: i64,
//! }
//!
//! impl ConfigSchema for AppConfig {
//!     fn defaults() -> ConfigMap {
//!         let mut defaults = ConfigMap::new();
//!         defaults.insert("workers", 4);
//!         defaults
//!     }
//!
//!     fn validation_rules() -> FieldRules {
//!         FieldRules::new().with("workers", TypeRule::Primitive(ValueKind::Int))
//!     }
//!
//!     fn bind(registry: &mut BindingRegistry<Self>) {
//!         registry.field("workers", |state, value| {
//!             if let Some(workers) = value.as_i64() {
//!                 state.workers = workers;
//!             }
//!         });
//!     }
//! }
//!
//! # fn main() -> dotcfg::domain::Result<()> {
//! let mut supplied = ConfigMap::new();
//! supplied.set("log.level", "debug");
//!
//! let configuration = Configuration::<AppConfig>::new(supplied)?;
//! assert_eq!(configuration.state().workers, 4);
//! assert_eq!(configuration.get("log.level")?, &ConfigValue::from("debug"));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        to_camel_case, to_snake_case, ConfigError, ConfigKey, ConfigMap, ConfigValue, FieldRules,
        Instance, Result, TypeRule, ValueKind,
    };
    pub use crate::ports::{BindingRegistry, ConfigSchema, SetterMaps};
    pub use crate::service::Configuration;
}
