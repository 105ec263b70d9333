// SPDX-License-Identifier: MIT

//! Domain layer containing the core configuration types.
//!
//! This module holds the nested map, its key and value types, the casing
//! conversions, the validation rules and the error types. It is independent
//! of any external concerns and is what the ports, service and adapters
//! layers are built from.

pub mod casing;
pub mod errors;
pub mod key;
pub mod map;
pub mod rules;
pub mod value;

// Re-export commonly used types
pub use casing::{to_camel_case, to_snake_case};
pub use errors::{ConfigError, Result};
pub use key::ConfigKey;
pub use map::ConfigMap;
pub use rules::{FieldRules, TypeRule};
pub use value::{ConfigValue, Instance, ValueKind};
