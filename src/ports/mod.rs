// SPDX-License-Identifier: MIT

//! Ports layer containing the schema contract.
//!
//! This module defines the interface a configuration type implements to be
//! bindable: the [`ConfigSchema`] trait with its override points, the
//! [`BindingRegistry`] of setter closures, and the [`SetterMaps`] custom
//! dispatch table. The service layer consumes these to drive binding.

pub mod schema;

// Re-export commonly used types
pub use schema::{BindingRegistry, ConfigSchema, Mutator, SetterMaps};
