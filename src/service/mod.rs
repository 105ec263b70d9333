// SPDX-License-Identifier: MIT

//! Service layer containing the configuration binder.
//!
//! This module contains [`Configuration`], the concrete binder that projects
//! a raw nested map onto a typed schema value and serves dot-path reads and
//! writes against the raw snapshot.

pub mod binder;

// Re-export commonly used types
pub use binder::Configuration;
