// SPDX-License-Identifier: MIT

//! Adapters layer containing source-format parsers.
//!
//! This module contains the adapters that turn external configuration
//! documents into [`ConfigMap`](crate::domain::ConfigMap) values ready for
//! the binder. Each adapter is gated behind its feature flag.

#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "yaml")]
pub mod yaml;
