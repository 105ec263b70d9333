// SPDX-License-Identifier: MIT

//! Validation rules for configuration fields.
//!
//! A [`TypeRule`] declares the expected shape of one configuration entry:
//! either a primitive [`ValueKind`], matched exactly with no coercion, or an
//! instance-of check against a concrete Rust type. [`FieldRules`] collects
//! rules keyed by dot-path into the raw configuration, with at most one rule
//! per path.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::value::{ConfigValue, ValueKind};
use indexmap::IndexMap;
use std::any::{Any, TypeId};

/// The expected type of a configuration entry.
///
/// # Examples
///
/// ```
/// use dotcfg::domain::{ConfigValue, TypeRule, ValueKind};
///
/// let rule = TypeRule::Primitive(ValueKind::Int);
/// assert!(rule.matches(&ConfigValue::from(10)));
/// assert!(!rule.matches(&ConfigValue::from(10.8)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeRule {
    /// The value's kind must equal the tag exactly. An integer value does not
    /// satisfy a float rule, or vice versa.
    Primitive(ValueKind),
    /// The value must be an instance of the given concrete type.
    InstanceOf {
        /// Type token compared against the instance's captured `TypeId`.
        id: TypeId,
        /// Type name used in error messages.
        name: &'static str,
    },
}

impl TypeRule {
    /// Builds an instance-of rule for a concrete type.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotcfg::domain::{ConfigValue, TypeRule};
    ///
    /// struct Endpoint;
    ///
    /// let rule = TypeRule::instance_of::<Endpoint>();
    /// assert!(rule.matches(&ConfigValue::instance(Endpoint)));
    /// assert!(!rule.matches(&ConfigValue::from(123)));
    /// ```
    pub fn instance_of<T: Any>() -> Self {
        TypeRule::InstanceOf {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns `true` if the value satisfies this rule.
    pub fn matches(&self, value: &ConfigValue) -> bool {
        match self {
            TypeRule::Primitive(kind) => value.kind() == *kind,
            TypeRule::InstanceOf { id, .. } => value
                .as_instance()
                .is_some_and(|instance| instance.type_id() == *id),
        }
    }

    /// The human-readable name of the expected type.
    pub fn expected(&self) -> String {
        match self {
            TypeRule::Primitive(kind) => kind.to_string(),
            TypeRule::InstanceOf { name, .. } => (*name).to_string(),
        }
    }

    /// Checks a value against this rule, producing the fatal
    /// [`ConfigError::TypeMismatch`] on failure.
    ///
    /// The error names the field, the expected type and the actual type of
    /// the offending value.
    pub fn check(&self, field: &str, value: &ConfigValue) -> Result<()> {
        if self.matches(value) {
            Ok(())
        } else {
            Err(ConfigError::TypeMismatch {
                field: field.to_string(),
                expected: self.expected(),
                actual: value.type_name(),
            })
        }
    }
}

/// Declared validation rules, keyed by dot-path into the raw configuration.
///
/// At most one rule per path; declaring a path twice keeps the later rule.
/// Rules for paths absent from a configuration are legal and simply skipped
/// at validation time.
///
/// # Examples
///
/// ```
/// use dotcfg::domain::{FieldRules, TypeRule, ValueKind};
///
/// let rules = FieldRules::new()
///     .with("a_int", TypeRule::Primitive(ValueKind::Int))
///     .with("d_arr.state", TypeRule::Primitive(ValueKind::Bool));
///
/// assert_eq!(rules.len(), 2);
/// assert!(rules.get("a_int").is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct FieldRules(IndexMap<String, TypeRule>);

impl FieldRules {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        FieldRules(IndexMap::new())
    }

    /// Adds a rule for a dot-path, replacing any earlier rule for it.
    pub fn with(mut self, path: impl Into<String>, rule: TypeRule) -> Self {
        self.0.insert(path.into(), rule);
        self
    }

    /// The rule declared for a path, if any.
    pub fn get(&self, path: &str) -> Option<&TypeRule> {
        self.0.get(path)
    }

    /// Iterates over the declared rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeRule)> {
        self.0.iter().map(|(path, rule)| (path.as_str(), rule))
    }

    /// The number of declared rules.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no rules are declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
