// SPDX-License-Identifier: MIT

//! Configuration map key type.
//!
//! This module provides the `ConfigKey` type used to address entries in a
//! [`ConfigMap`](crate::domain::ConfigMap). A key is either a string or an
//! integer index. String keys whose text is the canonical decimal form of an
//! integer normalize to index keys at construction time, the same
//! canonicalization the external key-value formats apply, so `"0"` and `0`
//! always address the same entry.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A key addressing one entry of a configuration map.
///
/// Index keys never participate in dot-path splitting: a lookup with an
/// index key is always a direct top-level lookup. See
/// [`ConfigMap::get`](crate::domain::ConfigMap::get).
///
/// # Examples
///
/// ```
/// use dotcfg::domain::ConfigKey;
///
/// let key = ConfigKey::from("database.host");
/// assert_eq!(key.as_str(), Some("database.host"));
///
/// // Canonical integer text normalizes to an index key.
/// assert_eq!(ConfigKey::from("7"), ConfigKey::from(7));
/// assert_eq!(ConfigKey::from("07"), ConfigKey::Str("07".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// A string key, the common case for named configuration entries.
    Str(String),
    /// An integer index key, as produced by sequence-like external data.
    Index(i64),
}

impl ConfigKey {
    /// Returns the key as a string slice, or `None` for index keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotcfg::domain::ConfigKey;
    ///
    /// assert_eq!(ConfigKey::from("app.name").as_str(), Some("app.name"));
    /// assert_eq!(ConfigKey::from(3).as_str(), None);
    /// ```
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigKey::Str(s) => Some(s),
            ConfigKey::Index(_) => None,
        }
    }

    /// Returns `true` if this is an index key.
    pub fn is_index(&self) -> bool {
        matches!(self, ConfigKey::Index(_))
    }

    /// Parses a string in canonical integer form, e.g. `"42"` or `"-3"`.
    ///
    /// Leading zeros, a leading `+` and surrounding whitespace all disqualify
    /// the string, so only text that round-trips exactly is treated as an
    /// index.
    fn canonical_index(s: &str) -> Option<i64> {
        let n: i64 = s.parse().ok()?;
        if n.to_string() == s {
            Some(n)
        } else {
            None
        }
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        match ConfigKey::canonical_index(s) {
            Some(n) => ConfigKey::Index(n),
            None => ConfigKey::Str(s.to_string()),
        }
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        match ConfigKey::canonical_index(&s) {
            Some(n) => ConfigKey::Index(n),
            None => ConfigKey::Str(s),
        }
    }
}

impl From<&String> for ConfigKey {
    fn from(s: &String) -> Self {
        ConfigKey::from(s.as_str())
    }
}

impl From<i64> for ConfigKey {
    fn from(n: i64) -> Self {
        ConfigKey::Index(n)
    }
}

impl From<i32> for ConfigKey {
    fn from(n: i32) -> Self {
        ConfigKey::Index(i64::from(n))
    }
}

impl From<u32> for ConfigKey {
    fn from(n: u32) -> Self {
        ConfigKey::Index(i64::from(n))
    }
}

impl From<&ConfigKey> for ConfigKey {
    fn from(key: &ConfigKey) -> Self {
        key.clone()
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigKey::Str(s) => write!(f, "{s}"),
            ConfigKey::Index(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for ConfigKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigKey::Str(s) => serializer.serialize_str(s),
            ConfigKey::Index(n) => serializer.serialize_i64(*n),
        }
    }
}

impl<'de> Deserialize<'de> for ConfigKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = ConfigKey;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a string or integer map key")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(ConfigKey::from(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(ConfigKey::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ConfigKey::Index(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .map(ConfigKey::Index)
                    .map_err(|_| de::Error::custom("integer map key out of range"))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_key_from_str() {
        let key = ConfigKey::from("database.host");
        assert_eq!(key.as_str(), Some("database.host"));
        assert!(!key.is_index());
    }

    #[test]
    fn test_key_from_int() {
        let key = ConfigKey::from(5);
        assert_eq!(key, ConfigKey::Index(5));
        assert_eq!(key.as_str(), None);
        assert!(key.is_index());
    }

    #[test]
    fn test_numeric_string_normalizes_to_index() {
        assert_eq!(ConfigKey::from("0"), ConfigKey::Index(0));
        assert_eq!(ConfigKey::from("42"), ConfigKey::Index(42));
        assert_eq!(ConfigKey::from("-3"), ConfigKey::Index(-3));
    }

    #[test]
    fn test_non_canonical_numeric_strings_stay_strings() {
        assert_eq!(ConfigKey::from("007"), ConfigKey::Str("007".to_string()));
        assert_eq!(ConfigKey::from("+1"), ConfigKey::Str("+1".to_string()));
        assert_eq!(ConfigKey::from(" 1"), ConfigKey::Str(" 1".to_string()));
        assert_eq!(ConfigKey::from("1.5"), ConfigKey::Str("1.5".to_string()));
        assert_eq!(ConfigKey::from("-0"), ConfigKey::Str("-0".to_string()));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(ConfigKey::from("app.name").to_string(), "app.name");
        assert_eq!(ConfigKey::from(12).to_string(), "12");
    }

    #[test]
    fn test_key_hash_lookup() {
        let mut map = HashMap::new();
        map.insert(ConfigKey::from("host"), "localhost");
        map.insert(ConfigKey::from(0), "first");

        assert_eq!(map.get(&ConfigKey::from("host")), Some(&"localhost"));
        assert_eq!(map.get(&ConfigKey::from("0")), Some(&"first"));
        assert_eq!(map.get(&ConfigKey::from("missing")), None);
    }

    #[test]
    fn test_key_equality() {
        assert_eq!(ConfigKey::from("a"), ConfigKey::from("a".to_string()));
        assert_ne!(ConfigKey::from("1x"), ConfigKey::from(1));
        assert_eq!(ConfigKey::from("1"), ConfigKey::from(1));
    }

    #[test]
    fn test_empty_key() {
        let key = ConfigKey::from("");
        assert_eq!(key.as_str(), Some(""));
    }
}
