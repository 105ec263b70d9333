// SPDX-License-Identifier: MIT

//! Nested configuration map with dot-path access.
//!
//! This module provides [`ConfigMap`], an insertion-ordered map of
//! [`ConfigKey`] to [`ConfigValue`] addressed by dot-separated paths. A path
//! like `"database.pool.size"` walks one nesting level per segment. Two rules
//! keep flat maps and sequence-style data fully usable:
//!
//! - A literal top-level key always wins over dot-splitting, even when the
//!   key itself contains dots. A map holding the verbatim key `"a.b"` returns
//!   that entry; the nested walk only runs on a literal miss.
//! - Index keys never participate in dot-splitting; they are only ever looked
//!   up directly at the top level.
//!
//! Lookups degrade to a miss when a segment is absent or the current node is
//! not indexable; they never fail. `set` and `forget` mutate the map in
//! place.

use crate::domain::key::ConfigKey;
use crate::domain::value::ConfigValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An insertion-ordered, dot-path addressable configuration map.
///
/// # Examples
///
/// ```
/// use dotcfg::domain::{ConfigMap, ConfigValue};
///
/// let mut map = ConfigMap::new();
/// map.set("database.host", "localhost");
/// map.set("database.port", 5432);
///
/// assert_eq!(map.get("database.port"), Some(&ConfigValue::from(5432)));
/// assert!(map.has("database"));
/// assert!(!map.has("database.user"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigMap(IndexMap<ConfigKey, ConfigValue>);

impl ConfigMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        ConfigMap(IndexMap::new())
    }

    /// The number of top-level entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the top-level entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ConfigKey, &ConfigValue)> {
        self.0.iter()
    }

    /// Inserts a value under a literal top-level key, without dot-splitting.
    ///
    /// Returns the previous value if the key was already present.
    pub fn insert(
        &mut self,
        key: impl Into<ConfigKey>,
        value: impl Into<ConfigValue>,
    ) -> Option<ConfigValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns `true` if the literal key is present at the top level.
    pub fn contains_key(&self, key: impl Into<ConfigKey>) -> bool {
        self.0.contains_key(&key.into())
    }

    /// Resolves a value by key or dot-path.
    ///
    /// A literal top-level match is returned first, even for keys containing
    /// embedded dots. Index keys are only looked up literally. Otherwise the
    /// path is split on `.` and walked segment by segment through nested maps
    /// and sequences; the first missing segment or non-indexable node yields
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotcfg::domain::{ConfigMap, ConfigValue};
    ///
    /// let mut map = ConfigMap::new();
    /// map.set("a.b", 1);
    /// map.insert("x.y", 2); // literal dotted key
    ///
    /// assert_eq!(map.get("a.b"), Some(&ConfigValue::from(1)));
    /// assert_eq!(map.get("x.y"), Some(&ConfigValue::from(2)));
    /// assert_eq!(map.get("a.missing"), None);
    /// ```
    pub fn get(&self, key: impl Into<ConfigKey>) -> Option<&ConfigValue> {
        let key = key.into();
        if let Some(found) = self.0.get(&key) {
            return Some(found);
        }

        let ConfigKey::Str(path) = key else {
            return None;
        };

        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut node = self.0.get(&ConfigKey::from(first))?;
        for segment in segments {
            node = index_into(node, segment)?;
        }
        Some(node)
    }

    /// Resolves a value like [`ConfigMap::get`] and clones it out of the map.
    pub fn get_cloned(&self, key: impl Into<ConfigKey>) -> Option<ConfigValue> {
        self.get(key).cloned()
    }

    /// Returns `true` if the key or dot-path resolves to a value.
    ///
    /// Same traversal as [`ConfigMap::get`], so a literal dotted key and an
    /// index key behave identically in both.
    pub fn has(&self, key: impl Into<ConfigKey>) -> bool {
        self.get(key).is_some()
    }

    /// Writes a value at a dot-path, creating intermediate maps as needed.
    ///
    /// Every intermediate segment that is absent, or present but not a map,
    /// is replaced by an empty map before descending. Index keys are inserted
    /// directly without splitting. The map is modified in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotcfg::domain::{ConfigMap, ConfigValue};
    ///
    /// let mut map = ConfigMap::new();
    /// map.set("server.tls.enabled", true);
    /// assert_eq!(map.get("server.tls.enabled"), Some(&ConfigValue::from(true)));
    /// ```
    pub fn set(&mut self, key: impl Into<ConfigKey>, value: impl Into<ConfigValue>) {
        let key = key.into();
        let value = value.into();

        let ConfigKey::Str(path) = key else {
            self.0.insert(key, value);
            return;
        };

        let mut segments: Vec<&str> = path.split('.').collect();
        let Some(last) = segments.pop() else {
            return;
        };

        let mut current = &mut self.0;
        for segment in segments {
            let slot = current
                .entry(ConfigKey::from(segment))
                .or_insert_with(|| ConfigValue::Map(ConfigMap::new()));
            if !matches!(slot, ConfigValue::Map(_)) {
                *slot = ConfigValue::Map(ConfigMap::new());
            }
            let ConfigValue::Map(next) = slot else {
                return;
            };
            current = &mut next.0;
        }
        current.insert(ConfigKey::from(last), value);
    }

    /// Removes each of the given keys, by literal key or dot-path.
    ///
    /// A literal top-level match is deleted directly. Otherwise a dotted path
    /// is walked through nested maps only; a missing or non-map intermediate
    /// skips that key. Deletions see the effect of earlier deletions in the
    /// same call. The map is modified in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotcfg::domain::ConfigMap;
    ///
    /// let mut map = ConfigMap::new();
    /// map.set("a.b", 1);
    /// map.set("a.c", 2);
    /// map.forget(["a.b", "a.c"]);
    ///
    /// assert!(map.has("a"));
    /// assert!(!map.has("a.b"));
    /// assert!(!map.has("a.c"));
    /// ```
    pub fn forget<I>(&mut self, keys: I)
    where
        I: IntoIterator,
        I::Item: Into<ConfigKey>,
    {
        for key in keys {
            let key = key.into();
            if self.0.shift_remove(&key).is_some() {
                continue;
            }

            let ConfigKey::Str(path) = key else {
                continue;
            };
            if !path.contains('.') {
                continue;
            }

            let mut segments: Vec<&str> = path.split('.').collect();
            let Some(last) = segments.pop() else {
                continue;
            };

            fn descend<'a>(
                map: &'a mut IndexMap<ConfigKey, ConfigValue>,
                segments: &[&str],
            ) -> Option<&'a mut IndexMap<ConfigKey, ConfigValue>> {
                match segments.split_first() {
                    None => Some(map),
                    Some((first, rest)) => match map.get_mut(&ConfigKey::from(*first)) {
                        Some(ConfigValue::Map(next)) => descend(&mut next.0, rest),
                        _ => None,
                    },
                }
            }

            if let Some(parent) = descend(&mut self.0, &segments) {
                parent.shift_remove(&ConfigKey::from(last));
            }
        }
    }

    /// Resolves a value, removes it from the map, and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotcfg::domain::{ConfigMap, ConfigValue};
    ///
    /// let mut map = ConfigMap::new();
    /// map.insert("token", "abc");
    ///
    /// assert_eq!(map.pull("token"), Some(ConfigValue::from("abc")));
    /// assert!(!map.has("token"));
    /// ```
    pub fn pull(&mut self, key: impl Into<ConfigKey>) -> Option<ConfigValue> {
        let key = key.into();
        let value = self.get(key.clone()).cloned();
        self.forget([key]);
        value
    }

    /// Returns a copy of the map with the given keys removed.
    pub fn except<I>(&self, keys: I) -> ConfigMap
    where
        I: IntoIterator,
        I::Item: Into<ConfigKey>,
    {
        let mut copy = self.clone();
        copy.forget(keys);
        copy
    }

    /// Deep-merges another map into this one; the other map wins.
    ///
    /// Keys are merged one by one: when both sides hold a map, the maps merge
    /// recursively; in every other case, including sequences and scalars, the
    /// incoming value replaces the existing one wholesale.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotcfg::domain::{ConfigMap, ConfigValue};
    ///
    /// let mut defaults = ConfigMap::new();
    /// defaults.set("db.host", "localhost");
    /// defaults.set("db.port", 5432);
    ///
    /// let mut supplied = ConfigMap::new();
    /// supplied.set("db.port", 6432);
    ///
    /// defaults.merge(supplied);
    /// assert_eq!(defaults.get("db.host"), Some(&ConfigValue::from("localhost")));
    /// assert_eq!(defaults.get("db.port"), Some(&ConfigValue::from(6432)));
    /// ```
    pub fn merge(&mut self, other: ConfigMap) {
        for (key, value) in other.0 {
            if let ConfigValue::Map(incoming) = value {
                if let Some(ConfigValue::Map(existing)) = self.0.get_mut(&key) {
                    existing.merge(incoming);
                    continue;
                }
                self.0.insert(key, ConfigValue::Map(incoming));
            } else {
                self.0.insert(key, value);
            }
        }
    }
}

impl IntoIterator for ConfigMap {
    type Item = (ConfigKey, ConfigValue);
    type IntoIter = indexmap::map::IntoIter<ConfigKey, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConfigMap {
    type Item = (&'a ConfigKey, &'a ConfigValue);
    type IntoIter = indexmap::map::Iter<'a, ConfigKey, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<ConfigKey>, V: Into<ConfigValue>> FromIterator<(K, V)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        ConfigMap(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Resolves a single path segment against a nested node.
///
/// Maps are indexed by the segment's canonical key; sequences only by a
/// non-negative in-range index. Scalars and instances are never indexable.
fn index_into<'a>(node: &'a ConfigValue, segment: &str) -> Option<&'a ConfigValue> {
    let key = ConfigKey::from(segment);
    match node {
        ConfigValue::Map(map) => map.0.get(&key),
        ConfigValue::Seq(items) => match key {
            ConfigKey::Index(i) => usize::try_from(i).ok().and_then(|i| items.get(i)),
            ConfigKey::Str(_) => None,
        },
        _ => None,
    }
}
