// SPDX-License-Identifier: MIT

//! JSON source adapter.
//!
//! Parses a JSON document into a [`ConfigMap`]. The document's top level must
//! be an object. JSON object keys are strings; keys in canonical integer form
//! become index keys, matching the map's key normalization.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::map::ConfigMap;
use tracing::debug;

/// Parses a JSON document into a configuration map.
///
/// # Examples
///
/// ```
/// use dotcfg::adapters::json;
/// use dotcfg::domain::ConfigValue;
///
/// let map = json::from_str(r#"{"app": {"name": "demo"}, "retries": 3}"#).unwrap();
/// assert_eq!(map.get("app.name"), Some(&ConfigValue::from("demo")));
/// assert_eq!(map.get("retries"), Some(&ConfigValue::from(3)));
/// ```
pub fn from_str(document: &str) -> Result<ConfigMap> {
    let map: ConfigMap = serde_json::from_str(document).map_err(|e| ConfigError::Parse {
        message: e.to_string(),
        source: Some(Box::new(e)),
    })?;
    debug!(entries = map.len(), "parsed JSON configuration document");
    Ok(map)
}

/// Serializes a configuration map back to a JSON document.
///
/// Fails with [`ConfigError::Serialize`] when the map contains instance
/// values, which have no document representation.
pub fn to_string(map: &ConfigMap) -> Result<String> {
    serde_json::to_string(map).map_err(|e| ConfigError::Serialize {
        message: e.to_string(),
        source: Some(Box::new(e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigValue;

    #[test]
    fn test_parse_nested_document() {
        let map = from_str(
            r#"{"db": {"pool": {"size": 10}}, "debug": false, "ratio": 1.5, "tags": ["x", "y"]}"#,
        )
        .unwrap();

        assert_eq!(map.get("db.pool.size"), Some(&ConfigValue::from(10)));
        assert_eq!(map.get("debug"), Some(&ConfigValue::from(false)));
        assert_eq!(map.get("ratio"), Some(&ConfigValue::from(1.5)));
        assert_eq!(map.get("tags.0"), Some(&ConfigValue::from("x")));
    }

    #[test]
    fn test_numeric_string_keys_normalize() {
        let map = from_str(r#"{"0": 4, "1": 5, "a": {"b": 1}}"#).unwrap();
        assert_eq!(map.get(0), Some(&ConfigValue::from(4)));
        assert_eq!(map.get("a.b"), Some(&ConfigValue::from(1)));
    }

    #[test]
    fn test_non_object_document_fails() {
        let err = from_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_malformed_document_fails() {
        let err = from_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_round_trip() {
        let map = from_str(r#"{"a": {"b": [1, 2]}, "c": null}"#).unwrap();
        let document = to_string(&map).unwrap();
        assert_eq!(from_str(&document).unwrap(), map);
    }
}
