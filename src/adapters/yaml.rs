// SPDX-License-Identifier: MIT

//! YAML source adapter.
//!
//! Parses a YAML document into a [`ConfigMap`]. The document's top level must
//! be a mapping. Integer-form mapping keys become index keys; everything else
//! maps onto the corresponding [`ConfigValue`](crate::domain::ConfigValue)
//! variant.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::map::ConfigMap;
use tracing::debug;

/// Parses a YAML document into a configuration map.
///
/// # Examples
///
/// ```
/// use dotcfg::adapters::yaml;
/// use dotcfg::domain::ConfigValue;
///
/// let map = yaml::from_str("database:\n  host: localhost\n  port: 5432\n").unwrap();
/// assert_eq!(map.get("database.host"), Some(&ConfigValue::from("localhost")));
/// assert_eq!(map.get("database.port"), Some(&ConfigValue::from(5432)));
/// ```
pub fn from_str(document: &str) -> Result<ConfigMap> {
    let map: ConfigMap = serde_yaml::from_str(document).map_err(|e| ConfigError::Parse {
        message: e.to_string(),
        source: Some(Box::new(e)),
    })?;
    debug!(entries = map.len(), "parsed YAML configuration document");
    Ok(map)
}

/// Serializes a configuration map back to a YAML document.
///
/// Fails with [`ConfigError::Serialize`] when the map contains instance
/// values, which have no document representation.
pub fn to_string(map: &ConfigMap) -> Result<String> {
    serde_yaml::to_string(map).map_err(|e| ConfigError::Serialize {
        message: e.to_string(),
        source: Some(Box::new(e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConfigValue, ValueKind};

    #[test]
    fn test_parse_nested_document() {
        let map = from_str(
            "app:\n  name: demo\n  debug: true\nretries: 3\nratio: 0.5\ntags:\n  - a\n  - b\n",
        )
        .unwrap();

        assert_eq!(map.get("app.name"), Some(&ConfigValue::from("demo")));
        assert_eq!(map.get("app.debug"), Some(&ConfigValue::from(true)));
        assert_eq!(map.get("retries"), Some(&ConfigValue::from(3)));
        assert_eq!(map.get("ratio"), Some(&ConfigValue::from(0.5)));
        assert_eq!(map.get("tags.1"), Some(&ConfigValue::from("b")));
    }

    #[test]
    fn test_parse_null_value() {
        let map = from_str("optional: null\n").unwrap();
        assert_eq!(map.get("optional"), Some(&ConfigValue::Null));
    }

    #[test]
    fn test_parse_integer_keys() {
        let map = from_str("0: four\n1: five\n").unwrap();
        assert_eq!(map.get(0), Some(&ConfigValue::from("four")));
        assert_eq!(map.get("1"), Some(&ConfigValue::from("five")));
    }

    #[test]
    fn test_non_mapping_document_fails() {
        let err = from_str("- just\n- a\n- list\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_round_trip() {
        let map = from_str("a:\n  b: 1\n").unwrap();
        let document = to_string(&map).unwrap();
        assert_eq!(from_str(&document).unwrap(), map);
    }

    #[test]
    fn test_instance_values_do_not_serialize() {
        let mut map = ConfigMap::new();
        map.insert("obj", ConfigValue::instance(42u64));
        assert_eq!(map.get("obj").map(ConfigValue::kind), Some(ValueKind::Instance));

        let err = to_string(&map).unwrap_err();
        assert!(matches!(err, ConfigError::Serialize { .. }));
    }
}
