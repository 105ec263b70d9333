// SPDX-License-Identifier: MIT

//! Key casing conversion.
//!
//! External configuration keys conventionally use `snake_case` or
//! `kebab-case`, while bound field identifiers use `camelCase`. The
//! conversions here are called once per supplied key on every load, so both
//! directions are memoized in process-wide caches. The caches are append-only
//! lookup tables, safe for concurrent read and insert, and are never evicted.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;

/// A process-wide, append-only memo table for string conversions.
struct CaseCache {
    entries: RwLock<HashMap<String, String>>,
}

impl CaseCache {
    fn new() -> Self {
        CaseCache {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached conversion for `input`, computing and storing it on
    /// first use. A poisoned lock degrades to recomputing.
    fn get_or_compute(&self, input: &str, compute: impl FnOnce(&str) -> String) -> String {
        if let Ok(entries) = self.entries.read() {
            if let Some(found) = entries.get(input) {
                return found.clone();
            }
        }
        let computed = compute(input);
        if let Ok(mut entries) = self.entries.write() {
            entries
                .entry(input.to_string())
                .or_insert_with(|| computed.clone());
        }
        computed
    }
}

static CAMEL_CACHE: Lazy<CaseCache> = Lazy::new(CaseCache::new);
static SNAKE_CACHE: Lazy<CaseCache> = Lazy::new(CaseCache::new);

/// Converts a `snake_case` or `kebab-case` key to `camelCase`.
///
/// The key is split on `_` and `-`, each segment after the first is
/// title-cased, and the leading character of the result is lowercased.
/// Results are memoized process-wide.
///
/// # Examples
///
/// ```
/// use dotcfg::domain::to_camel_case;
///
/// assert_eq!(to_camel_case("a_int"), "aInt");
/// assert_eq!(to_camel_case("d_arr"), "dArr");
/// assert_eq!(to_camel_case("max-retry-count"), "maxRetryCount");
/// assert_eq!(to_camel_case("plain"), "plain");
/// ```
pub fn to_camel_case(value: &str) -> String {
    CAMEL_CACHE.get_or_compute(value, |v| {
        let mut studly = String::with_capacity(v.len());
        for segment in v.split(['_', '-']) {
            let mut chars = segment.chars();
            if let Some(first) = chars.next() {
                studly.extend(first.to_uppercase());
                studly.push_str(chars.as_str());
            }
        }
        let mut chars = studly.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => studly,
        }
    })
}

/// Converts a `camelCase` identifier to `snake_case`.
///
/// Whitespace is stripped, a `_` is inserted before every uppercase letter
/// that is not at the start, and the result is lowercased. Results are
/// memoized process-wide.
///
/// # Examples
///
/// ```
/// use dotcfg::domain::to_snake_case;
///
/// assert_eq!(to_snake_case("dArr"), "d_arr");
/// assert_eq!(to_snake_case("maxRetryCount"), "max_retry_count");
/// assert_eq!(to_snake_case("already_snake"), "already_snake");
/// ```
pub fn to_snake_case(value: &str) -> String {
    SNAKE_CACHE.get_or_compute(value, |v| {
        let mut out = String::with_capacity(v.len() + 4);
        for c in v.chars().filter(|c| !c.is_whitespace()) {
            if c.is_uppercase() {
                if !out.is_empty() {
                    out.push('_');
                }
                out.extend(c.to_lowercase());
            } else {
                out.push(c);
            }
        }
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_from_snake() {
        assert_eq!(to_camel_case("a_int"), "aInt");
        assert_eq!(to_camel_case("b_bool_null"), "bBoolNull");
        assert_eq!(to_camel_case("d_arr"), "dArr");
    }

    #[test]
    fn test_camel_from_kebab() {
        assert_eq!(to_camel_case("max-retry-count"), "maxRetryCount");
        assert_eq!(to_camel_case("mixed_and-both"), "mixedAndBoth");
    }

    #[test]
    fn test_camel_single_segment() {
        assert_eq!(to_camel_case("host"), "host");
        assert_eq!(to_camel_case("Host"), "host");
    }

    #[test]
    fn test_camel_empty_and_degenerate() {
        assert_eq!(to_camel_case(""), "");
        assert_eq!(to_camel_case("__"), "");
        assert_eq!(to_camel_case("_x"), "x");
    }

    #[test]
    fn test_snake_from_camel() {
        assert_eq!(to_snake_case("aInt"), "a_int");
        assert_eq!(to_snake_case("dArr"), "d_arr");
        assert_eq!(to_snake_case("maxRetryCount"), "max_retry_count");
    }

    #[test]
    fn test_snake_leaves_lowercase_alone() {
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("plain"), "plain");
    }

    #[test]
    fn test_snake_strips_whitespace() {
        assert_eq!(to_snake_case("some Value"), "some_value");
    }

    #[test]
    fn test_round_trip() {
        assert_eq!(to_snake_case(&to_camel_case("a_int")), "a_int");
        assert_eq!(to_camel_case(&to_snake_case("dArr")), "dArr");
    }

    #[test]
    fn test_memoized_calls_are_stable() {
        let first = to_camel_case("repeat_key");
        let second = to_camel_case("repeat_key");
        assert_eq!(first, second);
    }

    #[test]
    fn test_caches_are_shareable_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let key = format!("thread_key_{i}");
                    assert_eq!(to_camel_case(&key), format!("threadKey{i}"));
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().is_ok());
        }
    }
}
