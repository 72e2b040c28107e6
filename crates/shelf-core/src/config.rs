#![forbid(unsafe_code)]

//! Engine-wide defaults, optionally overridden from the environment.
//!
//! | Variable               | Field            | Default |
//! |------------------------|------------------|---------|
//! | `SHELF_THRESHOLD`      | `threshold`      | `0.3`   |
//! | `SHELF_OVERSCAN`       | `overscan`       | `3`     |
//! | `SHELF_WRAP`           | `wrap`           | `true`  |
//! | `SHELF_CASE_SENSITIVE` | `case_sensitive` | `false` |
//! | `SHELF_MEMO_CAPACITY`  | `memo_capacity`  | `32`    |

use crate::error::ConfigError;

/// Default similarity threshold for single-key search.
pub const DEFAULT_THRESHOLD: f64 = 0.3;
/// Default overscan (items or rows beyond the viewport on each side).
pub const DEFAULT_OVERSCAN: usize = 3;
/// Default number of memoized query results.
pub const DEFAULT_MEMO_CAPACITY: usize = 32;

/// Engine defaults shared by search, windowing, and navigation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Minimum single-key similarity for a record to be kept.
    pub threshold: f64,
    /// Overscan for virtual windows.
    pub overscan: usize,
    /// Whether navigation wraps at the collection ends.
    pub wrap: bool,
    /// Whether search compares text without case folding.
    pub case_sensitive: bool,
    /// Number of recent queries the memoizing ranker keeps.
    pub memo_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            overscan: DEFAULT_OVERSCAN,
            wrap: true,
            case_sensitive: false,
            memo_capacity: DEFAULT_MEMO_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("SHELF_THRESHOLD") {
            config.threshold = match raw.trim().parse::<f64>() {
                Ok(v) if (0.0..=1.0).contains(&v) => v,
                _ => return Err(invalid("SHELF_THRESHOLD", raw)),
            };
        }
        if let Some(raw) = lookup("SHELF_OVERSCAN") {
            config.overscan = raw
                .trim()
                .parse()
                .map_err(|_| invalid("SHELF_OVERSCAN", raw.clone()))?;
        }
        if let Some(raw) = lookup("SHELF_WRAP") {
            config.wrap = parse_bool(&raw).ok_or_else(|| invalid("SHELF_WRAP", raw.clone()))?;
        }
        if let Some(raw) = lookup("SHELF_CASE_SENSITIVE") {
            config.case_sensitive =
                parse_bool(&raw).ok_or_else(|| invalid("SHELF_CASE_SENSITIVE", raw.clone()))?;
        }
        if let Some(raw) = lookup("SHELF_MEMO_CAPACITY") {
            config.memo_capacity = raw
                .trim()
                .parse()
                .map_err(|_| invalid("SHELF_MEMO_CAPACITY", raw.clone()))?;
        }

        crate::debug!(?config, "engine config resolved");
        Ok(config)
    }
}

fn invalid(key: &'static str, value: String) -> ConfigError {
    ConfigError::InvalidEnv { key, value }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        v if v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes") => {
            Some(true)
        }
        v if v == "0" || v.eq_ignore_ascii_case("false") || v.eq_ignore_ascii_case("no") => {
            Some(false)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unset_keys_keep_defaults() {
        let config = EngineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("SHELF_THRESHOLD", "0.5"),
            ("SHELF_OVERSCAN", " 5 "),
            ("SHELF_WRAP", "false"),
            ("SHELF_CASE_SENSITIVE", "YES"),
            ("SHELF_MEMO_CAPACITY", "0"),
        ]))
        .unwrap();
        assert_eq!(config.threshold, 0.5);
        assert_eq!(config.overscan, 5);
        assert!(!config.wrap);
        assert!(config.case_sensitive);
        assert_eq!(config.memo_capacity, 0);
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let err = EngineConfig::from_lookup(lookup(&[("SHELF_THRESHOLD", "1.5")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnv {
                key: "SHELF_THRESHOLD",
                value: "1.5".into()
            }
        );
    }

    #[test]
    fn garbage_bool_is_rejected() {
        assert!(EngineConfig::from_lookup(lookup(&[("SHELF_WRAP", "maybe")])).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{ "overscan": 8 }"#).unwrap();
        assert_eq!(config.overscan, 8);
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
    }
}
