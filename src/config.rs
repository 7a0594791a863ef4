use std::env;

use log::warn;

use crate::blockchain::{DEFAULT_DIFFICULTY, MAX_DIFFICULTY};

/// Node settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    pub difficulty: usize,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            difficulty: DEFAULT_DIFFICULTY,
        }
    }
}

impl NodeConfig {
    /// Load `.env` and read `HOST`, `PORT` and `DIFFICULTY`.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = parse_or("PORT", lookup("PORT"), defaults.port);
        let mut difficulty = parse_or("DIFFICULTY", lookup("DIFFICULTY"), defaults.difficulty);
        if difficulty > MAX_DIFFICULTY {
            warn!("DIFFICULTY {difficulty} too high for dev mode, capping at {MAX_DIFFICULTY}");
            difficulty = MAX_DIFFICULTY;
        }

        Self {
            host,
            port,
            difficulty,
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {key}={v:?}");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(NodeConfig::from_lookup(lookup(&[])), NodeConfig::default());
    }

    #[test]
    fn reads_values() {
        let cfg = NodeConfig::from_lookup(lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("DIFFICULTY", "2"),
        ]));
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.difficulty, 2);
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = NodeConfig::from_lookup(lookup(&[("PORT", "http"), ("DIFFICULTY", "-1")]));
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.difficulty, DEFAULT_DIFFICULTY);
    }

    #[test]
    fn difficulty_is_capped() {
        let cfg = NodeConfig::from_lookup(lookup(&[("DIFFICULTY", "40")]));
        assert_eq!(cfg.difficulty, MAX_DIFFICULTY);
    }
}
