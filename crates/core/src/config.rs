//! Engine configuration, read from the environment.

use crate::error::{CoreError, CoreResult};
use crate::name::ApplicationName;

pub const APPLICATION_NAME_VAR: &str = "WIKI_APPLICATION_NAME";
pub const MATCH_ENGLISH_PLURALS_VAR: &str = "WIKI_MATCH_ENGLISH_PLURALS";

const DEFAULT_APPLICATION_NAME: &str = "JSPWiki";

/// Settings shared by request handling and access control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Identity that application-wide and administrative permissions are scoped to.
    pub application: ApplicationName,
    /// Whether page-name resolution tries singular/plural variants.
    pub match_english_plurals: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            application: ApplicationName::new(DEFAULT_APPLICATION_NAME),
            match_english_plurals: true,
        }
    }
}

impl EngineConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(APPLICATION_NAME_VAR) {
            config.application = ApplicationName::parse(&raw)
                .map_err(|e| CoreError::config(format!("{APPLICATION_NAME_VAR}: {e}")))?;
        }

        if let Some(raw) = lookup(MATCH_ENGLISH_PLURALS_VAR) {
            config.match_english_plurals = parse_bool(&raw).ok_or_else(|| {
                CoreError::config(format!(
                    "{MATCH_ENGLISH_PLURALS_VAR}: expected true/false, got '{raw}'"
                ))
            })?;
        }

        Ok(config)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = EngineConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.application.as_str(), "JSPWiki");
        assert!(config.match_english_plurals);
    }

    #[test]
    fn reads_overrides() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            (APPLICATION_NAME_VAR, "TeamWiki"),
            (MATCH_ENGLISH_PLURALS_VAR, "off"),
        ]))
        .unwrap();
        assert_eq!(config.application.as_str(), "TeamWiki");
        assert!(!config.match_english_plurals);
    }

    #[test]
    fn rejects_invalid_values() {
        let err = EngineConfig::from_lookup(lookup_from(&[(MATCH_ENGLISH_PLURALS_VAR, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));

        let err = EngineConfig::from_lookup(lookup_from(&[(APPLICATION_NAME_VAR, " ")])).unwrap_err();
        assert!(matches!(err, CoreError::Config(msg) if msg.starts_with(APPLICATION_NAME_VAR)));
    }
}
