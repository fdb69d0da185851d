//! Tracing/logging initialization.
//!
//! `RUST_LOG` controls filtering (default `info`); `WIKI_LOG_FORMAT` selects
//! `json` (default) or `pretty` output.

use anyhow::{anyhow, Context};
use tracing_subscriber::EnvFilter;

pub const LOG_FORMAT_VAR: &str = "WIKI_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl core::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => Err(anyhow!("unknown log format '{other}' (expected json or pretty)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub filter: String,
    pub format: LogFormat,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::Json,
        }
    }
}

impl TracingConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(filter) = lookup(EnvFilter::DEFAULT_ENV) {
            config.filter = filter;
        }
        if let Some(format) = lookup(LOG_FORMAT_VAR) {
            config.format = format.parse().with_context(|| format!("reading {LOG_FORMAT_VAR}"))?;
        }
        Ok(config)
    }
}

/// Install a global subscriber for `config`.
///
/// Fails if the filter directive is invalid or a subscriber is already set.
pub fn try_init(config: &TracingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("invalid log filter '{}'", config.filter))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };

    installed.map_err(|e| anyhow!("tracing subscriber already installed: {e}"))
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops). A malformed
/// environment falls back to the defaults.
pub fn init() {
    let config = TracingConfig::from_env().unwrap_or_else(|e| {
        eprintln!("invalid logging configuration, using defaults: {e:#}");
        TracingConfig::default()
    });

    if try_init(&config).is_err() && config != TracingConfig::default() {
        let _ = try_init(&TracingConfig::default());
    }
}
