use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use portal_core::{RetryPolicy, SimulatedRetriever};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "portal.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_filter: String,
    pub catalog_path: Option<PathBuf>,
    pub retrieval_timeout_ms: u64,
    pub retrieval_max_attempts: u32,
    pub retrieval_retry_delay_ms: u64,
    pub simulated_delay_ms: u64,
    pub simulated_failure_rate: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            catalog_path: None,
            retrieval_timeout_ms: 5_000,
            retrieval_max_attempts: 2,
            retrieval_retry_delay_ms: 250,
            simulated_delay_ms: 1_000,
            simulated_failure_rate: 0.0,
        }
    }
}

impl Settings {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            timeout: Duration::from_millis(self.retrieval_timeout_ms),
            max_attempts: self.retrieval_max_attempts,
            retry_delay: Duration::from_millis(self.retrieval_retry_delay_ms),
        }
    }

    pub fn retriever(&self) -> SimulatedRetriever {
        SimulatedRetriever::new(Duration::from_millis(self.simulated_delay_ms))
            .with_failure_rate(self.simulated_failure_rate)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    log_filter: Option<String>,
    catalog_path: Option<PathBuf>,
    retrieval_timeout_ms: Option<u64>,
    retrieval_max_attempts: Option<u32>,
    retrieval_retry_delay_ms: Option<u64>,
    simulated_delay_ms: Option<u64>,
    simulated_failure_rate: Option<f64>,
}

/// Defaults, then `portal.toml` (or `explicit_path`), then `APP__*` variables.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    let path = explicit_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    let raw = match fs::read_to_string(path) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == ErrorKind::NotFound && explicit_path.is_none() => None,
        Err(err) => {
            return Err(err).with_context(|| {
                format!("failed to read config file '{}'", path.display())
            })
        }
    };

    let mut settings = Settings::default();
    if let Some(raw) = raw {
        apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?;
    }
    apply_env(&mut settings, |name| std::env::var(name).ok());
    Ok(normalize(settings))
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    if let Some(v) = file_cfg.catalog_path {
        settings.catalog_path = Some(v);
    }
    if let Some(v) = file_cfg.retrieval_timeout_ms {
        settings.retrieval_timeout_ms = v;
    }
    if let Some(v) = file_cfg.retrieval_max_attempts {
        settings.retrieval_max_attempts = v;
    }
    if let Some(v) = file_cfg.retrieval_retry_delay_ms {
        settings.retrieval_retry_delay_ms = v;
    }
    if let Some(v) = file_cfg.simulated_delay_ms {
        settings.simulated_delay_ms = v;
    }
    if let Some(v) = file_cfg.simulated_failure_rate {
        settings.simulated_failure_rate = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
    if let Some(v) = var("APP__CATALOG_PATH") {
        settings.catalog_path = Some(PathBuf::from(v));
    }
    if let Some(parsed) = parse_var(&var, "APP__RETRIEVAL_TIMEOUT_MS") {
        settings.retrieval_timeout_ms = parsed;
    }
    if let Some(parsed) = parse_var(&var, "APP__RETRIEVAL_MAX_ATTEMPTS") {
        settings.retrieval_max_attempts = parsed;
    }
    if let Some(parsed) = parse_var(&var, "APP__RETRIEVAL_RETRY_DELAY_MS") {
        settings.retrieval_retry_delay_ms = parsed;
    }
    if let Some(parsed) = parse_var(&var, "APP__SIMULATED_DELAY_MS") {
        settings.simulated_delay_ms = parsed;
    }
    if let Some(parsed) = parse_var(&var, "APP__SIMULATED_FAILURE_RATE") {
        settings.simulated_failure_rate = parsed;
    }
}

fn parse_var<T: std::str::FromStr>(var: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    var(name).and_then(|v| v.trim().parse::<T>().ok())
}

fn normalize(mut settings: Settings) -> Settings {
    settings.retrieval_max_attempts = settings.retrieval_max_attempts.max(1);
    settings.simulated_failure_rate = if settings.simulated_failure_rate.is_nan() {
        0.0
    } else {
        settings.simulated_failure_rate.clamp(0.0, 1.0)
    };
    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
