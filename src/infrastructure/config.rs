use crate::application::update_strategy::StrategyKind;
use crate::domain::settings::{WindowSettings, DEFAULT_TRANSITION_FRACTION};
use crate::domain::viewport::Viewport;
use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct ScopeConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WindowConfig {
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_transition_fraction")]
    pub transition_fraction: f64,
    #[serde(default)]
    pub strategy: StrategyKind,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            interval_ms: default_interval_ms(),
            transition_fraction: default_transition_fraction(),
            strategy: StrategyKind::default(),
        }
    }
}

impl WindowConfig {
    pub fn settings(&self) -> anyhow::Result<WindowSettings> {
        WindowSettings::new(
            self.duration,
            Duration::from_millis(self.interval_ms),
            self.transition_fraction,
        )
        .context("Invalid [window] configuration")
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Http,
    #[default]
    Sim,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub keys: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub sim: SimConfig,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            url: default_url(),
            keys: None,
            timeout_ms: default_timeout_ms(),
            sim: SimConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimConfig {
    #[serde(default = "default_sim_series")]
    pub series: Vec<String>,
    #[serde(default = "default_sample_period")]
    pub sample_period: f64,
    #[serde(default = "default_samples_per_fetch")]
    pub samples_per_fetch: usize,
    #[serde(default)]
    pub warmup_fetches: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            series: default_sim_series(),
            sample_period: default_sample_period(),
            samples_per_fetch: default_samples_per_fetch(),
            warmup_fetches: 0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_duration() -> f64 {
    30.0
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_transition_fraction() -> f64 {
    DEFAULT_TRANSITION_FRACTION
}

fn default_url() -> String {
    "http://127.0.0.1:5000/get/sink/logger".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_sim_series() -> Vec<String> {
    vec![
        "New York".to_string(),
        "Austin".to_string(),
        "San Francisco".to_string(),
    ]
}

fn default_sample_period() -> f64 {
    0.1
}

fn default_samples_per_fetch() -> usize {
    10
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

/// Loads `config/scope.toml` when present, overridden by `SCOPE__*` variables
/// (e.g. `SCOPE__WINDOW__INTERVAL_MS=500`).
pub fn load_scope_config() -> anyhow::Result<ScopeConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/scope").required(false))
        .add_source(config::Environment::with_prefix("SCOPE").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn parse(toml: &str) -> ScopeConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse("");
        assert_eq!(config.window.duration, 30.0);
        assert_eq!(config.window.interval_ms, 1000);
        assert_eq!(config.window.transition_fraction, 0.95);
        assert_eq!(config.window.strategy, StrategyKind::Batch);
        assert_eq!(config.source.kind, SourceKind::Sim);
        assert_eq!(config.viewport, Viewport::default());
        assert_eq!(config.server.bind, "0.0.0.0:8080");
    }

    #[test]
    fn test_parse_full_file() {
        let config = parse(
            r#"
            [window]
            duration = 3000.0
            interval_ms = 500
            transition_fraction = 0.9
            strategy = "per_sample"

            [viewport]
            width = 800.0
            height = 600.0

            [viewport.margins]
            top = 10.0
            right = 10.0
            bottom = 10.0
            left = 10.0

            [source]
            kind = "http"
            url = "http://scope.local/get/sink/logger"
            keys = "log"
            "#,
        );

        assert_eq!(config.window.strategy, StrategyKind::PerSample);
        assert_eq!(config.viewport.plot_width(), 780.0);
        assert_eq!(config.source.kind, SourceKind::Http);
        assert_eq!(config.source.keys.as_deref(), Some("log"));

        let settings = config.window.settings().unwrap();
        assert_eq!(settings.interval(), Duration::from_millis(500));
        assert_eq!(settings.window_duration(), 3000.0);
    }

    #[test]
    fn test_margins_only_viewport_keeps_default_size() {
        let config = parse("[viewport.margins]\ntop = 0.0\nright = 0.0\nbottom = 0.0\nleft = 0.0\n");
        assert_eq!(config.viewport.width, 960.0);
        assert_eq!(config.viewport.height, 500.0);
        assert_eq!(config.viewport.plot_width(), 960.0);
    }

    #[test]
    fn test_invalid_window_rejected() {
        let config = parse("[window]\nduration = -1.0\n");
        assert!(config.window.settings().is_err());
    }
}
