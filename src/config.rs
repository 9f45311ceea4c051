use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::preferences::Theme;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    /// Tiers to report on. Empty means every tier the price source lists.
    #[serde(default)]
    pub tiers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_refresh_rate_ms")]
    pub refresh_rate_ms: u64,
    #[serde(default)]
    pub default_theme: Theme,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreferencesConfig {
    #[serde(default = "default_preferences_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_refresh_rate_ms() -> u64 {
    250
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("data/preferences.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate_ms(),
            default_theme: Theme::default(),
        }
    }
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: default_preferences_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl ReportConfig {
    /// Configured tiers, trimmed, with blanks and repeats removed.
    pub fn report_tiers(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for tier in &self.tiers {
            let t = tier.trim();
            if !t.is_empty() && !out.iter().any(|v| v == t) {
                out.push(t.to_string());
            }
        }
        out
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_addr
            .trim()
            .parse()
            .with_context(|| format!("invalid server.bind_addr '{}'", self.bind_addr))
    }
}

impl Config {
    /// Load `config/default.toml` (or `GACHA_CONFIG_PATH`), then apply
    /// environment overrides from `.env` or the process environment.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = std::env::var("GACHA_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        let mut config = Self::read_toml(&config_path)?;

        if let Ok(base_url) = std::env::var("GACHA_API_BASE_URL") {
            if !base_url.trim().is_empty() {
                config.api.base_url = base_url;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str).context("failed to parse config toml")?;
        config.validate()?;
        Ok(config)
    }

    fn read_toml(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&config_str).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            bail!("api.base_url must not be empty");
        }
        if self.api.timeout_ms == 0 {
            bail!("api.timeout_ms must be > 0");
        }
        if self.ui.refresh_rate_ms == 0 {
            bail!("ui.refresh_rate_ms must be > 0");
        }
        self.server
            .socket_addr()
            .context("server.bind_addr is invalid")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_tiers_dedup_and_trim() {
        let cfg = ReportConfig {
            tiers: vec![
                " Starter ".to_string(),
                "Premium".to_string(),
                "Starter".to_string(),
                "  ".to_string(),
            ],
        };
        assert_eq!(
            cfg.report_tiers(),
            vec!["Starter".to_string(), "Premium".to_string()]
        );
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::load_from_str(
            r#"
[api]
base_url = "http://localhost:3000"
"#,
        )
        .unwrap();
        assert_eq!(config.api.timeout_ms, 10_000);
        assert!(config.report.tiers.is_empty());
        assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.ui.default_theme, Theme::Dark);
        assert_eq!(config.logging.level, "info");
    }
}
