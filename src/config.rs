use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::analytics::params::LeverageParams;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const CONFIG_PATH_ENV: &str = "LEVERAGE_ENGINE_CONFIG";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub leverage: LeverageParams,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub symbol: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeConfig {
    pub timeout_secs: u64,
    #[serde(default)]
    pub force_sequential: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            force_sequential: false,
        }
    }
}

impl RuntimeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl DataConfig {
    pub fn normalized_symbol(&self) -> String {
        self.symbol.trim().to_ascii_uppercase()
    }
}

impl Config {
    /// Resolve the config path: explicit argument, then `LEVERAGE_ENGINE_CONFIG`,
    /// then `config/default.toml`.
    pub fn resolve_path(explicit: Option<&str>) -> PathBuf {
        explicit
            .map(PathBuf::from)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn load(explicit: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_from(&Self::resolve_path(explicit))
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        Self::from_toml_str(&config_str)
            .with_context(|| format!("failed to load {}", config_path.display()))
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(config_str).context("failed to parse config")?;
        config.leverage.force_sequential = config.runtime.force_sequential;
        config
            .leverage
            .validate()
            .context("leverage parameters are invalid")?;
        if config.runtime.timeout_secs == 0 {
            anyhow::bail!("runtime.timeout_secs must be > 0");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let toml_str = r#"
[data]
symbol = "qqq "
input_path = "data/in.json"
output_path = "data/out.json"

[leverage]
window_trading_days = 126
cap = 2.0
fraction = 0.25

[runtime]
timeout_secs = 5

[logging]
level = "debug"
"#;
        let config = Config::from_toml_str(toml_str).unwrap();
        assert_eq!(config.data.normalized_symbol(), "QQQ");
        assert_eq!(config.leverage.window_trading_days, 126);
        assert!((config.leverage.cap - 2.0).abs() < f64::EPSILON);
        assert!((config.leverage.fraction - 0.25).abs() < f64::EPSILON);
        // Omitted keys fall back to the defaults.
        assert_eq!(config.leverage.trading_days_per_year, 252);
        assert!((config.leverage.vol_ewma_lambda - 0.94).abs() < f64::EPSILON);
        assert!((config.leverage.blend_alpha - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.runtime.timeout(), Duration::from_secs(5));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn optional_sections_default() {
        let toml_str = r#"
[data]
symbol = "SPY"
input_path = "in.json"
output_path = "out.json"
"#;
        let config = Config::from_toml_str(toml_str).unwrap();
        assert_eq!(config.leverage, LeverageParams::default());
        assert_eq!(config.runtime.timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn rejects_invalid_leverage_section() {
        let toml_str = r#"
[data]
symbol = "SPY"
input_path = "in.json"
output_path = "out.json"

[leverage]
vol_ewma_lambda = 1.0
"#;
        assert!(Config::from_toml_str(toml_str).is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let toml_str = r#"
[data]
symbol = "SPY"
input_path = "in.json"
output_path = "out.json"

[runtime]
timeout_secs = 0
"#;
        assert!(Config::from_toml_str(toml_str).is_err());
    }

    #[test]
    fn explicit_path_wins() {
        assert_eq!(
            Config::resolve_path(Some("custom.toml")),
            PathBuf::from("custom.toml")
        );
    }
}
