use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// service_url = "http://localhost:8000"
/// request_timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the prediction service.
    pub service_url: String,

    /// How long to wait for one prediction before giving up.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "geopredict", "geopredict")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_localhost() {
        let cfg = Config::default();
        assert_eq!(cfg.service_url, "http://localhost:8000");
        assert_eq!(cfg.request_timeout_secs, 10);
    }

    #[test]
    fn parses_a_full_config_file() {
        let cfg: Config = toml::from_str(
            r#"
            service_url = "https://predict.example.com"
            request_timeout_secs = 30
            "#,
        )
        .expect("config should parse");

        assert_eq!(cfg.service_url, "https://predict.example.com");
        assert_eq!(cfg.request_timeout_secs, 30);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: Config = toml::from_str(r#"service_url = "http://10.0.0.5:9000""#)
            .expect("partial config should parse");

        assert_eq!(cfg.service_url, "http://10.0.0.5:9000");
        assert_eq!(cfg.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = Config {
            service_url: "http://predict.internal:8000".to_string(),
            request_timeout_secs: 5,
        };

        let serialized = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&serialized).expect("parse");

        assert_eq!(parsed.service_url, cfg.service_url);
        assert_eq!(parsed.request_timeout_secs, cfg.request_timeout_secs);
    }
}
