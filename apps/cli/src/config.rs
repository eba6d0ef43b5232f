//! # Application Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ACAI_DB_PATH=/srv/acai.db                                          │
//! │     ACAI_CRITICAL_MARGIN=25                                            │
//! │                                                                         │
//! │  2. TOML Config File (--config, or the platform default)               │
//! │     ~/.config/pricing/acai.toml (Linux)                                │
//! │     ~/Library/Application Support/com.acai.pricing/acai.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     60% target margin, 30/70/10 alert thresholds                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! db_path = "/home/loja/acai.db"
//! storage_key = "acai-pricing-data"
//!
//! [pricing]
//! target_margin = 60
//! scenario_margins = [40, 50, 60, 70]
//!
//! [alerts]
//! critical_margin = 30
//! opportunity_margin = 70
//! supplier_spread = 10
//! ```

use std::path::{Path, PathBuf};

use acai_core::alerts::AlertThresholds;
use acai_core::validation::validate_margin;
use acai_core::{DEFAULT_TARGET_MARGIN, STORAGE_KEY};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

const CONFIG_FILE: &str = "acai.toml";
const DATABASE_FILE: &str = "acai.db";

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Key of the snapshot inside `app_state`.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_db_path() -> PathBuf {
    directories::ProjectDirs::from("com", "acai", "pricing")
        .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
}

fn default_storage_key() -> String {
    STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            db_path: default_db_path(),
            storage_key: default_storage_key(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Margin used by `suggest` when none is given.
    #[serde(default = "default_target_margin")]
    pub target_margin: Decimal,

    /// Margins compared by `scenarios` when none are given.
    #[serde(default = "default_scenario_margins")]
    pub scenario_margins: Vec<Decimal>,
}

fn default_target_margin() -> Decimal {
    Decimal::from(DEFAULT_TARGET_MARGIN)
}

fn default_scenario_margins() -> Vec<Decimal> {
    [40, 50, 60, 70].into_iter().map(Decimal::from).collect()
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            target_margin: default_target_margin(),
            scenario_margins: default_scenario_margins(),
        }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub pricing: PricingConfig,

    #[serde(default)]
    pub alerts: AlertThresholds,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`acai.toml`)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist; the platform default may not.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                path => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses one TOML file. Missing sections and fields take defaults.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        info!(path = %path.display(), "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> AppResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> AppResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks ranges and the relation between thresholds.
    pub fn validate(&self) -> AppResult<()> {
        if self.storage.storage_key.trim().is_empty() {
            return Err(AppError::config("storage_key must not be empty"));
        }

        validate_margin("target_margin", self.pricing.target_margin)?;

        if self.pricing.scenario_margins.is_empty() {
            return Err(AppError::config("scenario_margins must not be empty"));
        }
        for &m in &self.pricing.scenario_margins {
            validate_margin("scenario_margins", m)?;
        }

        self.alerts.validate()?;
        Ok(())
    }

    /// Applies `ACAI_*` overrides read through `lookup`.
    ///
    /// Values that don't parse are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("ACAI_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.db_path = PathBuf::from(path);
        }

        if let Some(key) = lookup("ACAI_STORAGE_KEY") {
            self.storage.storage_key = key;
        }

        let percent = |name: &str, slot: &mut Decimal| {
            if let Some(raw) = lookup(name) {
                match raw.trim().parse::<Decimal>() {
                    Ok(value) => {
                        debug!(%name, %value, "Overriding from environment");
                        *slot = value;
                    }
                    Err(_) => warn!(%name, value = %raw, "Ignoring non-numeric override"),
                }
            }
        };

        percent("ACAI_TARGET_MARGIN", &mut self.pricing.target_margin);
        percent("ACAI_CRITICAL_MARGIN", &mut self.alerts.critical_margin);
        percent("ACAI_OPPORTUNITY_MARGIN", &mut self.alerts.opportunity_margin);
        percent("ACAI_SUPPLIER_SPREAD", &mut self.alerts.supplier_spread);
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "acai", "pricing")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.storage.storage_key, "acai-pricing-data");
        assert_eq!(config.pricing.target_margin, Decimal::from(60));
        assert_eq!(config.alerts.critical_margin, Decimal::from(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [alerts]
            critical_margin = 25

            [pricing]
            scenario_margins = [45, 55]
            "#,
        )
        .unwrap();

        assert_eq!(config.alerts.critical_margin, Decimal::from(25));
        assert_eq!(config.alerts.opportunity_margin, Decimal::from(70));
        assert_eq!(config.pricing.scenario_margins.len(), 2);
        assert_eq!(config.pricing.target_margin, Decimal::from(60));
        assert_eq!(config.storage.storage_key, STORAGE_KEY);
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("ACAI_DB_PATH", "/tmp/other.db"),
            ("ACAI_STORAGE_KEY", "loja-2"),
            ("ACAI_CRITICAL_MARGIN", "22.5"),
            ("ACAI_SUPPLIER_SPREAD", "not a number"),
        ]);
        let mut config = AppConfig::default();
        config.apply_overrides(|name| vars.get(name).cloned());

        assert_eq!(config.storage.db_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.storage.storage_key, "loja-2");
        assert_eq!(config.alerts.critical_margin, Decimal::new(225, 1));
        assert_eq!(config.alerts.supplier_spread, Decimal::from(10));
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.alerts.critical_margin = Decimal::from(80);
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let mut config = AppConfig::default();
        config.pricing.target_margin = Decimal::from(100);
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.pricing.scenario_margins.clear();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.storage.storage_key = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("acai-no-such-config.toml");
        assert!(matches!(
            AppConfig::load(Some(path)),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = AppConfig::default().to_toml().unwrap();
        assert!(toml_str.contains("[storage]"));
        assert!(toml_str.contains("[pricing]"));
        assert!(toml_str.contains("[alerts]"));
    }
}
