// ⚙️ Configuration - optional TOML file, every key has a default

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::forms;
use crate::shell::FormDefaults;

pub const DEFAULT_CONFIG_FILE: &str = "hospital.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Pre-load the demonstration network at startup
    pub seed_demo: bool,
    pub log: LogConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Where the terminal UI writes its logs
    pub file: PathBuf,
    /// Level for this crate's targets, overridden by RUST_LOG
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub staff_birth_date: String,
    pub patient_birth_date: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            seed_demo: false,
            log: LogConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            file: PathBuf::from("hospital.log"),
            level: "info".to_string(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            staff_birth_date: "1980-01-01".to_string(),
            patient_birth_date: "1990-01-01".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Default dates must follow the same grammar the forms accept
    pub fn validate(&self) -> Result<()> {
        forms::parse_date("defaults.staff_birth_date", &self.defaults.staff_birth_date)?;
        forms::parse_date("defaults.patient_birth_date", &self.defaults.patient_birth_date)?;
        Ok(())
    }

    pub fn form_defaults(&self, now: NaiveDateTime) -> FormDefaults {
        FormDefaults {
            staff_birth_date: self.defaults.staff_birth_date.clone(),
            patient_birth_date: self.defaults.patient_birth_date.clone(),
            now,
        }
    }
}
