use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::BundulError,
    time::{parse_due_date, DUE_SOON_WINDOW_DAYS},
    utils::paths::{self, ensure_dir, write_atomic},
    workflow::CONFIRMATION_TIMEOUT_MS,
};

/// Environment variable that pins "today" for reproducible sessions.
pub const TODAY_OVERRIDE_ENV: &str = "BUNDUL_TODAY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_confirmation_timeout_ms")]
    pub confirmation_timeout_ms: i64,
    #[serde(default = "default_due_soon_window_days")]
    pub due_soon_window_days: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting_name: Option<String>,
}

fn default_confirmation_timeout_ms() -> i64 {
    CONFIRMATION_TIMEOUT_MS
}

fn default_due_soon_window_days() -> i64 {
    DUE_SOON_WINDOW_DAYS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            confirmation_timeout_ms: CONFIRMATION_TIMEOUT_MS,
            due_soon_window_days: DUE_SOON_WINDOW_DAYS,
            greeting_name: None,
        }
    }
}

impl Config {
    pub fn confirmation_timeout(&self) -> Duration {
        Duration::milliseconds(self.confirmation_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), BundulError> {
        if self.confirmation_timeout_ms <= 0 {
            return Err(BundulError::Config(
                "confirmation_timeout_ms must be positive".into(),
            ));
        }
        if self.due_soon_window_days < 0 {
            return Err(BundulError::Config(
                "due_soon_window_days cannot be negative".into(),
            ));
        }
        Ok(())
    }
}

/// Reads the `BUNDUL_TODAY` override, if set to a valid ISO date.
pub fn today_override() -> Result<Option<NaiveDate>, BundulError> {
    match env::var(TODAY_OVERRIDE_ENV) {
        Ok(raw) => parse_due_date(&raw).map(Some).ok_or_else(|| {
            BundulError::Config(format!(
                "{} must be an ISO date (YYYY-MM-DD), got `{}`",
                TODAY_OVERRIDE_ENV, raw
            ))
        }),
        Err(_) => Ok(None),
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, BundulError> {
        Self::from_base(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, BundulError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, BundulError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, BundulError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config: Config = serde_json::from_str(&data)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), BundulError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
