//! Configuration management

use crate::domain::{EntryTemplate, ThemeInfo, DEFAULT_WORKDAY_HOURS};
use crate::error::{Result, TimegridError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub user: String,
    #[serde(default = "default_workday_hours")]
    pub workday_hours: f64,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    pub created: DateTime<Utc>,
    #[serde(default, rename = "theme", skip_serializing_if = "Vec::is_empty")]
    pub themes: Vec<ThemeInfo>,
    #[serde(default, rename = "template", skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<EntryTemplate>,
}

fn default_workday_hours() -> f64 {
    DEFAULT_WORKDAY_HOURS
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

impl Config {
    /// Create a new config with default values
    pub fn new(user: Option<String>) -> Self {
        Config {
            user: user.unwrap_or_else(Self::detect_default_user),
            workday_hours: DEFAULT_WORKDAY_HOURS,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            created: Utc::now(),
            themes: Vec::new(),
            templates: Vec::new(),
        }
    }

    /// Load config from .timegrid/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".timegrid").join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TimegridError::NotTimegridDirectory(path.to_path_buf())
            } else {
                TimegridError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| TimegridError::Config(format!("Failed to parse config.toml: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to .timegrid/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let timegrid_dir = path.join(".timegrid");
        let config_path = timegrid_dir.join("config.toml");

        if !timegrid_dir.exists() {
            fs::create_dir(&timegrid_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| TimegridError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.workday_hours.is_finite() && self.workday_hours > 0.0) {
            return Err(TimegridError::Config(format!(
                "workday_hours must be a positive number, got {}",
                self.workday_hours
            )));
        }
        if self.poll_interval_secs == 0 {
            return Err(TimegridError::Config(
                "poll_interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Insert a theme or replace the one with the same id
    pub fn upsert_theme(&mut self, theme: ThemeInfo) {
        match self.themes.iter_mut().find(|existing| existing.id == theme.id) {
            Some(existing) => *existing = theme,
            None => self.themes.push(theme),
        }
    }

    fn detect_default_user() -> String {
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "me".to_string())
    }
}
