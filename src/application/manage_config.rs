//! Config management use case

use crate::domain::ThemeInfo;
use crate::error::{Result, TimegridError};
use crate::infrastructure::{Config, FileSystemRepository, TimesheetRepository};

const SETTABLE_KEYS: &str = "user, workday_hours, poll_interval_secs";

/// Service for managing timesheet configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "user" => Ok(config.user.clone()),
            "workday_hours" => Ok(config.workday_hours.to_string()),
            "poll_interval_secs" => Ok(config.poll_interval_secs.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(TimegridError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}, created",
                key, SETTABLE_KEYS
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "user" => {
                config.user = value.to_string();
            }
            "workday_hours" => {
                config.workday_hours = value.parse().map_err(|_| {
                    TimegridError::Config(format!("workday_hours must be a number, got '{}'", value))
                })?;
            }
            "poll_interval_secs" => {
                config.poll_interval_secs = value.parse().map_err(|_| {
                    TimegridError::Config(format!(
                        "poll_interval_secs must be a whole number, got '{}'",
                        value
                    ))
                })?;
            }
            "created" => {
                return Err(TimegridError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(TimegridError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, SETTABLE_KEYS
                )));
            }
        }

        config.validate()?;
        self.repository.save_config(&config)?;
        Ok(())
    }

    /// Add a theme to the display catalog, or rename/recolor an existing one
    pub fn upsert_theme(&self, theme: ThemeInfo) -> Result<()> {
        let mut config = self.repository.load_config()?;
        config.upsert_theme(theme);
        self.repository.save_config(&config)
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service() -> (TempDir, ConfigService) {
        let temp = TempDir::new().unwrap();
        crate::application::init::init(temp.path(), Some("ada".to_string())).unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        (temp, ConfigService::new(repo))
    }

    #[test]
    fn test_get_and_set() {
        let (_temp, service) = service();
        assert_eq!(service.get("user").unwrap(), "ada");
        assert_eq!(service.get("workday_hours").unwrap(), "7");

        service.set("workday_hours", "7.5").unwrap();
        assert_eq!(service.get("workday_hours").unwrap(), "7.5");
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let (_temp, service) = service();
        assert!(service.set("workday_hours", "abc").is_err());
        assert!(service.set("workday_hours", "-1").is_err());
        assert!(service.set("poll_interval_secs", "0").is_err());
        assert!(service.set("created", "now").is_err());
        assert!(service.set("color", "red").is_err());
        assert_eq!(service.get("workday_hours").unwrap(), "7");
    }

    #[test]
    fn test_upsert_theme() {
        let (_temp, service) = service();
        service
            .upsert_theme(ThemeInfo {
                id: "T1".to_string(),
                name: "Dev".to_string(),
                color: "#00ff00".to_string(),
            })
            .unwrap();

        let config = service.list().unwrap();
        assert_eq!(config.themes.len(), 1);
        assert_eq!(config.themes[0].name, "Dev");
    }
}
