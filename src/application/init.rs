//! Initialize timesheet use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, TimesheetRepository};
use std::fs;
use std::path::Path;

/// Initialize a new timesheet at the specified path.
pub fn init(path: &Path, user: Option<String>) -> Result<Config> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;

    let config = Config::new(user);
    repo.save_config(&config)?;

    log::info!("initialized timesheet at {}", path.display());
    Ok(config)
}
