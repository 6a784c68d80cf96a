//! File system repository

use crate::domain::{EntryId, EntryStatus, LocalTimeEntry};
use crate::error::{Result, TimegridError};
use crate::infrastructure::Config;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Abstract repository for timesheet operations
pub trait TimesheetRepository {
    /// Load configuration from .timegrid/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .timegrid/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .timegrid directory exists
    fn is_initialized(&self) -> bool;

    /// Create .timegrid directory structure
    fn initialize(&self) -> Result<()>;

    /// Load every saved entry
    fn load_entries(&self) -> Result<Vec<LocalTimeEntry>>;
}

/// Backend that turns drafts into saved entries
pub trait EntryPersistence {
    /// Store `entry` and return the id the backend assigned to it
    fn persist(&mut self, entry: &LocalTimeEntry) -> Result<EntryId>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct EntryFile {
    #[serde(default, rename = "entry")]
    entries: Vec<LocalTimeEntry>,
}

/// File system implementation of TimesheetRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the timesheet root.
    /// Checks TIMEGRID_ROOT first, then walks up from the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("TIMEGRID_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_timegrid_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(TimegridError::Config(format!(
                    "TIMEGRID_ROOT is set to '{}' but no .timegrid directory found. \
                    Run 'timegrid init' in that directory or unset TIMEGRID_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the timesheet root by walking up from `start`
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_timegrid_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(TimegridError::NotTimegridDirectory(start.to_path_buf())),
            }
        }
    }

    /// File whose presence signals backend maintenance
    pub fn maintenance_flag(&self) -> PathBuf {
        self.root.join(".timegrid").join("maintenance")
    }

    fn has_timegrid_dir(path: &Path) -> bool {
        path.join(".timegrid").is_dir()
    }

    fn entries_path(&self) -> PathBuf {
        self.root.join(".timegrid").join("entries.toml")
    }

    fn write_entries(&self, entries: Vec<LocalTimeEntry>) -> Result<()> {
        let contents = toml::to_string_pretty(&EntryFile { entries })?;
        fs::write(self.entries_path(), contents)?;
        Ok(())
    }

    fn next_entry_id(entries: &[LocalTimeEntry]) -> EntryId {
        let highest = entries
            .iter()
            .filter_map(|entry| entry.id.as_str().strip_prefix("e-"))
            .filter_map(|number| number.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        EntryId::new(format!("e-{}", highest + 1))
    }
}

impl TimesheetRepository for FileSystemRepository {
    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_timegrid_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let timegrid_dir = self.root.join(".timegrid");

        if timegrid_dir.exists() {
            return Err(TimegridError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&timegrid_dir)?;
        Ok(())
    }

    fn load_entries(&self) -> Result<Vec<LocalTimeEntry>> {
        let path = self.entries_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&path)?;
        let file: EntryFile = toml::from_str(&contents)?;

        // Everything in the file has been persisted, whatever its status field says
        Ok(file
            .entries
            .into_iter()
            .map(|mut entry| {
                entry.status = EntryStatus::Saved;
                entry.origin = None;
                entry
            })
            .collect())
    }
}

impl EntryPersistence for FileSystemRepository {
    fn persist(&mut self, entry: &LocalTimeEntry) -> Result<EntryId> {
        if !self.is_initialized() {
            return Err(TimegridError::NotTimegridDirectory(self.root.clone()));
        }

        let mut entries = self.load_entries()?;

        let id = match &entry.origin {
            Some(origin) => origin.clone(),
            None => Self::next_entry_id(&entries),
        };

        let mut record = entry.clone();
        record.id = id.clone();
        record.status = EntryStatus::Saved;
        record.origin = None;

        match entries.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => *existing = record,
            None => entries.push(record),
        }

        self.write_entries(entries)?;
        log::info!("persisted {} as {}", entry.id, id);
        Ok(id)
    }
}
