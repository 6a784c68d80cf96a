//! Error types for timegrid

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for timegrid
#[derive(Debug, Error)]
pub enum TimegridError {
    #[error("Not a timegrid directory: {0}")]
    NotTimegridDirectory(PathBuf),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid hours: {0}")]
    InvalidHours(f64),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Entry {0} is saved; edit it to get a draft copy first")]
    EntryNotEditable(String),

    #[error("Template '{0}' has no lines")]
    EmptyTemplate(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Session script error: {0}")]
    Script(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl TimegridError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TimegridError::NotTimegridDirectory(_) => 2,
            TimegridError::InvalidDate(_)
            | TimegridError::InvalidHours(_)
            | TimegridError::EntryNotEditable(_)
            | TimegridError::EmptyTemplate(_) => 3,
            TimegridError::EntryNotFound(_) | TimegridError::TemplateNotFound(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            TimegridError::NotTimegridDirectory(path) => {
                format!(
                    "Not a timegrid directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'timegrid init' in this directory to create a timesheet\n\
                    • Navigate to an existing timegrid directory\n\
                    • Set TIMEGRID_ROOT environment variable to your timesheet path",
                    path.display()
                )
            }
            TimegridError::InvalidDate(input) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Dates must be written as YYYY-MM-DD (e.g., 2024-03-04)\n\
                    Months must be written as YYYY-MM (e.g., 2024-03)",
                    input
                )
            }
            TimegridError::InvalidHours(hours) => {
                format!(
                    "Invalid hours: {}\n\n\
                    Hours must be a number between 0 and 24 (e.g., 3.5)",
                    hours
                )
            }
            TimegridError::TemplateNotFound(name) => {
                format!(
                    "Template not found: '{}'\n\n\
                    Suggestions:\n\
                    • Templates are defined as [[template]] tables in .timegrid/config.toml\n\
                    • Template names are case-sensitive",
                    name
                )
            }
            TimegridError::Script(msg) => {
                format!(
                    "{}\n\n\
                    Session commands: click, ctrl, multi, clear, copy, paste, prev, repeat,\n\
                    template, add, edit, show, month, sync, quit",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using TimegridError
pub type Result<T> = std::result::Result<T, TimegridError>;
