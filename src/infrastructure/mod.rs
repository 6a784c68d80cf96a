//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod repository;
pub mod status_poll;

pub use config::Config;
pub use repository::{EntryPersistence, FileSystemRepository, TimesheetRepository};
pub use status_poll::{FileMaintenanceProbe, ServiceStatus, StatusPoller, StatusProbe};
