//! Application layer - Use cases and orchestration

pub mod entries;
pub mod init;
pub mod manage_config;
pub mod session;

pub use entries::{add_entry, list_entries, month_view};
pub use manage_config::ConfigService;
pub use session::{CalendarSession, SessionEvent, SessionOutcome, SyncReport};
