//! timegrid - Monthly timesheet editor
//!
//! Keeps the client-side model of a timesheet calendar: which dates are
//! selected, what sits on the clipboard, which entries are still drafts, and
//! the month grid derived from all of it.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::TimegridError;
