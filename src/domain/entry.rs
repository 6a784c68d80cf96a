//! Time entries: drafts held by the client and entries saved by the backend

use crate::domain::CalendarDate;
use crate::error::{Result, TimegridError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound for a single entry
pub const MAX_ENTRY_HOURS: f64 = 24.0;

/// Identifier of an entry. Drafts carry a client id (`draft-N`) until the
/// backend assigns its own.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        EntryId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Exists only in client memory
    #[default]
    Draft,
    /// Persisted by the backend
    Saved,
}

/// Opaque references to backend-owned entities
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TaskRefs {
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub project_id: String,
    pub theme_id: String,
    pub task_id: String,
}

impl TaskRefs {
    pub fn new(theme_id: impl Into<String>, task_id: impl Into<String>) -> Self {
        TaskRefs {
            theme_id: theme_id.into(),
            task_id: task_id.into(),
            ..TaskRefs::default()
        }
    }
}

/// Content of an entry that does not exist yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub date: CalendarDate,
    #[serde(flatten)]
    pub refs: TaskRefs,
    pub hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EntryDraft {
    pub fn new(date: CalendarDate, refs: TaskRefs, hours: f64) -> Self {
        EntryDraft {
            date,
            refs,
            hours,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A draft or saved allocation of time to a task on a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalTimeEntry {
    pub id: EntryId,
    pub date: CalendarDate,
    #[serde(flatten)]
    pub refs: TaskRefs,
    pub hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: EntryStatus,
    /// Saved entry this draft will replace once persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<EntryId>,
}

impl LocalTimeEntry {
    pub fn from_draft(id: EntryId, draft: EntryDraft) -> Self {
        LocalTimeEntry {
            id,
            date: draft.date,
            refs: draft.refs,
            hours: draft.hours,
            description: draft.description,
            status: EntryStatus::Draft,
            origin: None,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.status == EntryStatus::Draft
    }

    /// Content of this entry, without identity or status
    pub fn to_draft(&self) -> EntryDraft {
        EntryDraft {
            date: self.date,
            refs: self.refs.clone(),
            hours: self.hours,
            description: self.description.clone(),
        }
    }
}

/// Reject hours outside `0..=24` (and NaN)
pub fn validate_hours(hours: f64) -> Result<f64> {
    if hours.is_finite() && (0.0..=MAX_ENTRY_HOURS).contains(&hours) {
        Ok(hours)
    } else {
        Err(TimegridError::InvalidHours(hours))
    }
}
