//! Entry templates: named sets of entries applied to a day in one step

use crate::domain::{validate_hours, CalendarDate, EntryDraft, TaskRefs};
use crate::error::{Result, TimegridError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateLine {
    #[serde(flatten)]
    pub refs: TaskRefs,
    pub hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryTemplate {
    pub name: String,
    #[serde(default, rename = "line")]
    pub lines: Vec<TemplateLine>,
}

impl EntryTemplate {
    /// Drafts for every line of the template, dated `date`
    pub fn instantiate(&self, date: CalendarDate) -> Result<Vec<EntryDraft>> {
        if self.lines.is_empty() {
            return Err(TimegridError::EmptyTemplate(self.name.clone()));
        }

        self.lines
            .iter()
            .map(|line| {
                Ok(EntryDraft {
                    date,
                    refs: line.refs.clone(),
                    hours: validate_hours(line.hours)?,
                    description: line.description.clone(),
                })
            })
            .collect()
    }
}

/// Find a template by exact name
pub fn find_template<'a>(templates: &'a [EntryTemplate], name: &str) -> Result<&'a EntryTemplate> {
    templates
        .iter()
        .find(|template| template.name == name)
        .ok_or_else(|| TimegridError::TemplateNotFound(name.to_string()))
}
