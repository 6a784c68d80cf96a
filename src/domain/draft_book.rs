//! Ordered list of draft and saved entries owned by one session

use crate::domain::{validate_hours, EntryDraft, EntryId, EntryStatus, LocalTimeEntry};
use crate::error::{Result, TimegridError};

/// Draft/saved entry lifecycle.
///
/// Entries keep insertion order. A draft becomes saved only through
/// [`DraftBook::mark_saved`]; a saved entry is never turned back into a draft,
/// [`DraftBook::edit`] creates a separate draft copy instead.
#[derive(Debug, Clone, Default)]
pub struct DraftBook {
    entries: Vec<LocalTimeEntry>,
    next_draft: u64,
}

impl DraftBook {
    pub fn new() -> Self {
        DraftBook::default()
    }

    /// Start from entries loaded from the backend
    pub fn with_entries(entries: Vec<LocalTimeEntry>) -> Self {
        DraftBook {
            entries,
            next_draft: 0,
        }
    }

    pub fn entries(&self) -> &[LocalTimeEntry] {
        &self.entries
    }

    pub fn get(&self, id: &EntryId) -> Option<&LocalTimeEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn drafts(&self) -> impl Iterator<Item = &LocalTimeEntry> {
        self.entries.iter().filter(|entry| entry.is_draft())
    }

    pub fn add_draft(&mut self, draft: EntryDraft) -> Result<EntryId> {
        validate_hours(draft.hours)?;

        let id = self.allocate_id();
        log::debug!("new draft {} on {} ({}h)", id, draft.date, draft.hours);
        self.entries.push(LocalTimeEntry::from_draft(id.clone(), draft));
        Ok(id)
    }

    /// Change hours and description of a draft in place
    pub fn update_draft(
        &mut self,
        id: &EntryId,
        hours: f64,
        description: Option<String>,
    ) -> Result<()> {
        validate_hours(hours)?;

        let entry = self
            .entries
            .iter_mut()
            .find(|entry| &entry.id == id)
            .ok_or_else(|| TimegridError::EntryNotFound(id.to_string()))?;

        if !entry.is_draft() {
            return Err(TimegridError::EntryNotEditable(id.to_string()));
        }

        entry.hours = hours;
        entry.description = description;
        Ok(())
    }

    /// Get a draft to edit. Saved entries get a new draft copy that will
    /// replace them when persisted; drafts are returned as they are.
    pub fn edit(&mut self, id: &EntryId) -> Result<EntryId> {
        let source = self
            .get(id)
            .ok_or_else(|| TimegridError::EntryNotFound(id.to_string()))?;

        if source.is_draft() {
            return Ok(source.id.clone());
        }

        if let Some(existing) = self
            .entries
            .iter()
            .find(|entry| entry.is_draft() && entry.origin.as_ref() == Some(id))
        {
            return Ok(existing.id.clone());
        }

        let draft = source.to_draft();
        let copy_id = self.allocate_id();
        let mut copy = LocalTimeEntry::from_draft(copy_id.clone(), draft);
        copy.origin = Some(id.clone());

        log::debug!("draft {} opened as edit of {}", copy_id, id);
        self.entries.push(copy);
        Ok(copy_id)
    }

    /// Record a successful persist.
    ///
    /// The draft takes the server id and becomes saved; any other entry that
    /// already held that id is dropped (last write wins). Returns false when
    /// the draft no longer exists, in which case nothing changes.
    pub fn mark_saved(&mut self, draft_id: &EntryId, server_id: EntryId) -> bool {
        let Some(index) = self
            .entries
            .iter()
            .position(|entry| &entry.id == draft_id && entry.is_draft())
        else {
            log::warn!(
                "persist of {} resolved as {} but the draft is gone; ignoring",
                draft_id,
                server_id
            );
            return false;
        };

        let entry = &mut self.entries[index];
        entry.id = server_id.clone();
        entry.status = EntryStatus::Saved;
        entry.origin = None;

        let mut position = 0;
        self.entries.retain(|entry| {
            let keep = position == index || entry.id != server_id;
            position += 1;
            keep
        });

        log::info!("draft {} saved as {}", draft_id, server_id);
        true
    }

    /// Record a failed persist. The entry stays a draft so it can be retried.
    /// Returns false when no such draft exists.
    pub fn mark_failed(&self, draft_id: &EntryId, reason: &str) -> bool {
        if !self.entries.iter().any(|entry| &entry.id == draft_id && entry.is_draft()) {
            log::warn!("persist of {} failed but the draft is gone: {}", draft_id, reason);
            return false;
        }

        log::warn!("persist of {} failed: {}", draft_id, reason);
        true
    }

    fn allocate_id(&mut self) -> EntryId {
        loop {
            self.next_draft += 1;
            let id = EntryId::new(format!("draft-{}", self.next_draft));
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CalendarDate, TaskRefs};

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    fn draft(day: &str, hours: f64) -> EntryDraft {
        EntryDraft::new(date(day), TaskRefs::new("T1", "task-1"), hours)
    }

    fn saved(id: &str, day: &str, hours: f64) -> LocalTimeEntry {
        let mut entry = LocalTimeEntry::from_draft(EntryId::new(id), draft(day, hours));
        entry.status = EntryStatus::Saved;
        entry
    }

    #[test]
    fn test_add_draft_assigns_client_ids() {
        let mut book = DraftBook::new();
        let a = book.add_draft(draft("2024-03-04", 1.0)).unwrap();
        let b = book.add_draft(draft("2024-03-05", 2.0)).unwrap();

        assert_eq!(a.as_str(), "draft-1");
        assert_eq!(b.as_str(), "draft-2");
        assert_eq!(book.drafts().count(), 2);
        assert_eq!(book.entries().last().unwrap().id, b);
    }

    #[test]
    fn test_add_draft_rejects_bad_hours() {
        let mut book = DraftBook::new();
        assert!(matches!(
            book.add_draft(draft("2024-03-04", 25.0)),
            Err(TimegridError::InvalidHours(_))
        ));
        assert!(book.entries().is_empty());
    }

    #[test]
    fn test_mark_saved_rekeys_entry() {
        let mut book = DraftBook::new();
        let id = book.add_draft(draft("2024-03-04", 1.0)).unwrap();

        assert!(book.mark_saved(&id, EntryId::new("e-7")));

        let entry = book.get(&EntryId::new("e-7")).unwrap();
        assert_eq!(entry.status, EntryStatus::Saved);
        assert!(book.get(&id).is_none());
        assert_eq!(book.drafts().count(), 0);
    }

    #[test]
    fn test_mark_saved_for_unknown_draft_is_ignored() {
        let mut book = DraftBook::with_entries(vec![saved("e-1", "2024-03-04", 3.0)]);

        assert!(!book.mark_saved(&EntryId::new("draft-9"), EntryId::new("e-2")));
        assert!(!book.mark_saved(&EntryId::new("e-1"), EntryId::new("e-2")));
        assert_eq!(book.entries().len(), 1);
        assert_eq!(book.entries()[0].id.as_str(), "e-1");
    }

    #[test]
    fn test_mark_failed_keeps_draft() {
        let mut book = DraftBook::new();
        let id = book.add_draft(draft("2024-03-04", 1.0)).unwrap();
        assert!(book.mark_failed(&id, "offline"));

        assert!(book.get(&id).unwrap().is_draft());
    }

    #[test]
    fn test_mark_failed_for_unknown_or_saved_entry() {
        let book = DraftBook::with_entries(vec![saved("e-1", "2024-03-04", 3.0)]);

        assert!(!book.mark_failed(&EntryId::new("draft-1"), "offline"));
        assert!(!book.mark_failed(&EntryId::new("e-1"), "offline"));
    }

    #[test]
    fn test_edit_saved_creates_draft_copy() {
        let mut book = DraftBook::with_entries(vec![saved("e-1", "2024-03-04", 3.0)]);
        let copy = book.edit(&EntryId::new("e-1")).unwrap();

        assert_ne!(copy.as_str(), "e-1");
        let original = book.get(&EntryId::new("e-1")).unwrap();
        assert_eq!(original.status, EntryStatus::Saved);

        let draft = book.get(&copy).unwrap();
        assert!(draft.is_draft());
        assert_eq!(draft.origin, Some(EntryId::new("e-1")));
        assert_eq!(draft.hours, 3.0);

        // A second edit reuses the open copy
        assert_eq!(book.edit(&EntryId::new("e-1")).unwrap(), copy);
    }

    #[test]
    fn test_saving_edit_copy_replaces_original() {
        let mut book = DraftBook::with_entries(vec![
            saved("e-1", "2024-03-04", 3.0),
            saved("e-2", "2024-03-05", 1.0),
        ]);
        let copy = book.edit(&EntryId::new("e-1")).unwrap();
        book.update_draft(&copy, 5.0, Some("longer".to_string()))
            .unwrap();

        assert!(book.mark_saved(&copy, EntryId::new("e-1")));

        assert_eq!(book.entries().len(), 2);
        let entry = book.get(&EntryId::new("e-1")).unwrap();
        assert_eq!(entry.hours, 5.0);
        assert_eq!(entry.description.as_deref(), Some("longer"));
        assert_eq!(entry.origin, None);
    }

    #[test]
    fn test_update_saved_entry_is_rejected() {
        let mut book = DraftBook::with_entries(vec![saved("e-1", "2024-03-04", 3.0)]);
        assert!(matches!(
            book.update_draft(&EntryId::new("e-1"), 1.0, None),
            Err(TimegridError::EntryNotEditable(_))
        ));
        assert!(matches!(
            book.update_draft(&EntryId::new("missing"), 1.0, None),
            Err(TimegridError::EntryNotFound(_))
        ));
    }

    #[test]
    fn test_edit_draft_returns_same_id() {
        let mut book = DraftBook::new();
        let id = book.add_draft(draft("2024-03-04", 1.0)).unwrap();
        assert_eq!(book.edit(&id).unwrap(), id);
        assert_eq!(book.entries().len(), 1);
    }
}
