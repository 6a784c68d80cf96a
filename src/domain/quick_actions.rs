//! Quick actions that turn existing entries into new drafts

use crate::domain::{CalendarDate, EntryDraft, LocalTimeEntry};

/// Replay the clipboard onto `target`.
///
/// Entries keep their day offset from the earliest copied date, so a copied
/// week lands as a week starting at `target`.
pub fn paste_clipboard(clipboard: &[LocalTimeEntry], target: CalendarDate) -> Vec<EntryDraft> {
    let Some(anchor) = clipboard.iter().map(|entry| entry.date).min() else {
        return Vec::new();
    };

    clipboard
        .iter()
        .map(|entry| {
            let mut draft = entry.to_draft();
            draft.date = target.add_days(entry.date.days_since(anchor));
            draft
        })
        .collect()
}

/// Copy the entries of the most recent day before `target` that has any
pub fn copy_previous_day(entries: &[LocalTimeEntry], target: CalendarDate) -> Vec<EntryDraft> {
    let Some(source) = entries
        .iter()
        .map(|entry| entry.date)
        .filter(|date| *date < target)
        .max()
    else {
        return Vec::new();
    };

    entries
        .iter()
        .filter(|entry| entry.date == source)
        .map(|entry| {
            let mut draft = entry.to_draft();
            draft.date = target;
            draft
        })
        .collect()
}

/// Replay the most recently added entry onto `target`
pub fn repeat_last_entry(entries: &[LocalTimeEntry], target: CalendarDate) -> Option<EntryDraft> {
    entries.last().map(|entry| {
        let mut draft = entry.to_draft();
        draft.date = target;
        draft
    })
}
