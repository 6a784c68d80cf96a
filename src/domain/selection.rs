//! Calendar selection, active date, multi-select mode and clipboard

use crate::domain::{CalendarDate, LocalTimeEntry};
use std::collections::BTreeSet;

/// Selection state of one calendar session. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub selected_dates: BTreeSet<CalendarDate>,
    /// Last date the user interacted with, whether or not it is still selected
    pub active_date: Option<CalendarDate>,
    pub is_multi_select_mode: bool,
    pub clipboard: Vec<LocalTimeEntry>,
}

impl SelectionState {
    pub fn new() -> Self {
        SelectionState::default()
    }

    /// Apply a click on `date`.
    ///
    /// With the modifier key held or multi-select mode on, membership of
    /// `date` is flipped. A plain click selects `date` alone. Either way
    /// `date` becomes the active date.
    pub fn toggle_date_selection(
        &mut self,
        date: CalendarDate,
        is_modifier_key_held: bool,
        is_multi_select_mode_active: bool,
    ) {
        if is_modifier_key_held || is_multi_select_mode_active {
            if !self.selected_dates.remove(&date) {
                self.selected_dates.insert(date);
            }
        } else {
            self.selected_dates.clear();
            self.selected_dates.insert(date);
        }

        self.active_date = Some(date);
        log::debug!(
            "selection now {} date(s), active {}",
            self.selected_dates.len(),
            date
        );
    }

    /// Copy entries on the selected dates to the clipboard.
    ///
    /// Returns false and leaves the clipboard untouched when nothing is
    /// selected or no entry falls on a selected date.
    pub fn copy_selected_entries(&mut self, all_entries: &[LocalTimeEntry]) -> bool {
        match copy_selected_entries(&self.selected_dates, all_entries) {
            Some(copied) => {
                log::debug!("copied {} entries to clipboard", copied.len());
                self.clipboard = copied;
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_dates.clear();
        self.active_date = None;
    }

    /// Flip multi-select mode. Leaving the mode drops the selection.
    pub fn toggle_multi_select_mode(&mut self) -> bool {
        self.is_multi_select_mode = !self.is_multi_select_mode;
        if !self.is_multi_select_mode {
            self.selected_dates.clear();
        }
        self.is_multi_select_mode
    }

    /// Dates quick actions apply to: the selection, else the active date
    pub fn targets(&self) -> Vec<CalendarDate> {
        if !self.selected_dates.is_empty() {
            return self.selected_dates.iter().copied().collect();
        }
        self.active_date.into_iter().collect()
    }
}

/// Entries dated on one of `selected_dates`, in their original order.
/// `None` when the selection is empty or nothing matches.
pub fn copy_selected_entries(
    selected_dates: &BTreeSet<CalendarDate>,
    all_entries: &[LocalTimeEntry],
) -> Option<Vec<LocalTimeEntry>> {
    if selected_dates.is_empty() {
        return None;
    }

    let copied: Vec<LocalTimeEntry> = all_entries
        .iter()
        .filter(|entry| selected_dates.contains(&entry.date))
        .cloned()
        .collect();

    if copied.is_empty() {
        None
    } else {
        Some(copied)
    }
}
