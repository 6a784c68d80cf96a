//! Calendar editing session
//!
//! A [`CalendarSession`] owns everything a timesheet calendar mutates while
//! the user works on it: the selection, the clipboard and the draft book.
//! Events are applied one at a time in the order they are dispatched. The
//! session is opened from the saved entries and disposed explicitly.

use crate::domain::{
    build_month_data, copy_previous_day, find_template, paste_clipboard, repeat_last_entry,
    validate_hours, CalendarDate, DraftBook, EntryDraft, EntryId, EntryTemplate, LocalTimeEntry, MonthData,
    SelectionState, ThemeInfo, YearMonth,
};
use crate::error::Result;
use crate::infrastructure::{
    Config, EntryPersistence, ServiceStatus, StatusPoller, StatusProbe, TimesheetRepository,
};
use std::time::Duration;

/// A user gesture on the calendar
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Click { date: CalendarDate, modifier: bool },
    ToggleMultiSelect,
    ClearSelection,
    Copy,
    Paste,
    CopyPreviousDay,
    RepeatLastEntry,
    ApplyTemplate(String),
    AddDraft(EntryDraft),
    EditEntry {
        id: EntryId,
        hours: f64,
        description: Option<String>,
    },
}

/// What the UI should tell the user after an event
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Selection {
        selected: usize,
        active: Option<CalendarDate>,
    },
    MultiSelect(bool),
    Cleared,
    Copied(usize),
    NothingToCopy,
    DraftsCreated(Vec<EntryId>),
    /// No selected or active date to apply a quick action to
    NoTarget,
    /// The quick action found nothing to replay
    NothingToReplay,
    Edited(EntryId),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    pub saved: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

pub struct CalendarSession {
    selection: SelectionState,
    book: DraftBook,
    themes: Vec<ThemeInfo>,
    templates: Vec<EntryTemplate>,
    workday_hours: f64,
    poller: Option<StatusPoller>,
    last_status: Option<ServiceStatus>,
}

impl CalendarSession {
    pub fn open(config: &Config, saved: Vec<LocalTimeEntry>) -> Self {
        log::debug!("session opened with {} saved entries", saved.len());
        CalendarSession {
            selection: SelectionState::new(),
            book: DraftBook::with_entries(saved),
            themes: config.themes.clone(),
            templates: config.templates.clone(),
            workday_hours: config.workday_hours,
            poller: None,
            last_status: None,
        }
    }

    pub fn open_from<R: TimesheetRepository>(repository: &R) -> Result<Self> {
        let config = repository.load_config()?;
        let saved = repository.load_entries()?;
        Ok(Self::open(&config, saved))
    }

    /// Poll service status for as long as the session lives
    pub fn start_status_poll<P: StatusProbe>(&mut self, probe: P, interval: Duration) {
        if let Some(previous) = self.poller.take() {
            previous.stop();
        }
        self.poller = Some(StatusPoller::start(probe, interval));
    }

    /// Latest known service status, refreshed from the poller
    pub fn service_status(&mut self) -> Option<ServiceStatus> {
        if let Some(poller) = &self.poller {
            if let Some(latest) = poller.latest() {
                if latest != self.last_status.unwrap_or(ServiceStatus::Available) {
                    log::warn!("service status changed to {:?}", latest);
                }
                self.last_status = Some(latest);
            }
        }
        self.last_status
    }

    /// End the session. Returns the drafts that were never saved.
    pub fn dispose(mut self) -> Vec<LocalTimeEntry> {
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
        let unsaved: Vec<LocalTimeEntry> = self.book.drafts().cloned().collect();
        log::debug!("session disposed with {} unsaved draft(s)", unsaved.len());
        unsaved
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn entries(&self) -> &[LocalTimeEntry] {
        self.book.entries()
    }

    pub fn dispatch(&mut self, event: SessionEvent) -> Result<SessionOutcome> {
        log::debug!("dispatch {:?}", event);

        match event {
            SessionEvent::Click { date, modifier } => {
                let mode = self.selection.is_multi_select_mode;
                self.selection.toggle_date_selection(date, modifier, mode);
                Ok(self.selection_outcome())
            }
            SessionEvent::ToggleMultiSelect => Ok(SessionOutcome::MultiSelect(
                self.selection.toggle_multi_select_mode(),
            )),
            SessionEvent::ClearSelection => {
                self.selection.clear_selection();
                Ok(SessionOutcome::Cleared)
            }
            SessionEvent::Copy => {
                if self.selection.copy_selected_entries(self.book.entries()) {
                    Ok(SessionOutcome::Copied(self.selection.clipboard.len()))
                } else {
                    Ok(SessionOutcome::NothingToCopy)
                }
            }
            SessionEvent::Paste => {
                let clipboard = self.selection.clipboard.clone();
                self.replay(|target| paste_clipboard(&clipboard, target))
            }
            SessionEvent::CopyPreviousDay => {
                let entries = self.book.entries().to_vec();
                self.replay(|target| copy_previous_day(&entries, target))
            }
            SessionEvent::RepeatLastEntry => {
                let entries = self.book.entries().to_vec();
                self.replay(|target| repeat_last_entry(&entries, target).into_iter().collect())
            }
            SessionEvent::ApplyTemplate(name) => {
                let template = find_template(&self.templates, &name)?.clone();
                let targets = self.selection.targets();
                if targets.is_empty() {
                    return Ok(SessionOutcome::NoTarget);
                }

                let mut drafts = Vec::new();
                for target in targets {
                    drafts.extend(template.instantiate(target)?);
                }
                self.add_drafts(drafts)
            }
            SessionEvent::AddDraft(draft) => {
                let id = self.book.add_draft(draft)?;
                Ok(SessionOutcome::DraftsCreated(vec![id]))
            }
            SessionEvent::EditEntry {
                id,
                hours,
                description,
            } => {
                // Reject before a draft copy of a saved entry is opened
                validate_hours(hours)?;
                let draft_id = self.book.edit(&id)?;
                self.book.update_draft(&draft_id, hours, description)?;
                Ok(SessionOutcome::Edited(draft_id))
            }
        }
    }

    /// Persist every draft. Failed drafts stay drafts.
    pub fn sync<P: EntryPersistence>(&mut self, backend: &mut P) -> SyncReport {
        let pending: Vec<LocalTimeEntry> = self.book.drafts().cloned().collect();
        let mut report = SyncReport::default();

        for draft in pending {
            match backend.persist(&draft) {
                Ok(server_id) => {
                    if self.book.mark_saved(&draft.id, server_id) {
                        report.saved += 1;
                    }
                }
                Err(e) => {
                    let reason = e.to_string();
                    if self.book.mark_failed(&draft.id, &reason) {
                        report.failed += 1;
                        report.errors.push(format!("{}: {}", draft.id, reason));
                    }
                }
            }
        }

        log::info!("sync saved {}, failed {}", report.saved, report.failed);
        report
    }

    pub fn month(&self, month: YearMonth, today: Option<CalendarDate>) -> MonthData {
        build_month_data(
            self.book.entries(),
            month,
            &self.themes,
            self.workday_hours,
            today,
        )
    }

    fn selection_outcome(&self) -> SessionOutcome {
        SessionOutcome::Selection {
            selected: self.selection.selected_dates.len(),
            active: self.selection.active_date,
        }
    }

    fn replay<F>(&mut self, drafts_for: F) -> Result<SessionOutcome>
    where
        F: Fn(CalendarDate) -> Vec<EntryDraft>,
    {
        let targets = self.selection.targets();
        if targets.is_empty() {
            return Ok(SessionOutcome::NoTarget);
        }

        let drafts: Vec<EntryDraft> = targets.into_iter().flat_map(drafts_for).collect();
        if drafts.is_empty() {
            return Ok(SessionOutcome::NothingToReplay);
        }
        self.add_drafts(drafts)
    }

    fn add_drafts(&mut self, drafts: Vec<EntryDraft>) -> Result<SessionOutcome> {
        let mut ids = Vec::with_capacity(drafts.len());
        for draft in drafts {
            ids.push(self.book.add_draft(draft)?);
        }
        Ok(SessionOutcome::DraftsCreated(ids))
    }
}
