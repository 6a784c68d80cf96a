//! One-shot entry use cases: add, list and the month grid

use crate::application::session::{CalendarSession, SessionEvent, SyncReport};
use crate::domain::{build_month_data_now, EntryDraft, LocalTimeEntry, MonthData, YearMonth};
use crate::error::{Result, TimegridError};
use crate::infrastructure::{FileSystemRepository, TimesheetRepository};

/// Create a draft and persist it right away
pub fn add_entry(repository: &mut FileSystemRepository, draft: EntryDraft) -> Result<LocalTimeEntry> {
    let mut session = CalendarSession::open_from(&*repository)?;
    session.dispatch(SessionEvent::AddDraft(draft))?;

    let report: SyncReport = session.sync(repository);
    if report.failed > 0 {
        return Err(TimegridError::Persistence(report.errors.join("; ")));
    }

    session
        .entries()
        .last()
        .cloned()
        .ok_or_else(|| TimegridError::Persistence("entry vanished after save".to_string()))
}

/// Saved entries, optionally limited to one month, in date order
pub fn list_entries<R: TimesheetRepository>(
    repository: &R,
    month: Option<YearMonth>,
) -> Result<Vec<LocalTimeEntry>> {
    let mut entries: Vec<LocalTimeEntry> = repository
        .load_entries()?
        .into_iter()
        .filter(|entry| month.map_or(true, |m| m.contains(entry.date)))
        .collect();
    entries.sort_by_key(|entry| entry.date);
    Ok(entries)
}

/// Month grid of the saved entries
pub fn month_view<R: TimesheetRepository>(repository: &R, month: YearMonth) -> Result<MonthData> {
    let config = repository.load_config()?;
    let entries = repository.load_entries()?;
    Ok(build_month_data_now(
        &entries,
        month,
        &config.themes,
        config.workday_hours,
    ))
}
