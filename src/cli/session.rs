//! Line-oriented session driver
//!
//! Each input line is one user gesture, e.g. `click 2024-03-04`,
//! `ctrl 2024-03-05`, `copy`, `paste`. Bad lines are reported and skipped;
//! the session keeps going.

use crate::application::{CalendarSession, SessionEvent};
use crate::cli::output::{
    describe_outcome, format_entry_list, format_month_grid, format_selection, format_sync_report,
};
use crate::domain::{CalendarDate, EntryDraft, EntryId, TaskRefs, YearMonth};
use crate::error::{Result, TimegridError};
use crate::infrastructure::{
    FileMaintenanceProbe, FileSystemRepository, ServiceStatus, TimesheetRepository,
};
use chrono::Local;
use std::io::{BufRead, Write};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Event(SessionEvent),
    Show,
    Entries,
    Month(YearMonth),
    Sync,
    Quit,
}

fn parse_hours(input: &str) -> Result<f64> {
    input
        .parse()
        .map_err(|_| TimegridError::Script(format!("Invalid hours: '{}'", input)))
}

fn rest_as_text(words: &[&str]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<ScriptCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    let args = &words[1..];

    let command = match (words[0], args) {
        ("click", [date]) => ScriptCommand::Event(SessionEvent::Click {
            date: CalendarDate::parse(date)?,
            modifier: false,
        }),
        ("ctrl", [date]) => ScriptCommand::Event(SessionEvent::Click {
            date: CalendarDate::parse(date)?,
            modifier: true,
        }),
        ("multi", []) => ScriptCommand::Event(SessionEvent::ToggleMultiSelect),
        ("clear", []) => ScriptCommand::Event(SessionEvent::ClearSelection),
        ("copy", []) => ScriptCommand::Event(SessionEvent::Copy),
        ("paste", []) => ScriptCommand::Event(SessionEvent::Paste),
        ("prev", []) => ScriptCommand::Event(SessionEvent::CopyPreviousDay),
        ("repeat", []) => ScriptCommand::Event(SessionEvent::RepeatLastEntry),
        ("template", [name]) => ScriptCommand::Event(SessionEvent::ApplyTemplate(name.to_string())),
        ("add", [date, theme, task, hours, rest @ ..]) => {
            let mut draft = EntryDraft::new(
                CalendarDate::parse(date)?,
                TaskRefs::new(*theme, *task),
                parse_hours(hours)?,
            );
            draft.description = rest_as_text(rest);
            ScriptCommand::Event(SessionEvent::AddDraft(draft))
        }
        ("edit", [id, hours, rest @ ..]) => ScriptCommand::Event(SessionEvent::EditEntry {
            id: EntryId::new(*id),
            hours: parse_hours(hours)?,
            description: rest_as_text(rest),
        }),
        ("show", []) => ScriptCommand::Show,
        ("entries", []) => ScriptCommand::Entries,
        ("month", [month]) => ScriptCommand::Month(YearMonth::parse(month)?),
        ("sync", []) => ScriptCommand::Sync,
        ("quit", []) | ("exit", []) => ScriptCommand::Quit,
        (name, _) => {
            return Err(TimegridError::Script(format!(
                "Cannot understand '{}' (command '{}')",
                line, name
            )))
        }
    };

    Ok(Some(command))
}

/// Run a session over `input`, writing feedback to `output`.
///
/// Drafts are only saved by `sync`; drafts left when the input ends are
/// reported and discarded.
pub fn run_session<R: BufRead, W: Write>(
    repository: &mut FileSystemRepository,
    input: R,
    output: &mut W,
) -> Result<()> {
    let config = repository.load_config()?;
    let mut session = CalendarSession::open(&config, repository.load_entries()?);
    session.start_status_poll(
        FileMaintenanceProbe::new(repository.maintenance_flag()),
        Duration::from_secs(config.poll_interval_secs),
    );

    let mut in_maintenance = false;

    for line in input.lines() {
        let line = line?;

        let maintenance = session.service_status() == Some(ServiceStatus::Maintenance);
        if maintenance && !in_maintenance {
            writeln!(output, "warning: backend is in maintenance; sync may fail")?;
        }
        in_maintenance = maintenance;

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(output, "error: {}", e)?;
                continue;
            }
        };

        match command {
            ScriptCommand::Event(event) => match session.dispatch(event) {
                Ok(outcome) => writeln!(output, "{}", describe_outcome(&outcome))?,
                Err(e) => writeln!(output, "error: {}", e)?,
            },
            ScriptCommand::Show => writeln!(output, "{}", format_selection(session.selection()))?,
            ScriptCommand::Entries => {
                write!(output, "{}", format_entry_list(session.entries()))?;
                if session.entries().is_empty() {
                    writeln!(output)?;
                }
            }
            ScriptCommand::Month(month) => {
                let today = CalendarDate::from_naive(Local::now().date_naive());
                let grid = format_month_grid(&session.month(month, Some(today)));
                writeln!(output, "{}", grid.trim_end())?;
            }
            ScriptCommand::Sync => {
                let report = session.sync(repository);
                writeln!(output, "{}", format_sync_report(&report))?;
            }
            ScriptCommand::Quit => break,
        }
    }

    let unsaved = session.dispose();
    if !unsaved.is_empty() {
        writeln!(output, "warning: discarded {} unsaved draft(s)", unsaved.len())?;
    }
    Ok(())
}
