//! Output formatting utilities

use crate::application::{SessionOutcome, SyncReport};
use crate::domain::{DayEntry, LocalTimeEntry, MonthData, SelectionState};

/// Format a list of entries for display
pub fn format_entry_list(entries: &[LocalTimeEntry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format!(
            "{}  {:<10} {:>5}h  {}/{}",
            entry.date, entry.id, entry.hours, entry.refs.theme_id, entry.refs.task_id
        ));
        if let Some(description) = &entry.description {
            output.push_str(&format!("  {}", description));
        }
        if entry.is_draft() {
            output.push_str("  [draft]");
        }
        output.push('\n');
    }
    output
}

fn cell_symbol(cell: &DayEntry) -> String {
    if cell.value <= 0.0 {
        ".".to_string()
    } else if cell.value >= 1.0 {
        "#".to_string()
    } else {
        let tenths = (cell.value * 10.0).round().clamp(1.0, 9.0) as u32;
        tenths.to_string()
    }
}

/// Format the month grid. Cells show tenths of a workday, `#` for a full day.
pub fn format_month_grid(month: &MonthData) -> String {
    let title = format!("{} {}", month.month_name, month.year);
    if month.themes.is_empty() {
        return format!("No entries in {}", title);
    }

    let label_width = month
        .themes
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);

    let mut output = format!("{}\n", title);

    output.push_str(&" ".repeat(label_width));
    for day in 1..=month.days_in_month {
        output.push_str(&format!("{:>3}", day));
    }
    output.push('\n');

    if let Some(first) = month.themes.first() {
        output.push_str(&" ".repeat(label_width));
        for cell in &first.days {
            let mark = match (cell.is_today, cell.is_weekend) {
                (true, _) => "*",
                (false, true) => "w",
                (false, false) => " ",
            };
            output.push_str(&format!("{:>3}", mark));
        }
        output.push('\n');
    }

    for row in &month.themes {
        output.push_str(&format!("{:<width$}", row.name, width = label_width));
        for cell in &row.days {
            output.push_str(&format!("{:>3}", cell_symbol(cell)));
        }
        output.push('\n');
    }

    output
}

pub fn format_selection(selection: &SelectionState) -> String {
    let selected: Vec<String> = selection
        .selected_dates
        .iter()
        .map(|date| date.to_string())
        .collect();

    format!(
        "selected: {} | active: {} | multi: {} | clipboard: {}",
        if selected.is_empty() {
            "none".to_string()
        } else {
            selected.join(", ")
        },
        selection
            .active_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "none".to_string()),
        if selection.is_multi_select_mode {
            "on"
        } else {
            "off"
        },
        selection.clipboard.len()
    )
}

/// One-line message for the outcome of a session event
pub fn describe_outcome(outcome: &SessionOutcome) -> String {
    match outcome {
        SessionOutcome::Selection { selected, active } => format!(
            "{} date(s) selected, active {}",
            selected,
            active
                .map(|date| date.to_string())
                .unwrap_or_else(|| "none".to_string())
        ),
        SessionOutcome::MultiSelect(on) => {
            format!("Multi-select {}", if *on { "on" } else { "off" })
        }
        SessionOutcome::Cleared => "Selection cleared".to_string(),
        SessionOutcome::Copied(count) => format!("Copied {} entry(ies)", count),
        SessionOutcome::NothingToCopy => "Nothing to copy".to_string(),
        SessionOutcome::DraftsCreated(ids) => {
            let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
            format!("Created {} draft(s): {}", ids.len(), ids.join(", "))
        }
        SessionOutcome::NoTarget => "Select a date first".to_string(),
        SessionOutcome::NothingToReplay => "Nothing to replay".to_string(),
        SessionOutcome::Edited(id) => format!("Editing draft {}", id),
    }
}

pub fn format_sync_report(report: &SyncReport) -> String {
    let mut output = format!("Saved {}, failed {}", report.saved, report.failed);
    for error in &report.errors {
        output.push_str(&format!("\n  {}", error));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        build_month_data, CalendarDate, EntryDraft, EntryId, TaskRefs, YearMonth,
    };

    fn entry(day: &str, hours: f64) -> LocalTimeEntry {
        LocalTimeEntry::from_draft(
            EntryId::new("draft-1"),
            EntryDraft::new(CalendarDate::parse(day).unwrap(), TaskRefs::new("T1", "dev"), hours),
        )
    }

    #[test]
    fn test_format_empty_list() {
        assert_eq!(format_entry_list(&[]), "No entries found");
    }

    #[test]
    fn test_format_entry_list_marks_drafts() {
        let mut entry = entry("2024-03-04", 3.5);
        entry.description = Some("review".to_string());
        let output = format_entry_list(&[entry]);

        assert!(output.starts_with("2024-03-04  draft-1"));
        assert!(output.contains("3.5h"));
        assert!(output.contains("T1/dev  review  [draft]"));
    }

    #[test]
    fn test_format_month_grid() {
        let entries = vec![entry("2024-03-04", 7.0), entry("2024-03-05", 3.5)];
        let month = YearMonth::new(2024, 3).unwrap();
        let data = build_month_data(&entries, month, &[], 7.0, None);
        let output = format_month_grid(&data);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "March 2024");
        assert!(lines[1].ends_with(" 30 31"));
        // March 2 and 3 2024 are a weekend
        assert!(lines[2].starts_with(&format!("{}w  w", " ".repeat(10))));
        assert!(lines[3].starts_with(&format!("T1{}.  .  .  #  5  .", " ".repeat(5))));
    }

    #[test]
    fn test_format_empty_month() {
        let data = build_month_data(&[], YearMonth::new(2024, 3).unwrap(), &[], 7.0, None);
        assert_eq!(format_month_grid(&data), "No entries in March 2024");
    }

    #[test]
    fn test_format_selection() {
        let mut selection = SelectionState::new();
        assert_eq!(
            format_selection(&selection),
            "selected: none | active: none | multi: off | clipboard: 0"
        );

        selection.toggle_date_selection(CalendarDate::parse("2024-03-01").unwrap(), false, false);
        assert!(format_selection(&selection).starts_with("selected: 2024-03-01 | active: 2024-03-01"));
    }

    #[test]
    fn test_describe_outcome() {
        let outcome = SessionOutcome::DraftsCreated(vec![EntryId::new("draft-1"), EntryId::new("draft-2")]);
        assert_eq!(describe_outcome(&outcome), "Created 2 draft(s): draft-1, draft-2");
        assert_eq!(describe_outcome(&SessionOutcome::NothingToCopy), "Nothing to copy");
    }
}
