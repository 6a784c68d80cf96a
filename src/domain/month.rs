//! Month grid derived from time entries

use crate::domain::{CalendarDate, LocalTimeEntry, YearMonth};
use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Length of the workday one full grid cell stands for
pub const DEFAULT_WORKDAY_HOURS: f64 = 7.0;

/// Color used for themes missing from the catalog
pub const FALLBACK_THEME_COLOR: &str = "#9e9e9e";

/// Display information for a theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeInfo {
    pub id: String,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    FALLBACK_THEME_COLOR.to_string()
}

/// One cell of the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayEntry {
    pub day: u32,
    /// Share of a workday, in `[0, 1]`
    pub value: f64,
    pub is_weekend: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeRow {
    pub theme_id: String,
    pub name: String,
    pub color: String,
    pub days: Vec<DayEntry>,
}

impl ThemeRow {
    pub fn day(&self, day: u32) -> Option<&DayEntry> {
        self.days.get(day.checked_sub(1)? as usize)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthData {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub days_in_month: u32,
    pub first_day_of_week: Weekday,
    pub themes: Vec<ThemeRow>,
}

impl MonthData {
    pub fn row(&self, theme_id: &str) -> Option<&ThemeRow> {
        self.themes.iter().find(|row| row.theme_id == theme_id)
    }
}

/// Share of a workday covered by `total_hours`, capped at 1
pub fn day_value(total_hours: f64, workday_hours: f64) -> f64 {
    if total_hours <= 0.0 || workday_hours <= 0.0 {
        return 0.0;
    }
    (total_hours / workday_hours).min(1.0)
}

/// Build the grid of `month` from `entries`.
///
/// Entries of other months are ignored. Rows are ordered by theme name
/// (case-insensitive), then theme id. `today` only sets the `is_today` flags.
pub fn build_month_data(
    entries: &[LocalTimeEntry],
    month: YearMonth,
    themes: &[ThemeInfo],
    workday_hours: f64,
    today: Option<CalendarDate>,
) -> MonthData {
    let days_in_month = month.days_in_month();
    let first_day = month.first_day();

    // theme id -> hours per day index
    let mut totals: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for entry in entries.iter().filter(|entry| month.contains(entry.date)) {
        let hours = totals
            .entry(entry.refs.theme_id.as_str())
            .or_insert_with(|| vec![0.0; days_in_month as usize]);
        hours[(entry.date.day() - 1) as usize] += entry.hours;
    }

    let today_in_month = today.filter(|date| month.contains(*date)).map(|d| d.day());

    let mut rows: Vec<ThemeRow> = totals
        .into_iter()
        .map(|(theme_id, hours)| {
            let info = themes.iter().find(|theme| theme.id == theme_id);
            let days = hours
                .iter()
                .enumerate()
                .map(|(index, total)| {
                    let day = index as u32 + 1;
                    let is_weekend = first_day
                        .with_day(day)
                        .map_or(false, |date| CalendarDate::from_naive(date).is_weekend());
                    DayEntry {
                        day,
                        value: day_value(*total, workday_hours),
                        is_weekend,
                        is_today: today_in_month == Some(day),
                    }
                })
                .collect();

            ThemeRow {
                theme_id: theme_id.to_string(),
                name: info
                    .map(|theme| theme.name.clone())
                    .unwrap_or_else(|| theme_id.to_string()),
                color: info
                    .map(|theme| theme.color.clone())
                    .unwrap_or_else(default_color),
                days,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.theme_id.cmp(&b.theme_id))
    });

    log::debug!(
        "built {} with {} theme row(s) from {} entries",
        month,
        rows.len(),
        entries.len()
    );

    MonthData {
        year: month.year,
        month: month.month,
        month_name: first_day.format("%B").to_string(),
        days_in_month,
        first_day_of_week: first_day.weekday(),
        themes: rows,
    }
}

/// Build the grid with `is_today` taken from the local clock
pub fn build_month_data_now(
    entries: &[LocalTimeEntry],
    month: YearMonth,
    themes: &[ThemeInfo],
    workday_hours: f64,
) -> MonthData {
    let today = CalendarDate::from_naive(chrono::Local::now().date_naive());
    build_month_data(entries, month, themes, workday_hours, Some(today))
}
