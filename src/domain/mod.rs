//! Domain layer - Time entries, selection and the month grid

pub mod calendar_date;
pub mod draft_book;
pub mod entry;
pub mod month;
pub mod quick_actions;
pub mod selection;
pub mod template;

pub use calendar_date::{CalendarDate, YearMonth};
pub use draft_book::DraftBook;
pub use entry::{
    validate_hours, EntryDraft, EntryId, EntryStatus, LocalTimeEntry, TaskRefs, MAX_ENTRY_HOURS,
};
pub use month::{
    build_month_data, build_month_data_now, day_value, DayEntry, MonthData, ThemeInfo, ThemeRow,
    DEFAULT_WORKDAY_HOURS,
};
pub use quick_actions::{copy_previous_day, paste_clipboard, repeat_last_entry};
pub use selection::{copy_selected_entries, SelectionState};
pub use template::{find_template, EntryTemplate, TemplateLine};
