//! Locale-dependent formatting of dates, timestamps and name lists.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Calendar date ordering used when rendering dates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    /// `3/1/2024`
    #[default]
    MonthDayYear,
    /// `1/3/2024`
    DayMonthYear,
    /// `2024-03-01`
    Iso,
}

/// Render the calendar date of `instant` with no clock component.
#[must_use]
pub fn format_date(instant: DateTime<Utc>, style: DateStyle) -> String {
    let (year, month, day) = (instant.year(), instant.month(), instant.day());
    match style {
        DateStyle::MonthDayYear => format!("{month}/{day}/{year}"),
        DateStyle::DayMonthYear => format!("{day}/{month}/{year}"),
        DateStyle::Iso => format!("{year:04}-{month:02}-{day:02}"),
    }
}

/// Render date and clock time, e.g. `3/1/2024 10:05 AM`.
///
/// The ISO style uses a 24-hour clock.
#[must_use]
pub fn format_timestamp(instant: DateTime<Utc>, style: DateStyle) -> String {
    let date = format_date(instant, style);
    let time = match style {
        DateStyle::Iso => instant.format("%H:%M").to_string(),
        DateStyle::MonthDayYear | DateStyle::DayMonthYear => {
            instant.format("%-I:%M %p").to_string()
        }
    };
    format!("{date} {time}")
}

fn default_delimiter() -> String {
    ", ".into()
}

fn default_final_separator() -> String {
    " and ".into()
}

/// Separators used to join a list of names for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ListStyle {
    /// Placed between all but the last two names.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Placed before the last name.
    #[serde(default = "default_final_separator")]
    pub final_separator: String,
}

impl Default for ListStyle {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            final_separator: default_final_separator(),
        }
    }
}

impl ListStyle {
    /// Join `names` as `A, B and C`, with no trailing separator.
    #[must_use]
    pub fn join(&self, names: &[String]) -> String {
        match names {
            [] => String::new(),
            [only] => only.clone(),
            [head @ .., last] => {
                format!("{}{}{last}", head.join(&self.delimiter), self.final_separator)
            }
        }
    }
}
