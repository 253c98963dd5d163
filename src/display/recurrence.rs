//! Human-readable recurrence sentences and recurrence-field validation.

use crate::models::notification::{NotificationRecord, RepeatFrequency, Repeats};
use crate::{AppError, Result};

use super::locale::{format_date, DateStyle};

/// Weekday names indexed by the digit stored in `week_selection`.
const WEEKDAYS: [(char, &str); 7] = [
    ('0', "Monday"),
    ('1', "Tuesday"),
    ('2', "Wednesday"),
    ('3', "Thursday"),
    ('4', "Friday"),
    ('5', "Saturday"),
    ('6', "Sunday"),
];

/// Decode a weekday selection such as `"4,0,2"` into Monday-first names.
///
/// Any character other than `0`..`6` is ignored, so malformed input yields
/// a shorter (possibly empty) list rather than an error.
#[must_use]
pub fn decode_week_selection(selection: &str) -> Vec<&'static str> {
    WEEKDAYS
        .iter()
        .filter(|(digit, _)| selection.contains(*digit))
        .map(|(_, name)| *name)
        .collect()
}

fn literal(tag: &str, start: &str) -> String {
    let tag = tag.to_lowercase();
    let mut sentence = String::from("occurs");
    if !tag.is_empty() {
        sentence.push(' ');
        sentence.push_str(&tag);
    }
    sentence.push_str(start);
    sentence
}

/// Describe when `record` recurs, e.g. `occurs daily starting 3/1/2024`.
///
/// Returns `None` for non-recurring records. Never fails: unknown tags are
/// rendered literally and a missing start date drops the `starting` clause.
#[must_use]
pub fn describe(record: &NotificationRecord, style: DateStyle) -> Option<String> {
    if !record.is_recurrence {
        return None;
    }

    let start = record
        .repeat_start_date
        .map(|date| format!(" starting {}", format_date(date, style)))
        .unwrap_or_default();

    let sentence = match (&record.repeats, &record.repeat_frequency) {
        (Some(Repeats::Custom), Some(frequency @ (RepeatFrequency::Day | RepeatFrequency::Month))) => {
            format!(
                "occurs every {} {}(s){start}",
                record.repeat_for,
                frequency.as_str().to_lowercase()
            )
        }
        (Some(Repeats::Custom), Some(RepeatFrequency::Week)) => {
            let days = decode_week_selection(record.week_selection.as_deref().unwrap_or_default());
            format!(
                "occurs every {} week(s) on ({}){start}",
                record.repeat_for,
                days.join(",")
            )
        }
        (Some(repeats), _) => literal(repeats.as_str(), &start),
        (None, _) => literal("", &start),
    };

    Some(sentence)
}

/// Check recurrence fields for combinations the describer can only render literally.
///
/// Advisory: callers log the error and keep rendering.
///
/// # Errors
///
/// Returns `AppError::InvalidRecurrenceCombination` when a custom recurrence
/// has no recognised frequency, when `repeat_for` is zero, or when the start
/// date falls after the end date.
pub fn validate_recurrence(record: &NotificationRecord) -> Result<()> {
    if !record.is_recurrence {
        return Ok(());
    }

    if record.repeats == Some(Repeats::Custom) {
        match &record.repeat_frequency {
            Some(RepeatFrequency::Day | RepeatFrequency::Week | RepeatFrequency::Month) => {}
            Some(RepeatFrequency::Other(tag)) => {
                return Err(AppError::InvalidRecurrenceCombination(format!(
                    "custom recurrence with unknown frequency {tag:?}"
                )));
            }
            None => {
                return Err(AppError::InvalidRecurrenceCombination(
                    "custom recurrence without a frequency".into(),
                ));
            }
        }

        if record.repeat_for == 0 {
            return Err(AppError::InvalidRecurrenceCombination(
                "custom recurrence must repeat at least every 1 unit".into(),
            ));
        }
    }

    if let (Some(start), Some(end)) = (record.repeat_start_date, record.repeat_end_date) {
        if start > end {
            return Err(AppError::InvalidRecurrenceCombination(format!(
                "repeat start {start} is after repeat end {end}"
            )));
        }
    }

    Ok(())
}
