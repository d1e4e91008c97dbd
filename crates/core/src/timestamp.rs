//! Timezone-aware timestamps.
//!
//! Transaction timestamps must carry an explicit UTC offset. The offset the
//! caller supplied is kept as-is and never converted.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use taxledger_shared::{EntryError, EntryResult, FieldValue};

use crate::validation::type_check_string;

/// Canonical rendering, e.g. `2021-01-02 08:42:43.882000 +0000`.
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f %z";

const DATE_TIME_SEPARATORS: [&str; 2] = ["T", " "];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];
const OFFSET_GAPS: [&str; 2] = ["", " "];
const OFFSET_FORMATS: [&str; 3] = ["%:z", "%z", "%#z"];

/// A point in time with the UTC offset it was recorded in.
#[derive(Debug, Clone, Copy)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Validates and parses a raw input value.
    ///
    /// Non-string input is a type error. Text that cannot be parsed, or that
    /// parses without an offset, is a value error.
    pub fn parse(name: &str, value: &FieldValue) -> EntryResult<Self> {
        let text = type_check_string(name, value)?;
        Self::parse_str(name, text)
    }

    /// Parses text using the permissive grammar.
    ///
    /// Accepts RFC 3339 plus `T` or space separated date-times with optional
    /// fractional seconds and an offset written as `Z`, `+HH:MM`, `+HHMM` or
    /// `+HH`, optionally preceded by a space. A date without a time is
    /// accepted when an offset follows it.
    pub fn parse_str(name: &str, text: &str) -> EntryResult<Self> {
        let trimmed = text.trim();

        if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(parsed));
        }

        let normalized = normalize_zulu(trimmed);
        for format in offset_formats() {
            if let Ok(parsed) = DateTime::parse_from_str(&normalized, &format) {
                return Ok(Self(parsed));
            }
        }

        if let Some(parsed) = parse_date_with_offset(&normalized) {
            return Ok(Self(parsed));
        }

        if is_naive(trimmed) {
            return Err(EntryError::value_error(format!(
                "Parameter '{name}' value has no timezone info: {text}"
            )));
        }

        Err(EntryError::value_error(format!(
            "Error parsing parameter '{name}': Unknown string format: {text}"
        )))
    }

    /// Wraps an already validated date-time.
    #[must_use]
    pub const fn from_datetime(datetime: DateTime<FixedOffset>) -> Self {
        Self(datetime)
    }

    /// Returns the underlying date-time.
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    /// Calendar year in the recorded offset.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of month (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Hour (0-23).
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Minute (0-59).
    #[must_use]
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Second (0-59).
    #[must_use]
    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Sub-second part in microseconds.
    #[must_use]
    pub fn microsecond(&self) -> u32 {
        self.0.nanosecond() / 1_000
    }

    /// The recorded UTC offset.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        *self.0.offset()
    }
}

fn normalize_zulu(text: &str) -> String {
    match text.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => text.to_string(),
    }
}

fn offset_formats() -> impl Iterator<Item = String> {
    DATE_TIME_SEPARATORS.into_iter().flat_map(|separator| {
        TIME_FORMATS.into_iter().flat_map(move |time| {
            OFFSET_GAPS.into_iter().flat_map(move |gap| {
                OFFSET_FORMATS
                    .into_iter()
                    .map(move |offset| format!("%Y-%m-%d{separator}{time}{gap}{offset}"))
            })
        })
    })
}

/// A bare date followed by an offset is taken as midnight in that offset.
fn parse_date_with_offset(text: &str) -> Option<DateTime<FixedOffset>> {
    let (date, offset) = text.split_at_checked(10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let offset = offset.trim_start();
    if offset.is_empty() {
        return None;
    }
    let midnight = format!("{date}T00:00:00{offset}");
    offset_formats().find_map(|format| DateTime::parse_from_str(&midnight, &format).ok())
}

fn is_naive(text: &str) -> bool {
    let is_naive_datetime = DATE_TIME_SEPARATORS.into_iter().any(|separator| {
        TIME_FORMATS.into_iter().any(|time| {
            NaiveDateTime::parse_from_str(text, &format!("%Y-%m-%d{separator}{time}")).is_ok()
        })
    });
    is_naive_datetime || NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.0.offset() == other.0.offset()
    }
}

impl Eq for Timestamp {}

impl Hash for Timestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.timestamp().hash(state);
        self.0.timestamp_subsec_nanos().hash(state);
        self.0.offset().local_minus_utc().hash(state);
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    /// Orders by instant; equal instants are ordered by offset.
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0).then_with(|| {
            self.0
                .offset()
                .local_minus_utc()
                .cmp(&other.0.offset().local_minus_utc())
        })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}
