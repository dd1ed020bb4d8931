//! Due date parsing and remaining-days classification
//!
//! Due dates are accepted in several input forms:
//! - Stored form: "05-Jan-2025"
//! - ISO dates: "2025-01-05"
//! - Human dates: "Jan 5", "January 5 2025", "5 Jan 2025", "01/05/2025"
//! - Relative: "today", "tomorrow", "monday", "next friday"
//! - Offset: "in 3 days", "in 1 week"

use std::fmt;

use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime, Weekday};

use crate::error::{CoreError, Result};

/// On-disk format of a task's due date, e.g. `05-Jan-2025`
pub const DUE_DATE_FORMAT: &str = "%d-%b-%Y";

/// On-disk format of a task's creation timestamp, e.g. `2025-01-05 03:04:05 PM`
pub const ADDED_DATE_FORMAT: &str = "%Y-%m-%d %I:%M:%S %p";

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse user input into a due date
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    parse_date_relative_to(input, today())
}

/// Parse user input into a due date, resolving relative forms against `today`
pub fn parse_date_relative_to(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim().to_lowercase();

    if let Some(date) = try_parse_relative(&input, today) {
        return Ok(date);
    }

    if let Some(date) = try_parse_weekday(&input, today) {
        return Ok(date);
    }

    if let Some(date) = try_parse_offset(&input, today) {
        return Ok(date);
    }

    let dated_formats = [
        DUE_DATE_FORMAT, // 05-Jan-2025
        "%Y-%m-%d",      // 2025-01-05
        "%b %d %Y",      // Jan 5 2025
        "%B %d %Y",      // January 5 2025
        "%d %b %Y",      // 5 Jan 2025
        "%d %B %Y",      // 5 January 2025
        "%m/%d/%Y",      // 01/05/2025
    ];

    for format in &dated_formats {
        if let Ok(date) = NaiveDate::parse_from_str(&input, format) {
            return Ok(date);
        }
    }

    // Year-less forms resolve to the next occurrence, starting today
    let yearless_formats = ["%b %d", "%B %d", "%d %b", "%d %B", "%m/%d"];
    for format in &yearless_formats {
        let with_year = format!("{} {}", input, today.year());
        let format_with_year = format!("{} %Y", format);
        if let Ok(date) = NaiveDate::parse_from_str(&with_year, &format_with_year) {
            if date >= today {
                return Ok(date);
            }
            return date
                .with_year(today.year() + 1)
                .ok_or_else(|| CoreError::parse(format!("Invalid date '{}'", input)));
        }
    }

    Err(CoreError::parse(format!(
        "Could not parse date '{}'. Try formats like: 'tomorrow', '05-Jan-2025', '2025-01-05', 'next monday', 'in 3 days'",
        input
    )))
}

fn try_parse_relative(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    match input {
        "today" => Some(today),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        _ => None,
    }
}

fn try_parse_weekday(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let weekday_str = input.strip_prefix("next ").unwrap_or(input);

    let target = match weekday_str {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thur" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };

    // Always the next occurrence strictly after today
    let days = (target.num_days_from_monday() as i64 - today.weekday().num_days_from_monday() as i64
        + 7)
        % 7;
    let days_until = if days == 0 { 7 } else { days as u64 };

    today.checked_add_days(Days::new(days_until))
}

fn try_parse_offset(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let rest = input.strip_prefix("in ")?.trim();
    let parts: Vec<&str> = rest.split_whitespace().collect();

    if parts.len() != 2 {
        return None;
    }

    let num: u64 = parts[0].parse().ok()?;

    match parts[1] {
        "day" | "days" => today.checked_add_days(Days::new(num)),
        "week" | "weeks" => num
            .checked_mul(7)
            .and_then(|days| today.checked_add_days(Days::new(days))),
        _ => None,
    }
}

/// Format a due date the way it is stored
pub fn format_due_date(date: NaiveDate) -> String {
    date.format(DUE_DATE_FORMAT).to_string()
}

/// Parse a due date in its stored form
pub fn parse_due_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DUE_DATE_FORMAT)
        .map_err(|e| CoreError::parse_with_source(format!("Invalid due date '{}'", s), e))
}

/// Format a creation timestamp the way it is stored
pub fn format_added_date(dt: NaiveDateTime) -> String {
    dt.format(ADDED_DATE_FORMAT).to_string()
}

/// Parse a creation timestamp in its stored form
pub fn parse_added_date(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, ADDED_DATE_FORMAT)
        .map_err(|e| CoreError::parse_with_source(format!("Invalid added date '{}'", s), e))
}

/// How much time is left before a task is due
///
/// Only used for presentation; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    Expired,
    Today,
    Tomorrow,
    Days(i64),
}

impl Remaining {
    /// Classify `due - today`
    pub fn between(due: NaiveDate, today: NaiveDate) -> Self {
        match due.signed_duration_since(today).num_days() {
            n if n < 0 => Self::Expired,
            0 => Self::Today,
            1 => Self::Tomorrow,
            n => Self::Days(n),
        }
    }

    pub fn is_expired(self) -> bool {
        self == Self::Expired
    }

    /// Due today or tomorrow
    pub fn is_imminent(self) -> bool {
        matches!(self, Self::Today | Self::Tomorrow)
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expired => write!(f, "Expired"),
            Self::Today => write!(f, "Today"),
            Self::Tomorrow => write!(f, "Tomorrow"),
            Self::Days(n) => write!(f, "{} days", n),
        }
    }
}

/// Serde adapter for `due date`
pub(crate) mod due_date_serde {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_due_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_due_date(&s).map_err(de::Error::custom)
    }
}

/// Serde adapter for `added date`
pub(crate) mod added_date_serde {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(
        dt: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_added_date(*dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_added_date(&s).map_err(de::Error::custom)
    }
}
