use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};

pub const MILLIS_PER_DAY: i64 = 1000 * 3600 * 24;

/// Suffix a midnight BSON date picks up once flattened to text.
pub const MIDNIGHT_SUFFIX: &str = "T00:00:00.000Z";

/// Whole days since the last visit, or `NotANumber` when the stored date
/// could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaysSince {
    Days(i64),
    NotANumber,
}

impl fmt::Display for DaysSince {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaysSince::Days(days) => write!(f, "{days}"),
            DaysSince::NotANumber => f.write_str("NaN"),
        }
    }
}

pub fn days_since(date: &str, now: DateTime<Utc>) -> DaysSince {
    match parse_date(date) {
        // floor, so a date in the future goes to -1 rather than 0
        Some(last) => DaysSince::Days((now - last).num_milliseconds().div_euclid(MILLIS_PER_DAY)),
        None => DaysSince::NotANumber,
    }
}

/// ISO-8601 date or date-time. Partial dates (`2024`, `2024-03`) and times
/// without an offset count as UTC.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(input) {
        return Some(date_time.with_timezone(&Utc));
    }

    let (date, time) = match input.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (input, None),
    };
    let date = parse_calendar_date(date)?;

    let Some(time) = time else {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    };

    let (clock, offset) = split_offset(time)?;
    let clock = NaiveTime::parse_from_str(clock, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(clock, "%H:%M"))
        .ok()?;
    let naive = date.and_time(clock);

    match offset {
        Some(offset) => naive
            .and_local_timezone(offset)
            .single()
            .map(|date_time| date_time.with_timezone(&Utc)),
        None => Some(naive.and_utc()),
    }
}

/// `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, with `±YYYYYY` extended years.
fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let signed = input.starts_with(['+', '-']);
    let year_len = if signed { 7 } else { 4 };
    let year = input.get(..year_len)?;
    if !year.bytes().skip(usize::from(signed)).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = year.parse().ok()?;

    let (month, day) = match &input[year_len..] {
        "" => (1, 1),
        rest => {
            let rest = rest.strip_prefix('-')?;
            match rest.split_once('-') {
                Some((month, day)) => (two_digits(month)?, two_digits(day)?),
                None => (two_digits(rest)?, 1),
            }
        }
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Splits `10:00:00+01:00` into the clock and its offset. `Z`, `±HH:MM` and
/// `±HHMM` are accepted.
fn split_offset(time: &str) -> Option<(&str, Option<FixedOffset>)> {
    if let Some(clock) = time.strip_suffix(['Z', 'z']) {
        return Some((clock, FixedOffset::east_opt(0)));
    }

    let Some(index) = time.rfind(['+', '-']) else {
        return Some((time, None));
    };
    let (clock, offset) = time.split_at(index);

    let sign = if offset.starts_with('-') { -1 } else { 1 };
    let digits = offset[1..].replacen(':', "", 1);
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours = two_digits(&digits[..2])? as i32;
    let minutes = two_digits(&digits[2..])? as i32;

    Some((clock, Some(FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))?)))
}

fn two_digits(input: &str) -> Option<u32> {
    if input.len() != 2 || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    input.parse().ok()
}

pub fn display_date(date: &str) -> String {
    date.replacen(MIDNIGHT_SUFFIX, "", 1)
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
