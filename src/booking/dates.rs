//! Date and time handling for the booking flow.
//!
//! Dates reach us as ISO `yyyy-mm-dd` (browser date inputs) or as
//! `dd/mm/yyyy` (typed by hand). Both normalize to ISO. Times are `HH:MM`.
//! Timestamps sent to the backend are naive; no timezone is attached.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

pub const ISO_DATE: &str = "%Y-%m-%d";
const TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S";

/// Why a date or time string was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("date is empty")]
    Empty,

    #[error("date {0:?} is missing a day, month or year")]
    Incomplete(String),

    #[error("{0:?} is not a valid date")]
    InvalidDate(String),

    #[error("{0:?} is not a valid time of day")]
    InvalidTime(String),
}

/// Parse either accepted date shape.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DateError::Empty);
    }

    if input.contains('-') {
        return NaiveDate::parse_from_str(input, ISO_DATE)
            .map_err(|_| DateError::InvalidDate(input.to_string()));
    }

    let parts: Vec<&str> = input.split('/').map(str::trim).collect();
    let (day, month, year) = match parts.as_slice() {
        [day, month, year] if !day.is_empty() && !month.is_empty() && !year.is_empty() => {
            (*day, *month, *year)
        }
        [_, _, _, ..] if parts.len() > 3 => {
            return Err(DateError::InvalidDate(input.to_string()))
        }
        _ => return Err(DateError::Incomplete(input.to_string())),
    };

    let iso = format!("{}-{:0>2}-{:0>2}", year, month, day);
    NaiveDate::parse_from_str(&iso, ISO_DATE).map_err(|_| DateError::InvalidDate(input.to_string()))
}

/// Normalize a date to zero-padded ISO form.
///
/// ```
/// use carhire_web::booking::dates::normalize_date;
///
/// assert_eq!(normalize_date("16/11/2025").unwrap(), "2025-11-16");
/// assert_eq!(normalize_date("2025-11-16").unwrap(), "2025-11-16");
/// ```
pub fn normalize_date(input: &str) -> Result<String, DateError> {
    parse_date(input).map(|date| date.format(ISO_DATE).to_string())
}

pub fn parse_time(input: &str) -> Result<NaiveTime, DateError> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .map_err(|_| DateError::InvalidTime(input.to_string()))
}

/// `{date}T{HH:MM}:00` with the date normalized first.
pub fn combine_date_time(date: &str, time: &str) -> Result<String, DateError> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    Ok(NaiveDateTime::new(date, time).format(TIMESTAMP).to_string())
}

/// Twelve-hour clock: "13:30" becomes "1:30 PM", midnight is "12:00 AM".
pub fn format_time_12h(time: &str) -> Result<String, DateError> {
    Ok(parse_time(time)?.format("%-I:%M %p").to_string())
}

/// Long form used on the review page, e.g. "November 16, 2025 10:00 AM".
pub fn format_date_time(date: &str, time: &str) -> Result<String, DateError> {
    let date = parse_date(date)?;
    Ok(format!("{} {}", date.format("%B %-d, %Y"), format_time_12h(time)?))
}

/// Short form used in the search bar, e.g. "Sun, Nov 16". Unparseable input
/// shows as a dash.
pub fn format_short_date(date: &str) -> String {
    parse_date(date)
        .map(|d| d.format("%a, %b %-d").to_string())
        .unwrap_or_else(|_| "—".to_string())
}

/// Pickup and return dates/times for a rental.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RentalWindow {
    pub pickup_date: String,
    pub pickup_time: String,
    pub return_date: String,
    pub return_time: String,
}

/// Default rental length offered on the search page
pub const DEFAULT_RENTAL_DAYS: i64 = 28;
pub const DEFAULT_RETURN_TIME: &str = "10:00";

impl RentalWindow {
    /// Pickup now, return four weeks later at 10:00.
    pub fn starting_at(now: NaiveDateTime) -> Self {
        let return_day = now.date() + Duration::days(DEFAULT_RENTAL_DAYS);
        Self {
            pickup_date: now.date().format(ISO_DATE).to_string(),
            pickup_time: now.time().format("%H:%M").to_string(),
            return_date: return_day.format(ISO_DATE).to_string(),
            return_time: DEFAULT_RETURN_TIME.to_string(),
        }
    }

    /// Every date and time filled in
    pub fn is_complete(&self) -> bool {
        [
            &self.pickup_date,
            &self.pickup_time,
            &self.return_date,
            &self.return_time,
        ]
        .iter()
        .all(|value| !value.trim().is_empty())
    }

    pub fn pickup_display(&self) -> String {
        format_date_time(&self.pickup_date, &self.pickup_time)
            .unwrap_or_else(|_| format!("{} {}", self.pickup_date, self.pickup_time))
    }

    pub fn return_display(&self) -> String {
        format_date_time(&self.return_date, &self.return_time)
            .unwrap_or_else(|_| format!("{} {}", self.return_date, self.return_time))
    }
}
