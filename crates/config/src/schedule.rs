//! Weekly booking schedule
//!
//! A schedule is a list of lines like `Mon 18:00-20:00`. Each line becomes a
//! booking request for the next occurrence of that weekday (today included),
//! split into the half-hour slots the facility sells.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike, Weekday};
use court_booker_types::{BookingRequest, DateKey, TimeOfDay};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::Result;

/// Date key format used by the facility
const DATE_KEY_FORMAT: &str = "%Y%m%d";

const TIME_FORMAT: &str = "%H:%M";

const SLOT_MINUTES: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("expected '<Weekday> HH:MM-HH:MM', got {0:?}")]
    Malformed(String),

    #[error("unknown weekday {0:?}")]
    UnknownWeekday(String),

    #[error("invalid time {0:?}")]
    InvalidTime(String),

    #[error("{0} is not on a half hour")]
    NotOnHalfHour(String),

    #[error("interval starts and ends at {0}")]
    EmptyInterval(String),

    #[error("line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },
}

/// One weekly booking: a weekday and a half-open time interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ScheduleEntry {
    /// Half-hour slots covered by this entry
    pub fn slots(&self) -> Vec<TimeOfDay> {
        slots_between(self.start, self.end)
    }

    /// Booking request for the next occurrence of this entry on or after `today`
    pub fn to_request(&self, today: NaiveDate) -> BookingRequest {
        let date = next_date_for(self.weekday, today);
        BookingRequest::new(date_key(date), self.slots())
    }
}

impl FromStr for ScheduleEntry {
    type Err = ScheduleError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(day), Some(interval), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ScheduleError::Malformed(s.to_string()));
        };

        let weekday = day
            .parse::<Weekday>()
            .map_err(|_| ScheduleError::UnknownWeekday(day.to_string()))?;

        let (start, end) = interval
            .split_once('-')
            .ok_or_else(|| ScheduleError::Malformed(s.to_string()))?;

        let start = parse_slot_time(start)?;
        let end = parse_slot_time(end)?;

        if start == end {
            return Err(ScheduleError::EmptyInterval(format_time(start)));
        }

        Ok(Self {
            weekday,
            start,
            end,
        })
    }
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.weekday,
            format_time(self.start),
            format_time(self.end)
        )
    }
}

/// `today` if it falls on `weekday`, otherwise the next such day
pub fn next_date_for(weekday: Weekday, today: NaiveDate) -> NaiveDate {
    let ahead = (7 + weekday.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
    today + Duration::days(i64::from(ahead))
}

pub fn date_key(date: NaiveDate) -> DateKey {
    DateKey::new(date.format(DATE_KEY_FORMAT).to_string())
}

/// Half-hour slot starts from `start` up to but excluding `end`
///
/// Intervals that cross midnight wrap around, so `23:00-00:30` yields
/// `23:00`, `23:30` and `00:00`.
pub fn half_hour_slots(start: &str, end: &str) -> std::result::Result<Vec<TimeOfDay>, ScheduleError> {
    let start = parse_slot_time(start)?;
    let end = parse_slot_time(end)?;

    if start == end {
        return Err(ScheduleError::EmptyInterval(format_time(start)));
    }

    Ok(slots_between(start, end))
}

/// Parse schedule text, skipping blank lines and `#` comments
pub fn parse_schedule(text: &str) -> std::result::Result<Vec<ScheduleEntry>, ScheduleError> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, content)| {
            content
                .parse()
                .map_err(|e: ScheduleError| ScheduleError::InvalidLine {
                    line,
                    reason: e.to_string(),
                })
        })
        .collect()
}

/// Read and parse a schedule file
pub fn load_schedule_file(path: &Path) -> Result<Vec<ScheduleEntry>> {
    let text = std::fs::read_to_string(path)?;
    let entries = parse_schedule(&text)?;

    debug!(path = %path.display(), entries = entries.len(), "Loaded schedule");

    Ok(entries)
}

fn slots_between(start: NaiveTime, end: NaiveTime) -> Vec<TimeOfDay> {
    let mut slots = Vec::new();
    let mut current = start;

    while current != end {
        slots.push(TimeOfDay::new(format_time(current)));
        current = current.overflowing_add_signed(Duration::minutes(SLOT_MINUTES)).0;
    }

    slots
}

fn parse_slot_time(s: &str) -> std::result::Result<NaiveTime, ScheduleError> {
    let time = NaiveTime::parse_from_str(s, TIME_FORMAT)
        .map_err(|_| ScheduleError::InvalidTime(s.to_string()))?;

    if time.minute() % 30 != 0 {
        return Err(ScheduleError::NotOnHalfHour(s.to_string()));
    }

    Ok(time)
}

fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}
