use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{DateKey, TimeOfDay};

/// A window the user wants booked: consecutive slots on one date
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub date: DateKey,

    /// Slot start times in the order they should be booked
    pub hours: Vec<TimeOfDay>,
}

impl BookingRequest {
    pub fn new(date: impl Into<DateKey>, hours: Vec<TimeOfDay>) -> Self {
        Self {
            date: date.into(),
            hours,
        }
    }
}

impl fmt::Display for BookingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.hours.first(), self.hours.last()) {
            (Some(first), Some(last)) if self.hours.len() > 1 => {
                write!(f, "{} {}..{} ({} slots)", self.date, first, last, self.hours.len())
            }
            (Some(first), _) => write!(f, "{} {}", self.date, first),
            _ => write!(f, "{} (no slots)", self.date),
        }
    }
}
