use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::{Court, DateKey, TimeOfDay, COURTS_PER_SLOT};

/// Availability of every court at one (date, time of day)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub date: DateKey,
    pub time_of_day: TimeOfDay,

    /// Indexed by the facility's court number minus one
    pub courts: [Court; COURTS_PER_SLOT],
}

impl TimeSlot {
    /// A slot the facility offers where no court is bookable yet
    pub fn new(date: DateKey, time_of_day: TimeOfDay) -> Self {
        Self {
            date,
            time_of_day,
            courts: Default::default(),
        }
    }

    pub fn court(&self, index: usize) -> Option<&Court> {
        self.courts.get(index)
    }
}

/// Snapshot of the facility's availability for one booking run
///
/// A missing date or time key means the facility does not offer that slot at
/// all, which is different from a slot whose courts are all taken.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlotGrid {
    slots: BTreeMap<DateKey, BTreeMap<TimeOfDay, TimeSlot>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("court index {index} out of range (facility has {max} courts)", max = COURTS_PER_SLOT)]
    CourtIndexOutOfRange { index: usize },
}

/// A requested slot the facility is not offering
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UnavailableSlot {
    #[error("date {0} is not offered")]
    Date(DateKey),

    #[error("{} slot(s) on {date} are not offered: {}", .hours.len(), join_hours(.hours))]
    Hours { date: DateKey, hours: Vec<TimeOfDay> },
}

fn join_hours(hours: &[TimeOfDay]) -> String {
    hours
        .iter()
        .map(TimeOfDay::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl TimeSlotGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a court, creating its slot on first use
    pub fn insert_court(
        &mut self,
        date: DateKey,
        time_of_day: TimeOfDay,
        index: usize,
        court: Court,
    ) -> Result<(), GridError> {
        if index >= COURTS_PER_SLOT {
            return Err(GridError::CourtIndexOutOfRange { index });
        }

        let slot = self
            .slots
            .entry(date.clone())
            .or_default()
            .entry(time_of_day.clone())
            .or_insert_with(|| TimeSlot::new(date, time_of_day));
        slot.courts[index] = court;

        Ok(())
    }

    /// Insert a whole slot, replacing any previous one at the same key
    pub fn insert_slot(&mut self, slot: TimeSlot) {
        self.slots
            .entry(slot.date.clone())
            .or_default()
            .insert(slot.time_of_day.clone(), slot);
    }

    pub fn slot(&self, date: &DateKey, time_of_day: &TimeOfDay) -> Option<&TimeSlot> {
        self.slots.get(date)?.get(time_of_day)
    }

    pub fn court(&self, date: &DateKey, time_of_day: &TimeOfDay, index: usize) -> Option<&Court> {
        self.slot(date, time_of_day)?.court(index)
    }

    pub fn contains_date(&self, date: &DateKey) -> bool {
        self.slots.contains_key(date)
    }

    /// Verify every requested hour on `date` is offered
    pub fn check_offered(&self, date: &DateKey, hours: &[TimeOfDay]) -> Result<(), UnavailableSlot> {
        let Some(day) = self.slots.get(date) else {
            return Err(UnavailableSlot::Date(date.clone()));
        };

        let missing: Vec<TimeOfDay> = hours
            .iter()
            .filter(|hour| !day.contains_key(*hour))
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(UnavailableSlot::Hours {
                date: date.clone(),
                hours: missing,
            })
        }
    }

    pub fn dates(&self) -> impl Iterator<Item = &DateKey> {
        self.slots.keys()
    }

    pub fn slots_on(&self, date: &DateKey) -> impl Iterator<Item = &TimeSlot> {
        self.slots.get(date).into_iter().flat_map(|day| day.values())
    }

    pub fn slot_count(&self) -> usize {
        self.slots.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(values: &[&str]) -> Vec<TimeOfDay> {
        values.iter().map(|h| TimeOfDay::from(*h)).collect()
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = TimeSlotGrid::new();
        assert!(grid.is_empty());
        assert_eq!(grid.slot_count(), 0);
    }

    #[test]
    fn test_insert_court_creates_slot_with_closed_neighbours() {
        let mut grid = TimeSlotGrid::new();
        let date = DateKey::from("20240115");
        let hour = TimeOfDay::from("18:00");

        grid.insert_court(date.clone(), hour.clone(), 1, Court::open("42"))
            .unwrap();

        let slot = grid.slot(&date, &hour).unwrap();
        assert!(!slot.courts[0].is_usable());
        assert!(slot.courts[1].is_usable());
        assert!(!slot.courts[2].is_usable());
        assert_eq!(grid.slot_count(), 1);
    }

    #[test]
    fn test_insert_court_rejects_out_of_range_index() {
        let mut grid = TimeSlotGrid::new();
        let err = grid
            .insert_court("20240115".into(), "18:00".into(), 3, Court::open("1"))
            .unwrap_err();
        assert_eq!(err, GridError::CourtIndexOutOfRange { index: 3 });
        assert!(grid.is_empty());
    }

    #[test]
    fn test_check_offered_missing_date() {
        let grid = TimeSlotGrid::new();
        let date = DateKey::from("20240115");
        assert_eq!(
            grid.check_offered(&date, &hours(&["18:00"])),
            Err(UnavailableSlot::Date(date))
        );
    }

    #[test]
    fn test_check_offered_reports_every_missing_hour() {
        let mut grid = TimeSlotGrid::new();
        let date = DateKey::from("20240115");
        grid.insert_court(date.clone(), "18:00".into(), 0, Court::open("1"))
            .unwrap();

        let err = grid
            .check_offered(&date, &hours(&["18:00", "18:30", "19:00"]))
            .unwrap_err();
        assert_eq!(
            err,
            UnavailableSlot::Hours {
                date: date.clone(),
                hours: hours(&["18:30", "19:00"]),
            }
        );
        assert!(err.to_string().contains("18:30, 19:00"));

        assert!(grid.check_offered(&date, &hours(&["18:00"])).is_ok());
    }

    #[test]
    fn test_slots_on_iterates_in_time_order() {
        let mut grid = TimeSlotGrid::new();
        let date = DateKey::from("20240115");
        grid.insert_slot(TimeSlot::new(date.clone(), "19:00".into()));
        grid.insert_slot(TimeSlot::new(date.clone(), "08:00".into()));

        let times: Vec<&str> = grid
            .slots_on(&date)
            .map(|slot| slot.time_of_day.as_str())
            .collect();
        assert_eq!(times, vec!["08:00", "19:00"]);
        assert_eq!(grid.slots_on(&DateKey::from("20240116")).count(), 0);
    }
}
