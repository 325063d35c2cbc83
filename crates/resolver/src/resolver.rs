//! Court layout resolution
//!
//! Resolution runs in two tiers. The first looks for one court that is usable
//! for every requested hour. Only when no such court exists does the second
//! tier fall back to picking whatever is free hour by hour.
//!
//! Both tiers scan without stopping at the first success: a later candidate
//! replaces an earlier one, so the highest court index wins ties.

use court_booker_types::{
    CourtState, DateKey, Layout, LayoutEntry, LayoutTier, SlotAssignment, TimeOfDay, TimeSlot,
    TimeSlotGrid, COURTS_PER_SLOT,
};
use tracing::debug;

/// Picks which court to reserve for each hour of a booking request
#[derive(Clone, Copy, Debug, Default)]
pub struct LayoutResolver;

impl LayoutResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a layout for `hours` on `date`
    ///
    /// Returns `None` when any requested slot is missing from the grid or when
    /// neither tier finds an assignment. The grid is only read.
    pub fn resolve(
        &self,
        grid: &TimeSlotGrid,
        date: &DateKey,
        hours: &[TimeOfDay],
    ) -> Option<Layout> {
        let mut slots = Vec::with_capacity(hours.len());
        for hour in hours {
            match grid.slot(date, hour) {
                Some(slot) => slots.push(slot),
                None => {
                    debug!(date = %date, hour = %hour, "Requested slot not in grid");
                    return None;
                }
            }
        }

        if let Some(layout) = shared_court_layout(date, hours, &slots) {
            return Some(layout);
        }

        debug!(date = %date, "No single court free for every hour, trying per-hour layout");
        per_hour_layout(date, hours, &slots)
    }
}

/// Tier 1: one court index for all hours
fn shared_court_layout(date: &DateKey, hours: &[TimeOfDay], slots: &[&TimeSlot]) -> Option<Layout> {
    let mut selected = None;

    for court in 0..COURTS_PER_SLOT {
        if let Some(entries) = court_column(hours, slots, court) {
            debug!(date = %date, court = court + 1, "Court usable for every requested hour");
            selected = Some((court, entries));
        }
    }

    selected.map(|(court, entries)| {
        Layout::new(date.clone(), LayoutTier::SharedCourt { court }, entries)
    })
}

/// Entries for court `court` at every hour, or `None` if it blocks anywhere
fn court_column(hours: &[TimeOfDay], slots: &[&TimeSlot], court: usize) -> Option<Vec<LayoutEntry>> {
    hours
        .iter()
        .zip(slots)
        .map(|(hour, slot)| {
            let assignment = match slot.courts[court].state() {
                CourtState::Open(Some(id)) => SlotAssignment::Reserve(id.clone()),
                CourtState::Open(None) => SlotAssignment::Unassigned,
                CourtState::Held => SlotAssignment::AlreadyHeld,
                CourtState::Blocked => return None,
            };
            Some(LayoutEntry::new(hour.clone(), assignment))
        })
        .collect()
}

/// Tier 2: per-hour fallback
///
/// The working assignment is shared across hours. After each hour with at
/// least one usable court it becomes the candidate; hours without one stay
/// unassigned and do not update the candidate.
fn per_hour_layout(date: &DateKey, hours: &[TimeOfDay], slots: &[&TimeSlot]) -> Option<Layout> {
    let mut working = vec![SlotAssignment::Unassigned; hours.len()];
    let mut candidate = None;

    for (position, (hour, slot)) in hours.iter().zip(slots).enumerate() {
        let mut satisfiable = false;

        for (index, court) in slot.courts.iter().enumerate() {
            match court.state() {
                CourtState::Open(Some(id)) => {
                    debug!(date = %date, hour = %hour, court = index + 1, "Court is free");
                    working[position] = SlotAssignment::Reserve(id.clone());
                    satisfiable = true;
                }
                CourtState::Open(None) => {
                    debug!(date = %date, hour = %hour, court = index + 1, "Court is free but has no session");
                    satisfiable = true;
                }
                CourtState::Held => {
                    debug!(date = %date, hour = %hour, court = index + 1, "Court already booked by you");
                    if !working[position].is_reservation() {
                        working[position] = SlotAssignment::AlreadyHeld;
                    }
                    satisfiable = true;
                }
                CourtState::Blocked => {}
            }
        }

        if satisfiable {
            candidate = Some(working.clone());
        } else {
            debug!(date = %date, hour = %hour, "No usable court");
        }
    }

    candidate.map(|assignments| {
        let entries = hours
            .iter()
            .cloned()
            .zip(assignments)
            .map(|(hour, assignment)| LayoutEntry { hour, assignment })
            .collect();
        Layout::new(date.clone(), LayoutTier::PerHour, entries)
    })
}
