use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{DateKey, SessionId, TimeOfDay};

/// What to do for one requested hour
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotAssignment {
    /// Reserve this session
    Reserve(SessionId),

    /// The user already holds a court at this hour
    AlreadyHeld,

    /// No usable court was assigned
    Unassigned,
}

impl SlotAssignment {
    pub fn session_id(&self) -> Option<&SessionId> {
        match self {
            SlotAssignment::Reserve(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_reservation(&self) -> bool {
        matches!(self, SlotAssignment::Reserve(_))
    }
}

/// Which resolution strategy produced a layout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutTier {
    /// The same court for every requested hour
    SharedCourt { court: usize },

    /// Best effort per hour
    PerHour,
}

impl fmt::Display for LayoutTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Facility numbers its courts from 1
            LayoutTier::SharedCourt { court } => write!(f, "shared court {}", court + 1),
            LayoutTier::PerHour => f.write_str("per hour"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub hour: TimeOfDay,
    pub assignment: SlotAssignment,
}

impl LayoutEntry {
    pub fn new(hour: impl Into<TimeOfDay>, assignment: SlotAssignment) -> Self {
        Self {
            hour: hour.into(),
            assignment,
        }
    }
}

/// Court assignment for every hour of one booking request, in request order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub date: DateKey,
    pub tier: LayoutTier,
    pub entries: Vec<LayoutEntry>,
}

impl Layout {
    pub fn new(date: DateKey, tier: LayoutTier, entries: Vec<LayoutEntry>) -> Self {
        Self {
            date,
            tier,
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn assignments(&self) -> impl Iterator<Item = &SlotAssignment> {
        self.entries.iter().map(|entry| &entry.assignment)
    }

    /// Sessions to reserve, in layout order
    pub fn session_ids(&self) -> impl Iterator<Item = &SessionId> {
        self.assignments().filter_map(SlotAssignment::session_id)
    }

    pub fn reservation_count(&self) -> usize {
        self.session_ids().count()
    }
}
