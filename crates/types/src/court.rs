use serde::{Deserialize, Serialize};

use crate::SessionId;

/// One bookable court at one time slot
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    /// Bookable by this user right now
    pub available: bool,

    /// Already reserved by this user
    pub booked_self: bool,

    /// Handle the facility needs to reserve this court; `None` when the
    /// facility did not publish the court for this slot
    pub session_id: Option<SessionId>,
}

/// What a court means for layout resolution
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CourtState<'a> {
    /// Free for this user; `None` when there is no session to reserve it with
    Open(Option<&'a SessionId>),

    /// Already held by this user; usable but never reserved again
    Held,

    /// Neither free nor held
    Blocked,
}

impl Court {
    pub fn open(session_id: impl Into<SessionId>) -> Self {
        Self {
            available: true,
            booked_self: false,
            session_id: Some(session_id.into()),
        }
    }

    pub fn held(session_id: impl Into<SessionId>) -> Self {
        Self {
            available: false,
            booked_self: true,
            session_id: Some(session_id.into()),
        }
    }

    /// Published by the facility but not bookable
    pub fn taken(session_id: impl Into<SessionId>) -> Self {
        Self {
            available: false,
            booked_self: false,
            session_id: Some(session_id.into()),
        }
    }

    /// `booked_self` wins over `available` so a held court is never re-reserved.
    /// An available court stays usable even without a session handle.
    pub fn state(&self) -> CourtState<'_> {
        if self.booked_self {
            CourtState::Held
        } else if self.available {
            CourtState::Open(self.session_id.as_ref())
        } else {
            CourtState::Blocked
        }
    }

    pub fn is_usable(&self) -> bool {
        !matches!(self.state(), CourtState::Blocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_court_is_blocked() {
        let court = Court::default();
        assert_eq!(court.state(), CourtState::Blocked);
        assert!(!court.is_usable());
    }

    #[test]
    fn test_open_court_exposes_session() {
        let court = Court::open("101");
        assert_eq!(court.state(), CourtState::Open(Some(&SessionId::new("101"))));
        assert!(court.is_usable());
    }

    #[test]
    fn test_booked_self_wins_over_available() {
        let court = Court {
            available: true,
            booked_self: true,
            session_id: Some(SessionId::new("7")),
        };
        assert_eq!(court.state(), CourtState::Held);
    }

    #[test]
    fn test_available_without_session_is_usable() {
        let court = Court {
            available: true,
            booked_self: false,
            session_id: None,
        };
        assert_eq!(court.state(), CourtState::Open(None));
        assert!(court.is_usable());
    }

    #[test]
    fn test_taken_court_blocks() {
        assert!(!Court::taken("9").is_usable());
    }
}
