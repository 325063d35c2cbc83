//! Session records returned by the portal's court listing

use court_booker_types::{Court, DateKey, SessionId, TimeOfDay, TimeSlotGrid, COURTS_PER_SLOT};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Title prefix of court sessions; other session kinds share the listing
const COURT_TITLE_PREFIX: &str = "Bane ";

/// User statuses of sessions that cannot be booked yet
const PENDING_STATUSES: [&str; 2] = ["ikke_startet", "reservert"];

/// One entry of the portal's session listing
#[derive(Debug, Clone, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "tittel")]
    pub title: String,

    #[serde(rename = "brukerstatus", default)]
    pub user_status: String,

    #[serde(rename = "dato_id", deserialize_with = "string_or_number")]
    pub date: String,

    #[serde(rename = "starter_kl")]
    pub starts_at: String,

    #[serde(rename = "er_booket", deserialize_with = "flag", default)]
    pub booked_self: bool,

    #[serde(rename = "tilgjengelig", deserialize_with = "count", default)]
    pub available: i64,

    #[serde(rename = "timeid", deserialize_with = "string_or_number")]
    pub session_id: String,
}

impl SessionRecord {
    /// Zero-based court index parsed from a `Bane <digit>` title
    pub fn court_index(&self) -> Option<usize> {
        let rest = self.title.strip_prefix(COURT_TITLE_PREFIX)?;
        let digit = rest.chars().next()?.to_digit(10)? as usize;

        match digit {
            1..=COURTS_PER_SLOT => Some(digit - 1),
            _ => None,
        }
    }

    /// A court session the user can act on
    pub fn is_open(&self) -> bool {
        self.court_index().is_some() && !PENDING_STATUSES.contains(&self.user_status.as_str())
    }

    pub fn to_court(&self) -> Court {
        Court {
            available: self.available > 0,
            booked_self: self.booked_self,
            session_id: Some(SessionId::new(self.session_id.clone())),
        }
    }
}

/// Build an availability grid from the session listing
///
/// Closed sessions are dropped. Courts the listing does not mention stay at
/// their default, unavailable state.
pub fn build_grid(records: &[SessionRecord]) -> TimeSlotGrid {
    let mut grid = TimeSlotGrid::new();

    for record in records {
        let Some(index) = record.court_index().filter(|_| record.is_open()) else {
            debug!(title = %record.title, status = %record.user_status, "Skipping session");
            continue;
        };

        if let Err(e) = grid.insert_court(
            DateKey::new(record.date.clone()),
            TimeOfDay::new(record.starts_at.clone()),
            index,
            record.to_court(),
        ) {
            warn!(session_id = %record.session_id, error = %e, "Dropping session");
        }
    }

    grid
}

/// True iff the booking endpoint confirmed the reservation
///
/// Anything other than an object carrying `"status": "bestilt"` is a refusal.
pub fn is_booking_confirmed(response: &Value) -> bool {
    response
        .as_object()
        .and_then(|body| body.get("status"))
        .and_then(Value::as_str)
        .map_or(false, |status| status == "bestilt")
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

fn count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("expected integer, got {n}"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected integer, got {s:?}"))),
        Value::Null => Ok(0),
        other => Err(de::Error::custom(format!("expected integer, got {other}"))),
    }
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s == "True"),
        Value::Bool(b) => Ok(b),
        _ => Ok(false),
    }
}
