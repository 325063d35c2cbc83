use async_trait::async_trait;
use court_booker_orchestrator::{ActionSink, AvailabilitySource, SinkError, SourceError};
use court_booker_types::{SessionId, TimeSlotGrid};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::{Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::PortalError;
use crate::sessions::{build_grid, is_booking_confirmed, SessionRecord};

pub const DEFAULT_SESSIONS_URL: &str =
    "https://www.sit.no/ibooking-api/callback/get-sessions-court-multiple";
pub const DEFAULT_BOOKING_URL: &str = "https://www.sit.no/ibooking-api/callback/book-session";

/// Connection settings for [`PortalClient`]
#[derive(Debug, Clone)]
pub struct PortalOptions {
    pub sessions_url: String,
    pub booking_url: String,

    /// Value of the `sessions` form field: how far ahead the listing reaches
    pub sessions_window: u32,

    /// Raw `Cookie` header of a logged-in portal session
    pub session_cookie: Option<String>,

    pub timeout: Duration,
}

impl Default for PortalOptions {
    fn default() -> Self {
        Self {
            sessions_url: DEFAULT_SESSIONS_URL.to_string(),
            booking_url: DEFAULT_BOOKING_URL.to_string(),
            sessions_window: 3,
            session_cookie: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Booking portal client
///
/// Lists court sessions for the availability grid and books sessions by id.
pub struct PortalClient {
    options: PortalOptions,
    client: reqwest::Client,
}

impl PortalClient {
    pub fn new(options: PortalOptions) -> Result<Self, PortalError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &options.session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| PortalError::InvalidCookie(e.to_string()))?;
            headers.insert(COOKIE, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(options.timeout)
            .build()?;

        Ok(Self { options, client })
    }

    /// Fetch the raw session listing
    pub async fn list_sessions(&self) -> Result<Vec<SessionRecord>, PortalError> {
        let window = self.options.sessions_window.to_string();

        debug!(url = %self.options.sessions_url, window = %window, "Querying court sessions");

        let response = self
            .client
            .post(&self.options.sessions_url)
            .form(&[("sessions", window.as_str())])
            .send()
            .await?;

        let body = Self::checked(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Book one session; `Ok(false)` when the portal declines
    pub async fn book_session(&self, session_id: &SessionId) -> Result<bool, PortalError> {
        debug!(url = %self.options.booking_url, session_id = %session_id, "Booking session");

        let response = self
            .client
            .post(&self.options.booking_url)
            .form(&[
                ("sessionID", session_id.as_str()),
                ("sendSMS", "0"),
                ("isGroup", "true"),
            ])
            .send()
            .await?;

        let body = Self::checked(response).await?.text().await?;
        let value: Value = serde_json::from_str(&body)?;

        let confirmed = is_booking_confirmed(&value);
        if !confirmed {
            debug!(session_id = %session_id, response = %value, "Booking not confirmed");
        }

        Ok(confirmed)
    }

    async fn checked(response: Response) -> Result<Response, PortalError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(status = %status, "Portal rejected session cookie");
            return Err(PortalError::Unauthorized {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Portal API error");
            return Err(PortalError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl AvailabilitySource for PortalClient {
    async fn fetch(&self) -> Result<TimeSlotGrid, SourceError> {
        let records = self.list_sessions().await?;
        let grid = build_grid(&records);

        debug!(
            sessions = records.len(),
            slots = grid.slot_count(),
            "Built availability grid"
        );

        Ok(grid)
    }
}

#[async_trait]
impl ActionSink for PortalClient {
    async fn reserve(&self, session_id: &SessionId) -> Result<bool, SinkError> {
        Ok(self.book_session(session_id).await?)
    }
}
