//! Client for the facility's booking portal
//!
//! The portal exposes two form-encoded endpoints: one lists upcoming court
//! sessions as JSON, the other books a session by id. [`PortalClient`]
//! implements both the availability source and the reservation sink.

pub mod client;
pub mod error;
pub mod sessions;

pub use client::{PortalClient, PortalOptions};
pub use error::PortalError;
pub use sessions::{build_grid, is_booking_confirmed, SessionRecord};
