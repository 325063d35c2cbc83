//! Court Booker
//!
//! Books recurring court time at a multi-court sports facility: fetch the
//! facility's availability once, pick a court layout for each requested
//! block of half-hour slots, and reserve the chosen sessions one by one.

pub mod app;

pub use court_booker_config as config;
pub use court_booker_orchestrator as orchestrator;
pub use court_booker_portal as portal;
pub use court_booker_resolver as resolver;
pub use court_booker_types as types;
