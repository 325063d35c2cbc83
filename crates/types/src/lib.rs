pub mod court;
pub mod grid;
pub mod key;
pub mod layout;
pub mod request;

pub use court::*;
pub use grid::*;
pub use key::*;
pub use layout::*;
pub use request::*;

/// Number of courts the facility offers in every time slot
pub const COURTS_PER_SLOT: usize = 3;
