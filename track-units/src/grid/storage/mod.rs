//! Unit store for the fill pass.
//!
//! ## Key Types
//!
//! - [`CellStore`]: pre-allocated units plus the event's touched-unit list
//! - [`UnitCounts`]: statistics over unit states

mod core;
mod types;

pub use self::core::CellStore;
pub use types::UnitCounts;
