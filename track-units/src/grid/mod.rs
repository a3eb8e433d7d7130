//! Composite unit grid: layout, parameters, resolution and storage.
//!
//! ## Architecture
//!
//! ```text
//!   DetectorGeometry ──► UnitParameters::init ──► GridLayout
//!                                 │
//!                                 ▼
//!   Track (φ, η) ──────────► CellResolver ──► Credit { unit, region }
//!                                                     │
//!                                                     ▼
//!                                              CellStore (Vec<Cell>)
//! ```
//!
//! ## Key Components
//!
//! - [`FillConfig`]: cut thresholds and grid selection
//! - [`GridLayout`]: ordered sub-grids and their id offsets
//! - [`UnitParameters`]: per-event geometry snapshot
//! - [`CellResolver`]: `(φ, η)` to unit ids
//! - [`CellStore`]: the pre-allocated units

mod config;
mod layout;
mod params;
mod resolver;
mod storage;

pub use config::{FillConfig, GridMode};
pub use layout::{GridLayout, SubGrid, SubGridKind};
pub use params::UnitParameters;
pub use resolver::{CellResolver, Credit, Region, Resolution};
pub use storage::{CellStore, UnitCounts};
