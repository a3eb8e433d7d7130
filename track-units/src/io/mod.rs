//! Event input.
//!
//! Reads YAML event files into [`Track`](crate::core::Track) collections for
//! the command line tool and the integration tests.
//!
//! ```rust,ignore
//! use track_units::io::EventFile;
//! use std::path::Path;
//!
//! let file = EventFile::load(Path::new("data/events.yaml"))?;
//! for event in &file.events {
//!     let tracks = event.to_tracks();
//! }
//! ```

mod events;

pub use events::{EventFile, EventFileError, EventRecord, TrackRecord};
