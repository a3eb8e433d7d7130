//! Error types for track-units

use thiserror::Error;

use crate::config::ConfigLoadError;
use crate::geometry::GeometryError;
use crate::io::EventFileError;

/// track-units error type
#[derive(Error, Debug)]
pub enum UnitError {
    /// The store cannot hold every unit of the event's layout
    #[error("Cell store holds {len} units, layout needs {required}")]
    StoreTooSmall {
        /// Units in the store
        len: usize,
        /// Units required by the layout
        required: usize,
    },

    /// Invalid geometry parameters
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigLoadError),

    /// Event file could not be loaded
    #[error("Event file error: {0}")]
    EventFile(#[from] EventFileError),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, UnitError>;
