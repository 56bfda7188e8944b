//! Error types for configuration and settings handling

use thiserror::Error;

/// Errors surfaced by the strict configuration path and settings I/O.
///
/// The simulation itself never fails: out-of-range requests are clamped and
/// invalid selections are substituted with defaults.
#[derive(Error, Debug)]
pub enum SimError {
    /// Displacement outside the supported set
    #[error("Unsupported engine displacement: {0} cc")]
    UnsupportedDisplacement(u32),

    /// Transmission name that matches no known kind
    #[error("Unknown transmission type: '{0}'")]
    UnknownTransmission(String),

    /// Malformed settings file
    #[error("Settings parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Settings file could not be read or written
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
