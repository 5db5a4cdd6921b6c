//! Error types for the tempo curve pipeline

use std::fmt;

/// Errors that can abort a pipeline run
///
/// Recoverable conditions (insufficient beats, degenerate intervals, a
/// percussion stem that fails to load) are reported through
/// [`CurveMetadata`](crate::analysis::metadata::CurveMetadata) or the
/// source-selection report instead of this enum.
#[derive(Debug, Clone)]
pub enum CurveError {
    /// Invalid input (e.g. beat timestamps out of order)
    InvalidInput(String),

    /// Invalid configuration parameters, rejected before processing begins
    InvalidConfig(String),

    /// Audio decoding error
    Decoding(String),
}

impl fmt::Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CurveError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            CurveError::Decoding(msg) => write!(f, "Decoding error: {}", msg),
        }
    }
}

impl std::error::Error for CurveError {}
