//! Run metadata and diagnostics

use serde::{Deserialize, Serialize};

/// Metadata describing one pipeline run
///
/// Recoverable conditions surface here as counters and warning strings
/// instead of errors, so callers can observe them without the run failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveMetadata {
    /// Number of beat timestamps received
    pub beat_count: usize,

    /// Number of raw per-interval BPM samples derived (beat_count - 1)
    pub raw_sample_count: usize,

    /// Zero-length inter-beat intervals that were epsilon-corrected
    pub degenerate_intervals: usize,

    /// Outlier samples replaced by the suppressor
    pub suppressed_outliers: usize,

    /// Whether the curve was aggregated into fixed windows
    pub aggregated: bool,

    /// Input had fewer beats than the configured floor; the curve is empty
    pub insufficient_beats: bool,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Algorithm version
    pub algorithm_version: String,

    /// Non-fatal diagnostics accumulated during the run
    pub warnings: Vec<String>,
}

impl Default for CurveMetadata {
    fn default() -> Self {
        Self {
            beat_count: 0,
            raw_sample_count: 0,
            degenerate_intervals: 0,
            suppressed_outliers: 0,
            aggregated: false,
            insufficient_beats: false,
            processing_time_ms: 0.0,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            warnings: vec![],
        }
    }
}
