//! # Tempo Contour
//!
//! Dynamic tempo (BPM) curve extraction for music that changes tempo over its
//! duration. Converts an ordered, noisy sequence of beat timestamps (as
//! produced by an external beat-tracking model) into a clean, time-ordered
//! curve of BPM values suitable for display or tempo-locked synchronization.
//!
//! ## Features
//!
//! - **Instantaneous tempo derivation**: `bpm = 60 / inter-beat-interval`,
//!   anchored at the earlier beat of each interval
//! - **Robust outlier suppression**: MAD-based z-scores with pluggable
//!   replacement policies
//! - **Shape-preserving smoothing**: centered Gaussian kernel with
//!   renormalized boundaries
//! - **Acceleration limiting**: bounded tempo change per second, applied
//!   causally in time order
//! - **Window aggregation**: optional fixed-interval resampling for UI use
//! - **Source selection**: percussion-stem vs. original-mix choice on a
//!   signal-energy heuristic, with observable fallback
//!
//! ## Quick Start
//!
//! ```
//! use tempo_contour::{extract_tempo_curve, CurveConfig};
//!
//! // Beat timestamps in seconds, from your beat detector
//! let beat_times = vec![0.0, 0.5, 1.0, 1.5, 2.0];
//!
//! let result = extract_tempo_curve(&beat_times, &CurveConfig::default())?;
//!
//! for sample in &result.curve {
//!     println!("{:.2}s: {:.2} BPM", sample.time_sec, sample.bpm);
//! }
//! # Ok::<(), tempo_contour::CurveError>(())
//! ```
//!
//! ## Architecture
//!
//! The pipeline is a purely sequential batch transformation; each stage
//! consumes the complete output of its predecessor:
//!
//! ```text
//! Beat Times → Derive → Suppress Outliers → Smooth → Limit Acceleration → Aggregate → Curve
//! ```
//!
//! Beat detection and source separation are external collaborators; this
//! crate consumes their output at the interface boundary (`beat_times`, or an
//! already-separated percussion stem for [`preprocessing::source_select`]).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod curve;
pub mod error;
pub mod io;
pub mod preprocessing;

// Re-export main types
pub use analysis::metadata::CurveMetadata;
pub use analysis::result::{BpmMap, BpmSample, CurveResult};
pub use config::CurveConfig;
pub use curve::outlier::OutlierPolicy;
pub use error::CurveError;
pub use preprocessing::source_select::{select_source, SelectedSource, SourceSelection};

use curve::aggregate::aggregate_windows;
use curve::derive::derive_bpm_samples;
use curve::limiter::limit_acceleration;
use curve::outlier::suppress_outliers;
use curve::smooth::gaussian_smooth;

/// Extract a tempo curve from beat timestamps
///
/// Runs the full pipeline: derivation, outlier suppression, smoothing,
/// acceleration limiting, and (when configured) window aggregation.
///
/// # Arguments
///
/// * `beat_times` - Beat timestamps in seconds, strictly increasing
/// * `config` - Pipeline configuration (see [`CurveConfig`] for defaults)
///
/// # Returns
///
/// [`CurveResult`] with the curve and run diagnostics. Fewer beats than the
/// configured floor is not an error: the result carries an empty curve with
/// [`CurveMetadata::insufficient_beats`] set, and the caller decides whether
/// that is fatal.
///
/// # Errors
///
/// Returns [`CurveError::InvalidConfig`] for an invalid configuration (the
/// only condition checked before processing) and [`CurveError::InvalidInput`]
/// for decreasing beat timestamps.
///
/// # Example
///
/// ```
/// use tempo_contour::{extract_tempo_curve, CurveConfig};
///
/// // Keep per-interval resolution instead of the default 2s windows
/// let config = CurveConfig {
///     aggregation_window_sec: 0.0,
///     ..CurveConfig::default()
/// };
///
/// let beat_times = vec![0.0, 0.5, 1.0, 1.5, 2.0];
/// let result = extract_tempo_curve(&beat_times, &config)?;
/// assert_eq!(result.curve.len(), beat_times.len() - 1);
/// # Ok::<(), tempo_contour::CurveError>(())
/// ```
pub fn extract_tempo_curve(
    beat_times: &[f32],
    config: &CurveConfig,
) -> Result<CurveResult, CurveError> {
    use std::time::Instant;
    let start_time = Instant::now();

    config.validate()?;

    log::debug!(
        "Starting tempo curve extraction: {} beats",
        beat_times.len()
    );

    let mut metadata = CurveMetadata {
        beat_count: beat_times.len(),
        ..CurveMetadata::default()
    };

    // Two beats are the hard floor for derivation; min_beats is the
    // configurable floor for a usable result
    let floor = config.min_beats.max(2);
    if beat_times.len() < floor {
        let warning = format!(
            "insufficient beats: got {}, need at least {}",
            beat_times.len(),
            floor
        );
        log::warn!("{}", warning);
        metadata.insufficient_beats = true;
        metadata.warnings.push(warning);
        metadata.processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;
        return Ok(CurveResult {
            curve: vec![],
            metadata,
        });
    }

    // 1. Raw per-interval BPM samples
    let (raw, degenerate) = derive_bpm_samples(beat_times)?;
    metadata.raw_sample_count = raw.len();
    metadata.degenerate_intervals = degenerate;
    if degenerate > 0 {
        metadata.warnings.push(format!(
            "{} zero-length inter-beat interval(s) corrected",
            degenerate
        ));
    }

    // 2. Robust outlier suppression
    let (suppressed, replaced) =
        suppress_outliers(&raw, config.outlier_policy, config.mad_z_threshold);
    metadata.suppressed_outliers = replaced;

    // 3. Smooth while preserving ramp shapes
    let smoothed = gaussian_smooth(&suppressed, config.smoothing_sigma);

    // 4. Bound the tempo acceleration
    let limited = limit_acceleration(&smoothed, config.max_bpm_change_per_sec);

    // 5. Optional fixed-window aggregation for UI consumers
    let curve = if config.aggregation_window_sec > 0.0 {
        metadata.aggregated = true;
        aggregate_windows(&limited, config.aggregation_window_sec)
    } else {
        limited
    };

    metadata.processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;

    log::debug!(
        "Tempo curve extracted: {} samples ({} outliers suppressed, {:.2} ms)",
        curve.len(),
        replaced,
        metadata.processing_time_ms
    );

    Ok(CurveResult { curve, metadata })
}
