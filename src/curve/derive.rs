//! Instantaneous tempo derivation
//!
//! Converts consecutive beat timestamps into raw BPM samples: each pair of
//! adjacent beats yields one sample with `bpm = 60 / interval`, anchored at
//! the *earlier* beat of the interval. N beats produce N-1 samples.

use crate::analysis::result::BpmSample;
use crate::error::CurveError;

/// Substitute for a zero-length inter-beat interval
///
/// A zero interval denotes a double-detected beat, not silence; dividing by
/// this epsilon keeps the sample finite so the outlier suppressor can deal
/// with it downstream.
const MIN_IBI_EPSILON: f32 = 1e-6;

/// Derive raw BPM samples from beat timestamps
///
/// # Arguments
///
/// * `beat_times` - Beat timestamps in seconds, strictly increasing
///
/// # Returns
///
/// Tuple of (BPM samples, degenerate interval count). The count records how
/// many zero-length intervals were epsilon-corrected; callers surface it as a
/// diagnostic.
///
/// # Errors
///
/// Returns [`CurveError::InvalidInput`] if the timestamps decrease anywhere.
/// Equal adjacent timestamps are not an error; they are the degenerate
/// double-detection case and are epsilon-corrected.
pub fn derive_bpm_samples(beat_times: &[f32]) -> Result<(Vec<BpmSample>, usize), CurveError> {
    if beat_times.len() < 2 {
        return Ok((Vec::new(), 0));
    }

    let mut samples = Vec::with_capacity(beat_times.len() - 1);
    let mut degenerate = 0usize;

    for i in 1..beat_times.len() {
        let ibi = beat_times[i] - beat_times[i - 1];

        if ibi < 0.0 {
            return Err(CurveError::InvalidInput(format!(
                "beat timestamps must be increasing: t[{}]={} precedes t[{}]={}",
                i,
                beat_times[i],
                i - 1,
                beat_times[i - 1]
            )));
        }

        let ibi = if ibi == 0.0 {
            degenerate += 1;
            MIN_IBI_EPSILON
        } else {
            ibi
        };

        samples.push(BpmSample {
            // Anchor at the earlier beat, not the midpoint
            time_sec: beat_times[i - 1],
            bpm: 60.0 / ibi,
        });
    }

    if degenerate > 0 {
        log::debug!(
            "Derived {} BPM samples ({} degenerate intervals corrected)",
            samples.len(),
            degenerate
        );
    }

    Ok((samples, degenerate))
}
