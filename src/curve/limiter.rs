//! Tempo acceleration limiting
//!
//! BPM cannot change arbitrarily fast between consecutive beats. This stage
//! enforces a maximum rate of change per unit time, removing residual
//! smoothing artifacts and detector glitches that imply implausible jumps.
//!
//! The pass is causal and stateful: each clamp depends on the (possibly
//! already-clamped) previous value, so it must run strictly in increasing
//! time order. The first sample has no predecessor and is never modified.

use crate::analysis::result::BpmSample;

/// Floor for the time delta between consecutive samples
const MIN_DT_EPSILON: f32 = 1e-6;

/// Clamp per-sample BPM changes to a maximum rate
///
/// # Arguments
///
/// * `samples` - BPM samples in time order
/// * `max_rate_per_sec` - Maximum BPM change per second (typically 4.5)
///
/// # Returns
///
/// Limited samples; cardinality and timestamps unchanged. For every adjacent
/// pair the output satisfies `|bpm[i] - bpm[i-1]| <= max_rate_per_sec * dt`.
pub fn limit_acceleration(samples: &[BpmSample], max_rate_per_sec: f32) -> Vec<BpmSample> {
    let mut out = samples.to_vec();
    if out.len() < 2 {
        return out;
    }

    for i in 1..out.len() {
        let dt = (out[i].time_sec - out[i - 1].time_sec).max(MIN_DT_EPSILON);
        let max_delta = max_rate_per_sec * dt;
        let diff = out[i].bpm - out[i - 1].bpm;

        if diff > max_delta {
            out[i].bpm = out[i - 1].bpm + max_delta;
        } else if diff < -max_delta {
            out[i].bpm = out[i - 1].bpm - max_delta;
        }
    }

    out
}
