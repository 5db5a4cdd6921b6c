//! Robust outlier suppression
//!
//! Bounds the influence of spurious BPM values (missed or doubled beat
//! detections) without assuming a Gaussian distribution of tempos. Genuine
//! tempo changes are not noise and must survive; the median absolute
//! deviation is far less sensitive to them than a standard deviation.
//!
//! # Algorithm
//!
//! 1. Compute the median and `MAD = median(|x - median|)` over all samples
//! 2. Robust z-score per sample: `z = 0.6745 * (x - median) / MAD`; when
//!    MAD == 0 the score is taken at its limit (zero on the median, infinite
//!    off it), so a constant-tempo array passes through unchanged
//! 3. Samples with `|z|` above the threshold are *replaced* by the median
//!    (not clipped to a bound); the replacement value is chosen by
//!    [`OutlierPolicy`]

use crate::analysis::result::BpmSample;

/// Rescales MAD to behave like a standard deviation under a normal assumption
const MAD_TO_SIGMA: f32 = 0.6745;

/// Replacement policy for suppressed outliers
///
/// The robust z-score is always computed from the global median and MAD; the
/// policy only decides what value replaces a flagged sample. Global-median
/// replacement is the canonical default. For long pieces with genuine
/// multi-section tempo shifts the global median can be too aggressive; a
/// windowed replacement keeps the substitute local to the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlierPolicy {
    /// No suppression; the raw samples pass through unchanged
    Off,
    /// Replace flagged samples with the global median
    GlobalMedian,
    /// Replace flagged samples with the median of a centered window of the
    /// given size (clamped at the array edges)
    WindowedMedian {
        /// Window size in samples; must be > 0
        window: usize,
    },
}

/// Suppress statistically anomalous BPM samples
///
/// # Arguments
///
/// * `samples` - BPM samples in time order
/// * `policy` - Replacement policy (see [`OutlierPolicy`])
/// * `z_threshold` - Robust z-score threshold (typically 3.0)
///
/// # Returns
///
/// Tuple of (suppressed samples, replaced count). Cardinality and timestamps
/// are unchanged; only `bpm` values of flagged samples differ from the input.
pub fn suppress_outliers(
    samples: &[BpmSample],
    policy: OutlierPolicy,
    z_threshold: f32,
) -> (Vec<BpmSample>, usize) {
    if samples.is_empty() || policy == OutlierPolicy::Off {
        return (samples.to_vec(), 0);
    }

    let bpms: Vec<f32> = samples.iter().map(|s| s.bpm).collect();
    let center = median(&bpms);

    let deviations: Vec<f32> = bpms.iter().map(|&x| (x - center).abs()).collect();
    let mad = median(&deviations);

    let mut out = samples.to_vec();
    let mut replaced = 0usize;

    for (i, sample) in out.iter_mut().enumerate() {
        // MAD == 0 means the majority of samples sit exactly on the median;
        // in that limit the robust z-score is infinite for any deviation at
        // all. A constant-tempo array therefore passes through unchanged.
        let anomalous = if mad == 0.0 {
            sample.bpm != center
        } else {
            let z = MAD_TO_SIGMA * (sample.bpm - center) / mad;
            z.abs() > z_threshold
        };

        if anomalous {
            sample.bpm = match policy {
                OutlierPolicy::GlobalMedian => center,
                OutlierPolicy::WindowedMedian { window } => windowed_median(&bpms, i, window),
                OutlierPolicy::Off => unreachable!(),
            };
            replaced += 1;
        }
    }

    if replaced > 0 {
        log::debug!(
            "Suppressed {} outlier(s) of {} samples (median {:.2} BPM, MAD {:.3})",
            replaced,
            out.len(),
            center,
            mad
        );
    }

    (out, replaced)
}

/// Median with midpoint interpolation for even-length input
fn median(values: &[f32]) -> f32 {
    debug_assert!(!values.is_empty());

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f32::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Median of a centered window around `index`, clamped at the array edges
fn windowed_median(values: &[f32], index: usize, window: usize) -> f32 {
    let half = window / 2;
    let start = index.saturating_sub(half);
    let end = (index + half + 1).min(values.len());
    median(&values[start..end])
}
