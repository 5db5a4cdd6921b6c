//! Fixed-window curve aggregation
//!
//! Resamples the fine-grained per-interval curve into coarser fixed-width
//! time buckets for lower-resolution consumers. Windows are half-open
//! `[k*w, (k+1)*w)` starting at t = 0; a window with no samples emits
//! nothing, so the aggregated curve may have time gaps.

use crate::analysis::result::BpmSample;

/// Aggregate a tempo curve into fixed time windows
///
/// # Arguments
///
/// * `samples` - BPM samples in time order
/// * `window_sec` - Window width in seconds; `<= 0` disables aggregation
///
/// # Returns
///
/// One sample per non-empty window, placed at the window start with the
/// arithmetic mean BPM of its members. With `window_sec <= 0` or empty input
/// the input is returned unchanged. Window starts are computed as
/// `k * window_sec` (not accumulated), so re-aggregating at the same width
/// reproduces the curve exactly.
pub fn aggregate_windows(samples: &[BpmSample], window_sec: f32) -> Vec<BpmSample> {
    if window_sec <= 0.0 || samples.is_empty() {
        return samples.to_vec();
    }

    let last_time = samples[samples.len() - 1].time_sec;
    let mut aggregated = Vec::new();

    for k in 0.. {
        let start = k as f32 * window_sec;
        if start > last_time {
            break;
        }
        let end = start + window_sec;

        let mut sum = 0.0f32;
        let mut count = 0usize;
        for sample in samples {
            if sample.time_sec >= start && sample.time_sec < end {
                sum += sample.bpm;
                count += 1;
            }
        }

        if count > 0 {
            aggregated.push(BpmSample {
                time_sec: start,
                bpm: sum / count as f32,
            });
        }
    }

    log::debug!(
        "Aggregated {} samples into {} windows of {}s",
        samples.len(),
        aggregated.len(),
        window_sec
    );

    aggregated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_samples(entries: &[(f32, f32)]) -> Vec<BpmSample> {
        entries
            .iter()
            .map(|&(time_sec, bpm)| BpmSample { time_sec, bpm })
            .collect()
    }

    #[test]
    fn test_non_positive_window_is_identity() {
        let samples = make_samples(&[(0.0, 120.0), (0.5, 121.0), (1.0, 119.0)]);

        assert_eq!(aggregate_windows(&samples, 0.0), samples);
        assert_eq!(aggregate_windows(&samples, -2.0), samples);
    }

    #[test]
    fn test_empty_input_is_identity() {
        assert!(aggregate_windows(&[], 2.0).is_empty());
    }

    #[test]
    fn test_mean_per_window() {
        let samples = make_samples(&[(0.0, 100.0), (0.5, 120.0), (1.0, 140.0), (1.5, 160.0)]);
        let out = aggregate_windows(&samples, 1.0);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].time_sec, 0.0);
        assert!((out[0].bpm - 110.0).abs() < 1e-4);
        assert_eq!(out[1].time_sec, 1.0);
        assert!((out[1].bpm - 150.0).abs() < 1e-4);
    }

    #[test]
    fn test_window_boundary_is_half_open() {
        // A sample exactly at t = window belongs to the second window
        let samples = make_samples(&[(0.0, 100.0), (1.0, 200.0)]);
        let out = aggregate_windows(&samples, 1.0);

        assert_eq!(out.len(), 2);
        assert!((out[0].bpm - 100.0).abs() < 1e-4);
        assert!((out[1].bpm - 200.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_windows_skipped() {
        // Nothing between 2s and 6s: windows 1 and 2 emit no sample
        let samples = make_samples(&[(0.5, 120.0), (1.0, 121.0), (6.5, 90.0)]);
        let out = aggregate_windows(&samples, 2.0);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].time_sec, 0.0);
        assert_eq!(out[1].time_sec, 6.0);
    }

    #[test]
    fn test_idempotent_at_same_width() {
        let samples = make_samples(&[
            (0.0, 100.0),
            (0.4, 110.0),
            (0.9, 120.0),
            (1.3, 118.0),
            (2.2, 130.0),
            (4.1, 125.0),
        ]);

        let once = aggregate_windows(&samples, 1.0);
        let twice = aggregate_windows(&once, 1.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_final_window_includes_last_sample() {
        // Last sample sits exactly on a window start; the loop must still
        // visit that window
        let samples = make_samples(&[(0.0, 120.0), (2.0, 140.0)]);
        let out = aggregate_windows(&samples, 2.0);

        assert_eq!(out.len(), 2);
        assert_eq!(out[1].time_sec, 2.0);
        assert!((out[1].bpm - 140.0).abs() < 1e-4);
    }

    #[test]
    fn test_single_window_collapses_to_one_sample() {
        let samples = make_samples(&[(0.1, 100.0), (0.2, 120.0), (0.3, 140.0)]);
        let out = aggregate_windows(&samples, 5.0);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].time_sec, 0.0);
        assert!((out[0].bpm - 120.0).abs() < 1e-4);
    }
}
