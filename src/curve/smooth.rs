//! Gaussian curve smoothing
//!
//! Suppresses sample-to-sample jitter while preserving the shape of genuine
//! tempo ramps. A centered Gaussian kernel is used instead of a moving
//! average, which flattens ramps asymmetrically at the edges.
//!
//! Boundary handling: the kernel is re-normalized over the taps that overlap
//! valid input, so a constant input comes back as the same constant all the
//! way to the edges. Implicit zero-padding would depress the first and last
//! ~3 sigma samples instead.

use crate::analysis::result::BpmSample;

/// Smooth the BPM values with a truncated Gaussian kernel
///
/// # Arguments
///
/// * `samples` - BPM samples in time order
/// * `sigma` - Kernel standard deviation in samples (must be positive;
///   validated upstream by [`CurveConfig::validate`](crate::config::CurveConfig::validate))
///
/// # Returns
///
/// Smoothed samples; cardinality and timestamps unchanged.
pub fn gaussian_smooth(samples: &[BpmSample], sigma: f32) -> Vec<BpmSample> {
    if samples.is_empty() {
        return Vec::new();
    }

    // Kernel covers +/- 3 sigma, radius at least 1
    let radius = ((3.0 * sigma).ceil() as usize).max(1);
    let kernel = gaussian_kernel(radius, sigma);

    let n = samples.len();
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        let mut acc = 0.0f32;
        let mut weight = 0.0f32;

        for (k, &w) in kernel.iter().enumerate() {
            // Tap offset relative to the center sample
            let j = i as isize + k as isize - radius as isize;
            if j < 0 || j >= n as isize {
                continue;
            }
            acc += w * samples[j as usize].bpm;
            weight += w;
        }

        // weight > 0 always holds: the center tap itself is in range
        out.push(BpmSample {
            time_sec: samples[i].time_sec,
            bpm: acc / weight,
        });
    }

    out
}

/// Normalized Gaussian kernel of length `2 * radius + 1`
fn gaussian_kernel(radius: usize, sigma: f32) -> Vec<f32> {
    let mut kernel = Vec::with_capacity(2 * radius + 1);
    let denom = 2.0 * sigma * sigma;

    for i in 0..(2 * radius + 1) {
        let x = i as f32 - radius as f32;
        kernel.push((-(x * x) / denom).exp());
    }

    let sum: f32 = kernel.iter().sum();
    for w in kernel.iter_mut() {
        *w /= sum;
    }

    kernel
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_samples(bpms: &[f32]) -> Vec<BpmSample> {
        bpms.iter()
            .enumerate()
            .map(|(i, &bpm)| BpmSample {
                time_sec: i as f32 * 0.5,
                bpm,
            })
            .collect()
    }

    #[test]
    fn test_identity_on_constant_input() {
        // Must hold at the edges too, which is what the renormalized
        // boundary policy buys
        let samples = make_samples(&[120.0; 10]);
        let out = gaussian_smooth(&samples, 1.2);

        assert_eq!(out.len(), samples.len());
        for sample in &out {
            assert!(
                (sample.bpm - 120.0).abs() < 1e-4,
                "constant input changed: {}",
                sample.bpm
            );
        }
    }

    #[test]
    fn test_short_input_identity_on_constant() {
        // Input shorter than the kernel
        let samples = make_samples(&[95.0, 95.0]);
        let out = gaussian_smooth(&samples, 1.2);

        for sample in &out {
            assert!((sample.bpm - 95.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_jitter_reduced() {
        // Alternating +/-4 BPM jitter around 120 should contract toward 120
        let bpms: Vec<f32> = (0..20)
            .map(|i| if i % 2 == 0 { 124.0 } else { 116.0 })
            .collect();
        let samples = make_samples(&bpms);
        let out = gaussian_smooth(&samples, 1.2);

        let max_dev_in = bpms.iter().map(|b| (b - 120.0).abs()).fold(0.0, f32::max);
        let max_dev_out = out
            .iter()
            .skip(2)
            .take(16)
            .map(|s| (s.bpm - 120.0).abs())
            .fold(0.0, f32::max);

        assert!(
            max_dev_out < max_dev_in / 2.0,
            "jitter not reduced: {} vs {}",
            max_dev_out,
            max_dev_in
        );
    }

    #[test]
    fn test_ramp_shape_preserved() {
        // A linear ramp should stay monotonic after smoothing
        let bpms: Vec<f32> = (0..30).map(|i| 100.0 + i as f32 * 1.5).collect();
        let samples = make_samples(&bpms);
        let out = gaussian_smooth(&samples, 1.2);

        for pair in out.windows(2) {
            assert!(
                pair[1].bpm >= pair[0].bpm - 1e-3,
                "ramp no longer monotonic: {} -> {}",
                pair[0].bpm,
                pair[1].bpm
            );
        }
        // Interior of the ramp is reproduced nearly exactly
        for (i, sample) in out.iter().enumerate().skip(4).take(22) {
            assert!((sample.bpm - bpms[i]).abs() < 0.1);
        }
    }

    #[test]
    fn test_timestamps_unchanged() {
        let samples = make_samples(&[100.0, 110.0, 105.0, 112.0, 108.0]);
        let out = gaussian_smooth(&samples, 1.2);

        for (a, b) in out.iter().zip(samples.iter()) {
            assert_eq!(a.time_sec, b.time_sec);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(gaussian_smooth(&[], 1.2).is_empty());
    }

    #[test]
    fn test_kernel_normalized() {
        for &(radius, sigma) in &[(1usize, 0.5f32), (4, 1.2), (9, 3.0)] {
            let kernel = gaussian_kernel(radius, sigma);
            assert_eq!(kernel.len(), 2 * radius + 1);
            let sum: f32 = kernel.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
            // Symmetric around the center tap
            assert!((kernel[0] - kernel[kernel.len() - 1]).abs() < 1e-6);
        }
    }
}
