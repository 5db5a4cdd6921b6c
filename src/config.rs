//! Configuration parameters for tempo curve extraction

use crate::curve::outlier::OutlierPolicy;
use crate::error::CurveError;

/// Pipeline configuration parameters
///
/// All thresholds are explicit values passed into the pipeline entry point;
/// there is no process-wide mutable state. The defaults are empirically tuned
/// for full-length music tracks and documented per field.
#[derive(Debug, Clone)]
pub struct CurveConfig {
    // Source selection
    /// Total-absolute-amplitude threshold above which an isolated percussion
    /// stem is preferred over the original mix (default: 1000.0)
    ///
    /// This is an empirically chosen constant, not derived from signal
    /// statistics; it depends on loudness normalization upstream.
    pub energy_threshold: f32,

    // Derivation
    /// Minimum number of beat timestamps for a usable curve (default: 3)
    ///
    /// Below this floor the pipeline returns an empty curve with an
    /// insufficient-beats diagnostic rather than an error. Must be >= 2,
    /// since two beats are needed for a single BPM sample.
    pub min_beats: usize,

    // Outlier suppression
    /// Robust z-score threshold for MAD outlier suppression (default: 3.0)
    pub mad_z_threshold: f32,

    /// Replacement policy for suppressed outliers (default: GlobalMedian)
    pub outlier_policy: OutlierPolicy,

    // Smoothing
    /// Standard deviation of the Gaussian smoothing kernel, in samples
    /// (default: 1.2; smaller = more responsive, larger = smoother)
    pub smoothing_sigma: f32,

    // Acceleration limiting
    /// Maximum plausible tempo change in BPM per second (default: 4.5)
    pub max_bpm_change_per_sec: f32,

    // Aggregation
    /// Width of the fixed aggregation windows in seconds (default: 2.0;
    /// 0 disables aggregation and returns the per-interval curve)
    pub aggregation_window_sec: f32,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            energy_threshold: 1000.0,
            min_beats: 3,
            mad_z_threshold: 3.0,
            outlier_policy: OutlierPolicy::GlobalMedian,
            smoothing_sigma: 1.2,
            max_bpm_change_per_sec: 4.5,
            aggregation_window_sec: 2.0,
        }
    }
}

impl CurveConfig {
    /// Validate the configuration
    ///
    /// Called at the pipeline entry point; an invalid configuration is the
    /// only condition that aborts a run before processing begins.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfig`] for non-positive smoothing sigma,
    /// z-score threshold or acceleration rate, negative energy threshold or
    /// aggregation window, non-finite values, or `min_beats < 2`.
    pub fn validate(&self) -> Result<(), CurveError> {
        if !self.smoothing_sigma.is_finite() || self.smoothing_sigma <= 0.0 {
            return Err(CurveError::InvalidConfig(format!(
                "smoothing sigma must be positive, got {}",
                self.smoothing_sigma
            )));
        }

        if !self.mad_z_threshold.is_finite() || self.mad_z_threshold <= 0.0 {
            return Err(CurveError::InvalidConfig(format!(
                "MAD z-score threshold must be positive, got {}",
                self.mad_z_threshold
            )));
        }

        if !self.max_bpm_change_per_sec.is_finite() || self.max_bpm_change_per_sec <= 0.0 {
            return Err(CurveError::InvalidConfig(format!(
                "max BPM change per second must be positive, got {}",
                self.max_bpm_change_per_sec
            )));
        }

        if !self.energy_threshold.is_finite() || self.energy_threshold < 0.0 {
            return Err(CurveError::InvalidConfig(format!(
                "energy threshold must be non-negative, got {}",
                self.energy_threshold
            )));
        }

        if !self.aggregation_window_sec.is_finite() || self.aggregation_window_sec < 0.0 {
            return Err(CurveError::InvalidConfig(format!(
                "aggregation window must be non-negative, got {}",
                self.aggregation_window_sec
            )));
        }

        if self.min_beats < 2 {
            return Err(CurveError::InvalidConfig(format!(
                "min beats must be at least 2, got {}",
                self.min_beats
            )));
        }

        if let OutlierPolicy::WindowedMedian { window } = self.outlier_policy {
            if window == 0 {
                return Err(CurveError::InvalidConfig(
                    "windowed median replacement window must be > 0".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CurveConfig::default().validate().is_ok());
    }

    #[test]
    fn test_non_positive_sigma_rejected() {
        let mut config = CurveConfig::default();
        config.smoothing_sigma = 0.0;
        assert!(config.validate().is_err());

        config.smoothing_sigma = -1.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_thresholds_rejected() {
        let mut config = CurveConfig::default();
        config.mad_z_threshold = -3.0;
        assert!(config.validate().is_err());

        let mut config = CurveConfig::default();
        config.energy_threshold = -1.0;
        assert!(config.validate().is_err());

        let mut config = CurveConfig::default();
        config.max_bpm_change_per_sec = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_rejected() {
        let mut config = CurveConfig::default();
        config.smoothing_sigma = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_min_beats_floor() {
        let mut config = CurveConfig::default();
        config.min_beats = 1;
        assert!(config.validate().is_err());

        config.min_beats = 2;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_window_disables_aggregation() {
        let mut config = CurveConfig::default();
        config.aggregation_window_sec = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_windowed_median_rejected() {
        let mut config = CurveConfig::default();
        config.outlier_policy = OutlierPolicy::WindowedMedian { window: 0 };
        assert!(config.validate().is_err());
    }
}
