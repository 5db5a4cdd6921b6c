//! Audio source selection
//!
//! A percussion-only stem usually gives the beat detector a cleaner signal
//! than the full mix, but source separation sometimes produces a silent or
//! near-silent stem (no drums in the track, or separation failure). This
//! module picks the stem when it carries enough energy and falls back to the
//! original mix otherwise. A fallback is never silent: the reason is recorded
//! in the returned report so callers can observe it.

use std::path::Path;

use crate::error::CurveError;
use crate::io::decoder::decode_to_mono;

/// Which audio stream was selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedSource {
    /// Isolated percussion stem
    Percussion,
    /// Original full mix
    OriginalMix,
}

/// Outcome of a buffer-level source selection
#[derive(Debug)]
pub struct SourceSelection<'a> {
    /// The samples to hand to the beat detector
    pub samples: &'a [f32],

    /// Which stream was chosen
    pub source: SelectedSource,

    /// Total absolute amplitude of the percussion candidate, if one was given
    pub percussion_energy: Option<f32>,

    /// Why the original mix was used instead of the stem, if it was
    pub fallback_reason: Option<String>,
}

/// Outcome of a path-level source selection, with the decoded audio
#[derive(Debug)]
pub struct SelectedAudio {
    /// Decoded mono samples of the chosen stream
    pub samples: Vec<f32>,

    /// Sample rate of the chosen stream in Hz
    pub sample_rate: u32,

    /// Which stream was chosen
    pub source: SelectedSource,

    /// Total absolute amplitude of the stem, when it decoded successfully
    pub percussion_energy: Option<f32>,

    /// Why the original mix was used instead of the stem, if it was
    pub fallback_reason: Option<String>,
}

/// Choose between a percussion candidate and the original mix
///
/// # Arguments
///
/// * `percussion` - Candidate stem samples; `None` if the stem could not be
///   loaded (that failure is recoverable and becomes a fallback reason)
/// * `original` - Full-mix samples, always available
/// * `energy_threshold` - Total-absolute-amplitude floor for the stem
///
/// # Returns
///
/// The selected slice plus a report of the decision.
pub fn select_source<'a>(
    percussion: Option<&'a [f32]>,
    original: &'a [f32],
    energy_threshold: f32,
) -> SourceSelection<'a> {
    match percussion {
        Some(stem) => {
            let energy = total_energy(stem);
            if energy > energy_threshold {
                SourceSelection {
                    samples: stem,
                    source: SelectedSource::Percussion,
                    percussion_energy: Some(energy),
                    fallback_reason: None,
                }
            } else {
                let reason = format!(
                    "percussion stem energy {:.1} below threshold {:.1}, using original mix",
                    energy, energy_threshold
                );
                log::warn!("{}", reason);
                SourceSelection {
                    samples: original,
                    source: SelectedSource::OriginalMix,
                    percussion_energy: Some(energy),
                    fallback_reason: Some(reason),
                }
            }
        }
        None => {
            let reason = "percussion stem unavailable, using original mix".to_string();
            log::warn!("{}", reason);
            SourceSelection {
                samples: original,
                source: SelectedSource::OriginalMix,
                percussion_energy: None,
                fallback_reason: Some(reason),
            }
        }
    }
}

/// Decode and choose between a percussion stem file and the original mix file
///
/// A stem that fails to decode is a recoverable condition: the original mix
/// is decoded instead and the failure is recorded in the report. Only a
/// decode failure of the original mix itself aborts.
///
/// # Arguments
///
/// * `percussion_path` - Path to the stem file, if separation produced one
/// * `original_path` - Path to the original mix
/// * `energy_threshold` - Total-absolute-amplitude floor for the stem
///
/// # Errors
///
/// Returns [`CurveError::Decoding`] only when the original mix cannot be
/// decoded.
pub fn select_source_from_paths(
    percussion_path: Option<&Path>,
    original_path: &Path,
    energy_threshold: f32,
) -> Result<SelectedAudio, CurveError> {
    let mut fallback_reason = None;
    let mut percussion_energy = None;

    if let Some(path) = percussion_path {
        match decode_to_mono(path) {
            Ok((samples, sample_rate)) => {
                let energy = total_energy(&samples);
                percussion_energy = Some(energy);
                if energy > energy_threshold {
                    log::debug!(
                        "Selected percussion stem {} (energy {:.1})",
                        path.display(),
                        energy
                    );
                    return Ok(SelectedAudio {
                        samples,
                        sample_rate,
                        source: SelectedSource::Percussion,
                        percussion_energy,
                        fallback_reason: None,
                    });
                }
                let reason = format!(
                    "percussion stem energy {:.1} below threshold {:.1}, using original mix",
                    energy, energy_threshold
                );
                log::warn!("{}", reason);
                fallback_reason = Some(reason);
            }
            Err(e) => {
                let reason = format!("failed to decode percussion stem: {}", e);
                log::warn!("{}", reason);
                fallback_reason = Some(reason);
            }
        }
    }

    let (samples, sample_rate) = decode_to_mono(original_path)?;
    Ok(SelectedAudio {
        samples,
        sample_rate,
        source: SelectedSource::OriginalMix,
        percussion_energy,
        fallback_reason,
    })
}

/// Total absolute amplitude of a signal
fn total_energy(samples: &[f32]) -> f32 {
    samples.iter().map(|&x| x.abs()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energetic_stem_selected() {
        let stem = vec![0.5f32; 4000]; // energy 2000
        let mix = vec![0.5f32; 8000];

        let selection = select_source(Some(&stem), &mix, 1000.0);
        assert_eq!(selection.source, SelectedSource::Percussion);
        assert_eq!(selection.samples.len(), stem.len());
        assert!(selection.fallback_reason.is_none());
        assert!((selection.percussion_energy.unwrap() - 2000.0).abs() < 1e-2);
    }

    #[test]
    fn test_quiet_stem_falls_back() {
        let stem = vec![0.001f32; 1000]; // energy 1.0
        let mix = vec![0.5f32; 8000];

        let selection = select_source(Some(&stem), &mix, 1000.0);
        assert_eq!(selection.source, SelectedSource::OriginalMix);
        assert_eq!(selection.samples.len(), mix.len());
        assert!(selection.fallback_reason.is_some());
    }

    #[test]
    fn test_missing_stem_falls_back() {
        let mix = vec![0.5f32; 8000];

        let selection = select_source(None, &mix, 1000.0);
        assert_eq!(selection.source, SelectedSource::OriginalMix);
        assert!(selection.percussion_energy.is_none());
        assert!(selection
            .fallback_reason
            .as_deref()
            .unwrap()
            .contains("unavailable"));
    }

    #[test]
    fn test_energy_uses_absolute_amplitude() {
        // Alternating polarity must not cancel
        let stem: Vec<f32> = (0..4000)
            .map(|i| if i % 2 == 0 { 0.5 } else { -0.5 })
            .collect();
        let mix = vec![0.1f32; 100];

        let selection = select_source(Some(&stem), &mix, 1000.0);
        assert_eq!(selection.source, SelectedSource::Percussion);
    }

    #[test]
    fn test_missing_original_path_is_fatal() {
        let result = select_source_from_paths(
            None,
            Path::new("/nonexistent/original.wav"),
            1000.0,
        );
        assert!(matches!(result, Err(CurveError::Decoding(_))));
    }

    #[test]
    fn test_missing_stem_path_is_recoverable() {
        // Stem decode failure must not abort before the original is tried;
        // with a nonexistent original too, the error is about the original
        let result = select_source_from_paths(
            Some(Path::new("/nonexistent/drums.wav")),
            Path::new("/nonexistent/original.wav"),
            1000.0,
        );
        assert!(result.is_err());
    }
}
