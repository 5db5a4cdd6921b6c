//! Curve result types

use serde::{Deserialize, Serialize};

use super::metadata::CurveMetadata;

/// One point of the tempo curve
///
/// `time_sec` is anchored to the earlier beat of the inter-beat interval the
/// sample summarizes (not the midpoint).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BpmSample {
    /// Time in seconds
    pub time_sec: f32,

    /// Tempo in beats per minute
    pub bpm: f32,
}

/// Complete result of a tempo curve extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveResult {
    /// Tempo curve, strictly increasing in time
    ///
    /// Per-interval resolution, or one sample per non-empty window when
    /// aggregation is enabled. Empty when the input had too few beats
    /// (see [`CurveMetadata::insufficient_beats`]).
    pub curve: Vec<BpmSample>,

    /// Run metadata and diagnostics
    pub metadata: CurveMetadata,
}

impl CurveResult {
    /// Produce the serialization-boundary map
    ///
    /// All values are rounded to 2 decimal places here and only here; the
    /// pipeline itself works on unrounded values throughout.
    ///
    /// # Example
    ///
    /// ```
    /// use tempo_contour::{extract_tempo_curve, CurveConfig};
    ///
    /// let beats = vec![0.0, 0.5, 1.0, 1.5, 2.0];
    /// let result = extract_tempo_curve(&beats, &CurveConfig::default())?;
    /// let map = result.to_bpm_map();
    /// assert_eq!(map.bpm_map[0].bpm, 120.0);
    /// # Ok::<(), tempo_contour::CurveError>(())
    /// ```
    pub fn to_bpm_map(&self) -> BpmMap {
        BpmMap {
            bpm_map: self
                .curve
                .iter()
                .map(|s| BpmSample {
                    time_sec: round2(s.time_sec),
                    bpm: round2(s.bpm),
                })
                .collect(),
        }
    }
}

/// JSON-facing tempo map: `{"bpm_map": [{"time_sec": ..., "bpm": ...}, ...]}`
///
/// Values are already rounded to 2 decimals; see [`CurveResult::to_bpm_map`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BpmMap {
    /// Rounded curve entries
    pub bpm_map: Vec<BpmSample>,
}

/// Round to 2 decimal places
fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}
