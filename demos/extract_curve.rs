//! Example: extract a tempo curve from a synthetic variable-tempo beat grid
//!
//! Run with `RUST_LOG=debug` to see the per-stage trace.

use tempo_contour::{extract_tempo_curve, CurveConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    // A track that holds 110 BPM, ramps to 140 BPM, then holds again:
    // stand-in for the beat timestamps an external beat tracker would emit
    let mut beat_times = Vec::new();
    let mut t = 0.0f32;
    for i in 0..160 {
        beat_times.push(t);
        let bpm = match i {
            0..=49 => 110.0,
            50..=109 => 110.0 + (i - 49) as f32 * 0.5,
            _ => 140.0,
        };
        t += 60.0 / bpm;
    }

    let config = CurveConfig::default();
    let result = extract_tempo_curve(&beat_times, &config)?;

    println!("Tempo curve ({} samples):", result.curve.len());
    println!("{}", serde_json::to_string_pretty(&result.to_bpm_map())?);
    println!(
        "Suppressed outliers: {}, processing time: {:.2} ms",
        result.metadata.suppressed_outliers, result.metadata.processing_time_ms
    );

    Ok(())
}
