//! Tempo curve pipeline stages
//!
//! Each stage consumes the complete output of its predecessor and allocates a
//! new sequence; nothing is mutated in place after a stage returns:
//! - Instantaneous tempo derivation (beat timestamps -> raw BPM samples)
//! - Robust outlier suppression (MAD)
//! - Gaussian smoothing
//! - Acceleration limiting
//! - Window aggregation (optional)

pub mod aggregate;
pub mod derive;
pub mod limiter;
pub mod outlier;
pub mod smooth;
