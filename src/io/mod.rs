//! Audio I/O
//!
//! Audio decoding to mono sample buffers using Symphonia.

pub mod decoder;
