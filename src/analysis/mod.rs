//! Result and diagnostics types
//!
//! The curve result, its serialization boundary, and run metadata:
//! - Result types (samples, curve, rounded JSON map)
//! - Metadata and diagnostics

pub mod metadata;
pub mod result;
