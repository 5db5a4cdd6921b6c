//! Input preparation ahead of beat detection
//!
//! Chooses which audio stream (isolated percussion stem vs. original mix) is
//! handed to the external beat detector.

pub mod source_select;
