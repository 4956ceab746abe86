//! Command-line entry points.
//!
//! - [`split_images`]: Run one batch from parsed flags and print its progress
//! - [`load_overrides`]: Read per-image settings from a JSON file

mod split;

pub use split::*;
