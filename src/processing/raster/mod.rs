// src/processing/raster/mod.rs

//! Pixel work via the `image` crate.
//!
//! # Architecture
//!
//! - [`executor`]: Decodes a source, walks its grid and writes each tile.
//! - [`resize`]: Aspect-preserving Lanczos resize to a target edge length.
//! - [`encode`]: Per-codec in-memory encoders.

pub mod encode;
pub mod executor;
pub mod resize;

pub use executor::{load_source, split_single, SplitOutput};
pub use resize::{resize_to_edge, target_dimensions};
