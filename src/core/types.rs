//! Core settings types: process-wide defaults, per-image overrides and the
//! resolved values a task is actually processed with.

use serde::{Deserialize, Serialize};

/// Default target length of the longer tile edge, in pixels.
pub const DEFAULT_EDGE_SIZE: u32 = 512;

/// Process-wide defaults, snapshotted at submission time.
///
/// The engine never reads live settings during a run; callers hand over a
/// value and later edits do not affect the run that already started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobalSettings {
    /// Target length of the longer edge after resize
    pub base_edge_size: u32,
    /// Free-form size that wins over `base_edge_size` when set
    pub custom_edge_size: Option<u32>,
    /// Number of tiles across; non-positive values are clamped to 1
    pub grid_across: i32,
    /// Number of tiles high; non-positive values are clamped to 1
    pub grid_high: i32,
    /// Keep the source codec instead of re-encoding to JPEG
    pub maintain_source_format: bool,
    /// Optional folder inserted between the source directory and the output folder
    pub output_folder_name: Option<String>,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            base_edge_size: DEFAULT_EDGE_SIZE,
            custom_edge_size: None,
            grid_across: 1,
            grid_high: 1,
            maintain_source_format: false,
            output_folder_name: None,
        }
    }
}

/// Per-image settings. `None` means "inherit from [`GlobalSettings`]".
///
/// `Some("")` for the folder name is an explicit "no folder" and is kept
/// distinct from `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageOverride {
    pub base_edge_size: Option<u32>,
    pub custom_edge_size: Option<u32>,
    pub grid_across: Option<i32>,
    pub grid_high: Option<i32>,
    pub maintain_source_format: Option<bool>,
    pub output_folder_name: Option<String>,
}

impl ImageOverride {
    /// An override with every field unset behaves exactly like no override.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Resets every field back to "inherit".
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Settings a single task is processed with, after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveSettings {
    pub edge_size: u32,
    pub across: u32,
    pub high: u32,
    pub maintain_source_format: bool,
    /// `None` when no folder segment should be inserted
    pub folder_name: Option<String>,
}

impl EffectiveSettings {
    /// A 1×1 grid is a plain resize-and-rename.
    pub fn is_single_tile(&self) -> bool {
        self.across == 1 && self.high == 1
    }
}
