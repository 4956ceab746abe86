//! Output location policy.
//!
//! Single-tile resizes are run-scoped: `<source dir>/[folder/]<run timestamp>`.
//! Grid splits are image-scoped: `<source dir>/[folder/]<source base name>`,
//! so regenerating tiles for the same image overwrites the same files.
//! An absolute folder name replaces the source directory.

use std::path::{Path, PathBuf};
use tracing::debug;
use crate::core::EffectiveSettings;
use crate::utils::{base_name, SplitterError, SplitterResult};

/// Format of the run timestamp folder, e.g. `20260117_142503`.
pub const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Timestamp shared by every task of one run.
pub fn run_timestamp() -> String {
    chrono::Local::now().format(RUN_TIMESTAMP_FORMAT).to_string()
}

/// Computes the output directory without touching the disk.
pub fn output_folder(source_path: &Path, settings: &EffectiveSettings, run_timestamp: &str) -> PathBuf {
    let mut folder = source_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    if let Some(name) = settings.folder_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        folder.push(name);
    }

    if settings.is_single_tile() {
        folder.push(run_timestamp);
    } else {
        folder.push(base_name(source_path));
    }
    folder
}

/// Computes the output directory and makes sure it exists.
pub fn derive_folder(
    source_path: &Path,
    settings: &EffectiveSettings,
    run_timestamp: &str,
) -> SplitterResult<PathBuf> {
    let folder = output_folder(source_path, settings, run_timestamp);
    std::fs::create_dir_all(&folder)
        .map_err(|e| SplitterError::directory_create(&folder, e))?;
    debug!("Output folder ready: {}", folder.display());
    Ok(folder)
}

/// `<base name>_part_<ordinal>.<ext>`, ordinal 1-based.
pub fn tile_file_name(source_path: &Path, ordinal: u32, extension: &str) -> String {
    format!("{}_part_{ordinal}.{extension}", base_name(source_path))
}
