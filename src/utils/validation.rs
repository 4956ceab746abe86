use std::path::{Path, PathBuf};
use crate::core::{GlobalSettings, ImageOverride, ImageTask};
use crate::utils::{SplitterResult, ValidationError, format_from_extension};

/// Largest accepted tile edge, in pixels.
pub const MAX_EDGE_SIZE: u32 = 16_384;

/// Validates a batch before submission. Nothing touches the disk if this fails.
pub fn validate_batch(tasks: &[ImageTask], global: &GlobalSettings) -> SplitterResult<()> {
    if tasks.is_empty() {
        return Err(ValidationError::EmptyBatch.into());
    }

    validate_settings(global)?;

    for task in tasks {
        format_from_extension(task.source_path())?;
        if let Some(image_override) = task.image_override() {
            validate_override(image_override)?;
        }
    }
    Ok(())
}

/// Checks a path at intake and returns its absolute form.
///
/// Only the extension is checked here; a missing file surfaces as a read error
/// when the run reaches it.
pub fn validate_intake_path(path: &Path) -> Result<PathBuf, ValidationError> {
    format_from_extension(path)?;
    std::path::absolute(path).map_err(|e| ValidationError::path(path, e))
}

/// Validates global settings
pub fn validate_settings(settings: &GlobalSettings) -> Result<(), ValidationError> {
    if settings.base_edge_size == 0 {
        return Err(ValidationError::settings("Base edge size must be a positive integer"));
    }
    check_edge_limit("Base edge size", Some(settings.base_edge_size))?;
    check_edge_limit("Custom edge size", settings.custom_edge_size)
}

fn validate_override(image_override: &ImageOverride) -> Result<(), ValidationError> {
    check_edge_limit("Base edge size", image_override.base_edge_size)?;
    check_edge_limit("Custom edge size", image_override.custom_edge_size)
}

fn check_edge_limit(label: &str, size: Option<u32>) -> Result<(), ValidationError> {
    match size {
        Some(size) if size > MAX_EDGE_SIZE => Err(ValidationError::settings(format!(
            "{label} {size} exceeds the maximum of {MAX_EDGE_SIZE} pixels"
        ))),
        _ => Ok(()),
    }
}
