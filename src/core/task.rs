//! Image task definition and display helpers.

use std::path::{Path, PathBuf};
use serde::Serialize;
use crate::core::ImageOverride;
use crate::utils::{extract_filename, validate_intake_path, ValidationError};

/// A single source image queued for splitting.
///
/// The source path is absolute and never changes after creation. The
/// override is created lazily when custom settings are requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTask {
    source_path: PathBuf,
    image_override: Option<ImageOverride>,
}

impl ImageTask {
    /// Creates a task after checking the extension and making the path absolute.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ValidationError> {
        Ok(Self {
            source_path: validate_intake_path(path.as_ref())?,
            image_override: None,
        })
    }

    pub fn with_override(mut self, image_override: ImageOverride) -> Self {
        self.image_override = Some(image_override);
        self
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// The override, if it carries at least one set field.
    pub fn image_override(&self) -> Option<&ImageOverride> {
        self.image_override.as_ref().filter(|o| !o.is_empty())
    }

    /// Returns the override for editing, creating an empty one on first use.
    pub fn override_mut(&mut self) -> &mut ImageOverride {
        self.image_override.get_or_insert_with(ImageOverride::default)
    }

    /// Drops every custom setting so the task follows the global defaults again.
    pub fn reset_override(&mut self) {
        if let Some(o) = self.image_override.as_mut() {
            o.clear();
        }
    }

    pub fn has_custom_settings(&self) -> bool {
        self.image_override().is_some()
    }

    /// File name, marked with a gear when the task carries custom settings.
    pub fn display_name(&self) -> String {
        let name = extract_filename(&self.source_path);
        if self.has_custom_settings() {
            format!("⚙ {name}")
        } else {
            name
        }
    }

    /// One-line description of the custom settings.
    pub fn settings_summary(&self) -> String {
        let Some(o) = self.image_override() else {
            return "Using global defaults".to_string();
        };

        let mut parts = Vec::new();
        if let Some(size) = o.custom_edge_size.or(o.base_edge_size) {
            parts.push(format!("Size: {size}"));
        }
        if o.grid_across.is_some() || o.grid_high.is_some() {
            let across = o.grid_across.unwrap_or(1);
            let high = o.grid_high.unwrap_or(1);
            parts.push(format!("Grid: {across}×{high}"));
        }
        if let Some(keep) = o.maintain_source_format {
            parts.push(if keep { "Keep format" } else { "Convert to JPEG" }.to_string());
        }
        match o.output_folder_name.as_deref().map(str::trim) {
            Some("") => parts.push("No folder".to_string()),
            Some(folder) => parts.push(format!("Folder: {folder}")),
            None => {}
        }

        parts.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_override_reads_as_global_defaults() {
        let mut task = ImageTask::new("/photos/cat.jpg").unwrap();
        task.override_mut();
        assert!(!task.has_custom_settings());
        assert_eq!(task.display_name(), "cat.jpg");
        assert_eq!(task.settings_summary(), "Using global defaults");
        assert!(task.image_override().is_none());
    }

    #[test]
    fn summary_lists_each_custom_field() {
        let task = ImageTask::new("/photos/cat.jpg").unwrap().with_override(ImageOverride {
            base_edge_size: Some(768),
            custom_edge_size: Some(1000),
            grid_across: Some(2),
            maintain_source_format: Some(true),
            output_folder_name: Some("tiles".into()),
            ..ImageOverride::default()
        });
        assert_eq!(task.display_name(), "⚙ cat.jpg");
        assert_eq!(
            task.settings_summary(),
            "Size: 1000 | Grid: 2×1 | Keep format | Folder: tiles"
        );
    }

    #[test]
    fn reset_returns_to_defaults() {
        let mut task = ImageTask::new("/photos/cat.png").unwrap();
        task.override_mut().grid_high = Some(3);
        assert!(task.has_custom_settings());
        task.reset_override();
        assert!(!task.has_custom_settings());
    }

    #[test]
    fn unsupported_extension_is_refused() {
        assert!(ImageTask::new("/photos/cat.gif").is_err());
    }
}
