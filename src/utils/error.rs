//! Error types for the image splitter.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.
//! Every variant is `Serialize` so it can ride along inside a [`crate::core::BatchEvent`].

use std::path::PathBuf;
use thiserror::Error;
use serde::Serialize;

/// Validation errors raised before any image I/O happens.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum ValidationError {
    /// A batch was submitted without any tasks
    #[error("No images selected. Please select some images to process.")]
    EmptyBatch,
    /// The task list was touched while a run is active
    #[error("A batch run is in progress; the image list cannot change until it finishes")]
    RunInProgress,
    /// Intake refused a file because of its extension
    #[error("Unsupported image file: {0}")]
    UnsupportedExtension(PathBuf),
    /// A path given on the command line could not be read or resolved
    #[error("Cannot access '{}': {reason}", path.display())]
    Path { path: PathBuf, reason: String },
    /// Invalid settings error
    #[error("Settings error: {0}")]
    Settings(String),
}

/// Main error type for the splitter.
///
/// Anything that aborts a run ends up here and is surfaced through
/// [`crate::core::RunReport::error`].
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum SplitterError {
    /// Task or input validation failed; the run never started
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Source image missing, unreadable or in an unsupported codec
    #[error("Cannot read source '{}': {reason}", path.display())]
    SourceRead { path: PathBuf, reason: String },

    /// Output directory or tile could not be written
    #[error("{}", describe_write_failure(path, *tile, reason))]
    DestinationWrite {
        path: PathBuf,
        tile: Option<u32>,
        reason: String,
    },

    /// Image processing failed
    #[error("Processing error: {0}")]
    Processing(String),
}

fn describe_write_failure(path: &std::path::Path, tile: Option<u32>, reason: &str) -> String {
    match tile {
        Some(ordinal) => format!("Cannot write tile {ordinal} to '{}': {reason}", path.display()),
        None => format!("Cannot create output directory '{}': {reason}", path.display()),
    }
}

/// Convenience result type for splitter operations.
pub type SplitterResult<T> = Result<T, SplitterError>;

// Helper methods for error creation
impl SplitterError {
    pub fn processing<T: Into<String>>(msg: T) -> Self {
        Self::Processing(msg.into())
    }

    pub fn source_read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::SourceRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn directory_create(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::DestinationWrite {
            path: path.into(),
            tile: None,
            reason: reason.to_string(),
        }
    }

    pub fn tile_write(path: impl Into<PathBuf>, ordinal: u32, reason: impl ToString) -> Self {
        Self::DestinationWrite {
            path: path.into(),
            tile: Some(ordinal),
            reason: reason.to_string(),
        }
    }

    /// True for errors reported before the run started.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Helper methods for validation error creation
impl ValidationError {
    pub fn path(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Path {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_write_message_names_ordinal_and_path() {
        let err = SplitterError::tile_write("/out/cat_part_3.jpg", 3, "disk full");
        assert_eq!(
            err.to_string(),
            "Cannot write tile 3 to '/out/cat_part_3.jpg': disk full"
        );
    }

    #[test]
    fn directory_failure_has_no_ordinal() {
        let err = SplitterError::directory_create("/ro/cat", "permission denied");
        assert!(err.to_string().starts_with("Cannot create output directory '/ro/cat'"));
    }

    #[test]
    fn path_error_is_a_validation_error() {
        let err: SplitterError = ValidationError::path("/nope.json", "No such file").into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: Cannot access '/nope.json': No such file");
    }
}
