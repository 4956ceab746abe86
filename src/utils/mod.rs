pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;

pub use error::{SplitterError, SplitterResult, ValidationError};
pub use validation::{validate_batch, validate_intake_path, validate_settings, MAX_EDGE_SIZE};
pub use formats::{ImageFormat, format_from_extension};
pub use fs::{base_name, extract_filename, write_if_changed, WriteOutcome};
