// Module declarations in dependency order
pub mod commands;
pub mod core;
pub mod processing;
pub mod utils;

// Public exports for external consumers
pub use core::{
    BatchEvent, EffectiveSettings, GlobalSettings, ImageOverride, ImageTask, RunOutcome, RunReport, RunState,
    TaskList,
};
pub use processing::{run_batch, BatchEngine, CancelToken, ProgressSink, RunHandle};
pub use utils::{SplitterError, SplitterResult, ValidationError};

// The binary in main.rs is a thin command-line front end over this library.
