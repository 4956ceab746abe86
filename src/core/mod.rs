//! Core application types.
//!
//! This module contains the fundamental types used throughout the crate:
//! - [`GlobalSettings`] / [`ImageOverride`]: the two settings tiers
//! - [`EffectiveSettings`]: what a task is actually processed with
//! - [`ImageTask`] / [`TaskList`]: queued source images
//! - [`BatchEvent`] / [`RunReport`]: progress reporting for batch runs
//! - [`RunState`]: the run lifecycle

mod state;
mod types;
mod task;
mod task_list;
mod progress;

pub use state::RunState;
pub use types::{EffectiveSettings, GlobalSettings, ImageOverride, DEFAULT_EDGE_SIZE};
pub use task::ImageTask;
pub use task_list::{IntakeSummary, TaskList};
pub use progress::{BatchEvent, RunOutcome, RunReport};
