use std::path::PathBuf;
use serde::Serialize;
use crate::utils::SplitterError;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RunOutcome {
    Completed,
    Cancelled,
    Failed,
}

/// Events sent from the worker to whoever drives the run.
///
/// Task indices are 1-based and follow submission order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum BatchEvent {
    #[serde(rename_all = "camelCase")]
    TaskStarted {
        task_index: usize,
        total_tasks: usize,
        file_name: String,
    },
    /// Emitted after each tile has been written (or found unchanged)
    #[serde(rename_all = "camelCase")]
    TileProgress {
        task_index: usize,
        tile_ordinal: u32,
        total_tiles: u32,
    },
    /// Emitted after a whole task has finished
    #[serde(rename_all = "camelCase")]
    TaskProgress {
        completed_tasks: usize,
        total_tasks: usize,
    },
    #[serde(rename_all = "camelCase")]
    RunFinished {
        outcome: RunOutcome,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<SplitterError>,
    },
}

impl BatchEvent {
    /// Human-readable status line, as shown by the command-line mode.
    pub fn status(&self) -> String {
        match self {
            Self::TaskStarted { task_index, total_tasks, file_name } => {
                format!("Processing {task_index}/{total_tasks}: {file_name}")
            }
            Self::TileProgress { tile_ordinal, total_tiles, .. } => {
                format!("Tile {tile_ordinal}/{total_tiles}")
            }
            Self::TaskProgress { completed_tasks, total_tasks } => {
                let percentage = if *total_tasks > 0 {
                    (completed_tasks * 100) / total_tasks
                } else {
                    0
                };
                format!("{completed_tasks}/{total_tasks} images ({percentage}%)")
            }
            Self::RunFinished { outcome: RunOutcome::Completed, .. } => {
                "✓ Processing completed!".to_string()
            }
            Self::RunFinished { outcome: RunOutcome::Cancelled, .. } => {
                "Processing cancelled".to_string()
            }
            Self::RunFinished { error, .. } => match error {
                Some(e) => format!("✗ Error: {e}"),
                None => "✗ Error".to_string(),
            },
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub outcome: RunOutcome,
    /// Number of tasks fully processed
    pub completed_tasks: usize,
    pub total_tasks: usize,
    /// Tiles written during this run
    pub written_files: Vec<PathBuf>,
    /// Tiles whose destination already held identical bytes
    pub unchanged_files: Vec<PathBuf>,
    pub error: Option<SplitterError>,
}

impl RunReport {
    pub(crate) fn new(total_tasks: usize) -> Self {
        Self {
            outcome: RunOutcome::Completed,
            completed_tasks: 0,
            total_tasks,
            written_files: Vec::new(),
            unchanged_files: Vec::new(),
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == RunOutcome::Completed
    }
}
