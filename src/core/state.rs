//! Batch run state machine.

use serde::Serialize;
use crate::core::RunOutcome;

/// Lifecycle of one batch run.
///
/// `Idle → Running → {Completed | Cancelled | Failed}`. Terminal states are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Cancelled,
    Failed,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Failed)
    }

    /// Returns the next state, or `None` if the transition is not allowed.
    pub fn transition(self, next: RunState) -> Option<RunState> {
        match (self, next) {
            (Self::Idle, Self::Running) => Some(next),
            (Self::Running, s) if s.is_terminal() => Some(next),
            _ => None,
        }
    }
}

impl From<RunOutcome> for RunState {
    fn from(outcome: RunOutcome) -> Self {
        match outcome {
            RunOutcome::Completed => Self::Completed,
            RunOutcome::Cancelled => Self::Cancelled,
            RunOutcome::Failed => Self::Failed,
        }
    }
}
