//! Batch orchestration: resolve settings, derive folders, split, resize, save.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::core::{BatchEvent, GlobalSettings, ImageTask, RunOutcome, RunReport, RunState};
use crate::processing::output_path::run_timestamp;
use crate::processing::raster::split_single;
use crate::processing::resolver::resolve;
use crate::utils::{extract_filename, validate_batch, SplitterError, SplitterResult, ValidationError};

use super::sink::{CancelToken, ChannelSink, ProgressSink};

/// Starts batch runs and remembers whether one is still going.
///
/// Only one run per engine may be active at a time.
#[derive(Debug, Clone, Default)]
pub struct BatchEngine {
    active: Arc<AtomicBool>,
}

/// Clears the engine's active flag when the worker finishes or unwinds.
pub(crate) struct ActiveGuard(Arc<AtomicBool>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl BatchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Marks the engine busy until the guard drops.
    #[cfg(test)]
    pub(crate) fn hold_active(&self) -> ActiveGuard {
        self.active.store(true, Ordering::Release);
        ActiveGuard(self.active.clone())
    }

    /// Validates the batch and runs it on a blocking worker thread.
    ///
    /// `tasks` and `global` are owned snapshots; the worker never sees later
    /// edits. Must be called from within a Tokio runtime.
    pub fn submit_batch(&self, tasks: Vec<ImageTask>, global: GlobalSettings) -> SplitterResult<RunHandle> {
        validate_batch(&tasks, &global)?;

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| SplitterError::processing(format!("No async runtime for the batch worker: {e}")))?;

        if self
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ValidationError::RunInProgress.into());
        }
        let guard = ActiveGuard(self.active.clone());

        let timestamp = run_timestamp();
        info!("Submitting batch of {} image(s), run {}", tasks.len(), timestamp);

        let cancel = CancelToken::new();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(RunState::Idle);
        advance(&state_tx, RunState::Running);

        let worker_cancel = cancel.clone();
        let join = runtime.spawn_blocking(move || {
            let mut sink = ChannelSink(event_tx);
            let report = execute_batch(&tasks, &global, &timestamp, &worker_cancel, &mut sink);

            // The list is free and the state final before anyone hears the run ended.
            drop(guard);
            advance(&state_tx, report.outcome.into());
            finish(&report, &mut sink);
            report
        });

        Ok(RunHandle {
            cancel,
            events: event_rx,
            state: state_rx,
            join,
        })
    }
}

fn advance(state: &watch::Sender<RunState>, next: RunState) {
    state.send_modify(|current| match current.transition(next) {
        Some(state) => *current = state,
        None => warn!("Ignoring run state change {:?} -> {:?}", current, next),
    });
}

/// Handle to a submitted run.
pub struct RunHandle {
    cancel: CancelToken,
    events: mpsc::UnboundedReceiver<BatchEvent>,
    state: watch::Receiver<RunState>,
    join: JoinHandle<RunReport>,
}

impl RunHandle {
    /// Requests cancellation. Takes effect before the next task starts.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn state(&self) -> RunState {
        *self.state.borrow()
    }

    /// Next event from the worker; `None` once the run is over and drained.
    pub async fn next_event(&mut self) -> Option<BatchEvent> {
        self.events.recv().await
    }

    /// Waits for the worker and returns its report. Undrained events are dropped.
    pub async fn wait(self) -> SplitterResult<RunReport> {
        self.join
            .await
            .map_err(|e| SplitterError::processing(format!("Batch worker failed: {e}")))
    }
}

/// Runs a batch synchronously on the calling thread.
///
/// Same semantics as [`BatchEngine::submit_batch`] without the worker thread:
/// validation errors come back before any I/O, everything after that is
/// reported through the returned [`RunReport`] and the sink.
pub fn run_batch(
    tasks: &[ImageTask],
    global: &GlobalSettings,
    run_timestamp: &str,
    cancel: &CancelToken,
    sink: &mut dyn ProgressSink,
) -> SplitterResult<RunReport> {
    validate_batch(tasks, global)?;
    let report = execute_batch(tasks, global, run_timestamp, cancel, sink);
    finish(&report, sink);
    Ok(report)
}

fn finish(report: &RunReport, sink: &mut dyn ProgressSink) {
    sink.emit(BatchEvent::RunFinished {
        outcome: report.outcome,
        error: report.error.clone(),
    });
}

/// Processes tasks in order. The first failing task aborts the whole run;
/// cancellation is honoured between tasks and leaves written files in place.
fn execute_batch(
    tasks: &[ImageTask],
    global: &GlobalSettings,
    run_timestamp: &str,
    cancel: &CancelToken,
    sink: &mut dyn ProgressSink,
) -> RunReport {
    let total_tasks = tasks.len();
    let mut report = RunReport::new(total_tasks);

    for (position, task) in tasks.iter().enumerate() {
        if cancel.is_cancelled() {
            info!("Run cancelled after {}/{} image(s)", report.completed_tasks, total_tasks);
            report.outcome = RunOutcome::Cancelled;
            break;
        }

        let task_index = position + 1;
        let source = task.source_path();
        sink.emit(BatchEvent::TaskStarted {
            task_index,
            total_tasks,
            file_name: extract_filename(source),
        });

        let settings = resolve(global, task.image_override());
        debug!(
            "Task {}/{} {}: edge {}, grid {}×{}, keep format {}, folder {:?}",
            task_index,
            total_tasks,
            source.display(),
            settings.edge_size,
            settings.across,
            settings.high,
            settings.maintain_source_format,
            settings.folder_name
        );

        let result = split_single(source, &settings, run_timestamp, |tile_ordinal, total_tiles| {
            sink.emit(BatchEvent::TileProgress {
                task_index,
                tile_ordinal,
                total_tiles,
            })
        });

        match result {
            Ok(output) => {
                debug!(
                    "{} done: {} written, {} unchanged in {}",
                    extract_filename(source),
                    output.written.len(),
                    output.unchanged.len(),
                    output.folder.display()
                );
                report.written_files.extend(output.written);
                report.unchanged_files.extend(output.unchanged);
                report.completed_tasks = task_index;
                sink.emit(BatchEvent::TaskProgress {
                    completed_tasks: task_index,
                    total_tasks,
                });
            }
            Err(e) => {
                warn!("Aborting run at {}/{}: {}", task_index, total_tasks, e);
                report.outcome = RunOutcome::Failed;
                report.error = Some(e);
                break;
            }
        }
    }

    if report.outcome == RunOutcome::Completed {
        info!("Batch completed: {} image(s), {} tile(s) written", total_tasks, report.written_files.len());
    }
    report
}
