//! Ordered, deduplicated list of queued images.

use std::path::{Path, PathBuf};
use serde::Serialize;
use tracing::debug;
use crate::core::{GlobalSettings, ImageOverride, ImageTask};
use crate::processing::{BatchEngine, RunHandle};
use crate::utils::{SplitterResult, ValidationError};

/// Result of adding several paths at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeSummary {
    pub added: usize,
    pub duplicates: usize,
    /// Paths refused because of their extension
    pub rejected: Vec<PathBuf>,
}

/// The image list a collaborator builds up before starting a run.
///
/// Every mutation is refused with [`ValidationError::RunInProgress`] while a
/// run submitted through [`TaskList::submit`] is still going.
#[derive(Default)]
pub struct TaskList {
    tasks: Vec<ImageTask>,
    engine: BatchEngine,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[ImageTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn engine(&self) -> &BatchEngine {
        &self.engine
    }

    /// Adds a path. Returns `false` if the same absolute path is already queued.
    pub fn add(&mut self, path: impl AsRef<Path>) -> Result<bool, ValidationError> {
        self.ensure_idle()?;
        let task = ImageTask::new(path)?;
        if self.position(task.source_path()).is_some() {
            debug!("Skipping duplicate: {}", task.source_path().display());
            return Ok(false);
        }
        debug!("Queued {}", task.source_path().display());
        self.tasks.push(task);
        Ok(true)
    }

    /// Adds many paths, collecting unsupported ones instead of failing.
    pub fn add_paths<I, P>(&mut self, paths: I) -> Result<IntakeSummary, ValidationError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.ensure_idle()?;
        let mut summary = IntakeSummary::default();
        for path in paths {
            match self.add(path.as_ref()) {
                Ok(true) => summary.added += 1,
                Ok(false) => summary.duplicates += 1,
                Err(ValidationError::RunInProgress) => return Err(ValidationError::RunInProgress),
                Err(_) => summary.rejected.push(path.as_ref().to_path_buf()),
            }
        }
        Ok(summary)
    }

    /// Removes a task. Returns `false` if the path was not queued.
    pub fn remove(&mut self, path: impl AsRef<Path>) -> Result<bool, ValidationError> {
        self.ensure_idle()?;
        match self.find(path.as_ref()) {
            Some(index) => {
                self.tasks.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn clear(&mut self) -> Result<(), ValidationError> {
        self.ensure_idle()?;
        self.tasks.clear();
        Ok(())
    }

    /// Custom settings for a queued image, created on first request.
    pub fn override_mut(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<Option<&mut ImageOverride>, ValidationError> {
        self.ensure_idle()?;
        Ok(match self.find(path.as_ref()) {
            Some(index) => Some(self.tasks[index].override_mut()),
            None => None,
        })
    }

    /// Puts a queued image back on the global defaults.
    pub fn reset(&mut self, path: impl AsRef<Path>) -> Result<bool, ValidationError> {
        self.ensure_idle()?;
        match self.find(path.as_ref()) {
            Some(index) => {
                self.tasks[index].reset_override();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Starts a run over a snapshot of the current list.
    pub fn submit(&self, global: &GlobalSettings) -> SplitterResult<RunHandle> {
        self.engine.submit_batch(self.tasks.clone(), global.clone())
    }

    fn ensure_idle(&self) -> Result<(), ValidationError> {
        if self.engine.is_running() {
            return Err(ValidationError::RunInProgress);
        }
        Ok(())
    }

    fn find(&self, path: &Path) -> Option<usize> {
        let absolute = std::path::absolute(path).ok()?;
        self.position(&absolute)
    }

    fn position(&self, absolute: &Path) -> Option<usize> {
        self.tasks.iter().position(|t| t.source_path() == absolute)
    }
}
