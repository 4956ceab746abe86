//! Command-line batch command.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use clap::Args;
use tracing::{debug, info, warn};
use crate::processing::RunHandle;
use crate::core::{BatchEvent, GlobalSettings, ImageOverride, ImageTask, RunReport, TaskList, DEFAULT_EDGE_SIZE};
use crate::utils::{SplitterResult, ValidationError, MAX_EDGE_SIZE};

/// Flags mirroring [`GlobalSettings`], plus the files to process.
#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    /// Images to process (.jpg, .jpeg, .png, .bmp, .webp)
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Base size for resizing (longer tile edge, in pixels)
    #[arg(long, default_value_t = DEFAULT_EDGE_SIZE, value_parser = clap::value_parser!(u32).range(1..=MAX_EDGE_SIZE as i64))]
    pub size: u32,

    /// Custom size for resizing; wins over --size
    #[arg(long, alias = "custom_size", value_parser = clap::value_parser!(u32).range(1..=MAX_EDGE_SIZE as i64))]
    pub custom_size: Option<u32>,

    /// Number of images across
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub across: i32,

    /// Number of images high
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub high: i32,

    /// Output folder, joined onto each source image's directory
    #[arg(long)]
    pub folder: Option<String>,

    /// Keep the source image format instead of converting to JPEG
    #[arg(long, alias = "maintain_format")]
    pub maintain_format: bool,

    /// JSON file mapping image paths to per-image settings
    #[arg(long, value_name = "FILE")]
    pub overrides: Option<PathBuf>,
}

impl SplitArgs {
    pub fn global_settings(&self) -> GlobalSettings {
        GlobalSettings {
            base_edge_size: self.size,
            custom_edge_size: self.custom_size,
            grid_across: self.across,
            grid_high: self.high,
            maintain_source_format: self.maintain_format,
            output_folder_name: self.folder.clone(),
        }
    }
}

/// How progress is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Progress lines for people
    Human,
    /// One JSON object per engine event
    Json,
}

/// Reads per-image overrides keyed by source path.
///
/// Relative keys resolve against the working directory.
pub async fn load_overrides(path: &Path) -> SplitterResult<HashMap<PathBuf, ImageOverride>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ValidationError::path(path, e))?;

    let parsed: HashMap<PathBuf, ImageOverride> = serde_json::from_str(&raw).map_err(|e| {
        ValidationError::settings(format!("Invalid overrides file {}: {e}", path.display()))
    })?;

    debug!("Loaded {} override(s) from {}", parsed.len(), path.display());
    Ok(parsed)
}

/// Builds the task list from the arguments, rejecting unsupported files.
pub async fn build_task_list(args: &SplitArgs) -> SplitterResult<TaskList> {
    let mut list = TaskList::new();
    let summary = list.add_paths(&args.files)?;

    if let Some(rejected) = summary.rejected.first() {
        return Err(ValidationError::UnsupportedExtension(rejected.clone()).into());
    }
    if summary.duplicates > 0 {
        info!("Ignored {} duplicate path(s)", summary.duplicates);
    }

    if let Some(path) = &args.overrides {
        for (image, image_override) in load_overrides(path).await? {
            match list.override_mut(&image)? {
                Some(slot) => *slot = image_override,
                None => warn!("Override for {} does not match any queued image", image.display()),
            }
        }
    }

    Ok(list)
}

/// Runs one batch to completion, printing progress as it goes.
///
/// Ctrl-C requests cancellation; the image being processed still finishes.
pub async fn split_images(args: &SplitArgs, mode: OutputMode) -> SplitterResult<RunReport> {
    let list = build_task_list(args).await?;
    let tasks = list.tasks().to_vec();
    let handle = list.submit(&args.global_settings())?;

    if mode == OutputMode::Human {
        println!("Processing {} image(s)...", tasks.len());
    }

    drain_run(handle, &tasks, mode, tokio::signal::ctrl_c()).await
}

/// Prints events until the run ends. Cancels the run once `shutdown` resolves.
pub async fn drain_run<F>(mut handle: RunHandle, tasks: &[ImageTask], mode: OutputMode, shutdown: F) -> SplitterResult<RunReport>
where
    F: Future,
{
    tokio::pin!(shutdown);

    let mut cancel_requested = false;
    loop {
        tokio::select! {
            event = handle.next_event() => match event {
                Some(event) => print_event(&event, tasks, mode),
                None => break,
            },
            _ = &mut shutdown, if !cancel_requested => {
                cancel_requested = true;
                warn!("Cancellation requested; finishing the current image first");
                handle.cancel();
            }
        }
    }

    handle.wait().await
}

fn print_event(event: &BatchEvent, tasks: &[ImageTask], mode: OutputMode) {
    if mode == OutputMode::Json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => warn!("Failed to serialize event: {e}"),
        }
        return;
    }

    match event {
        BatchEvent::TaskStarted { task_index, total_tasks, .. } => {
            let Some(task) = tasks.get(task_index - 1) else { return };
            println!("  [{task_index}/{total_tasks}] {} ({})", task.display_name(), task.settings_summary());
        }
        BatchEvent::TileProgress { .. } | BatchEvent::TaskProgress { .. } => {
            debug!("{}", event.status());
        }
        BatchEvent::RunFinished { error: Some(_), .. } => eprintln!("{}", event.status()),
        BatchEvent::RunFinished { .. } => println!("{}", event.status()),
    }
}
