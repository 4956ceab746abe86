// src/processing/raster/executor.rs

//! Splits and resizes one source image.
//!
//! Runs synchronously; the batch engine calls it from its blocking worker
//! thread, one image at a time.

use std::path::{Path, PathBuf};
use image::{DynamicImage, ImageReader};
use tracing::debug;

use crate::core::EffectiveSettings;
use crate::processing::grid::tiles;
use crate::processing::output_path::{derive_folder, tile_file_name};
use crate::utils::{
    extract_filename, write_if_changed, ImageFormat, SplitterError, SplitterResult, WriteOutcome,
};

use super::encode::encode_as;
use super::resize::resize_to_edge;

/// Files produced for one source image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitOutput {
    pub folder: PathBuf,
    pub written: Vec<PathBuf>,
    /// Destinations that already held identical bytes and were left alone
    pub unchanged: Vec<PathBuf>,
}

/// Decodes `source`, sniffing the codec from the file content.
pub fn load_source(source: &Path) -> SplitterResult<(DynamicImage, ImageFormat)> {
    let reader = ImageReader::open(source)
        .map_err(|e| SplitterError::source_read(source, e))?
        .with_guessed_format()
        .map_err(|e| SplitterError::source_read(source, e))?;

    let format = reader
        .format()
        .and_then(ImageFormat::from_codec)
        .ok_or_else(|| SplitterError::source_read(source, "unsupported or unrecognised image codec"))?;

    let image = reader
        .decode()
        .map_err(|e| SplitterError::source_read(source, e))?;

    debug!(
        "Loaded '{}': {}×{} ({:?})",
        extract_filename(source),
        image.width(),
        image.height(),
        format
    );
    Ok((image, format))
}

/// Splits one image into its grid, resizes every tile and writes it out.
///
/// `on_tile(ordinal, total)` is called after each tile is on disk.
pub fn split_single(
    source: &Path,
    settings: &EffectiveSettings,
    run_timestamp: &str,
    mut on_tile: impl FnMut(u32, u32),
) -> SplitterResult<SplitOutput> {
    let (image, source_format) = load_source(source)?;

    if image.width() < settings.across || image.height() < settings.high {
        return Err(SplitterError::processing(format!(
            "'{}' is {}×{} pixels, too small for a {}×{} grid",
            source.display(),
            image.width(),
            image.height(),
            settings.across,
            settings.high
        )));
    }

    let folder = derive_folder(source, settings, run_timestamp)?;

    let output_format = if settings.maintain_source_format {
        source_format
    } else {
        ImageFormat::JPEG
    };
    let extension = source_format.output_extension(settings.maintain_source_format);

    let grid = tiles(image.width(), image.height(), settings.across, settings.high);
    let total = grid.len() as u32;
    let mut output = SplitOutput {
        folder,
        ..SplitOutput::default()
    };

    for tile in grid {
        let rect = tile.rect;
        let cropped = image.crop_imm(rect.left, rect.top, rect.width(), rect.height());
        let resized = resize_to_edge(&cropped, settings.edge_size);

        let bytes = encode_as(&resized, output_format).map_err(|e| {
            SplitterError::processing(format!(
                "Failed to encode tile {} of '{}': {e}",
                tile.ordinal,
                source.display()
            ))
        })?;

        let path = output.folder.join(tile_file_name(source, tile.ordinal, extension));
        match write_if_changed(&path, &bytes)
            .map_err(|e| SplitterError::tile_write(&path, tile.ordinal, e))?
        {
            WriteOutcome::Written => {
                debug!("Wrote {} ({}×{})", path.display(), resized.width(), resized.height());
                output.written.push(path);
            }
            WriteOutcome::Unchanged => {
                debug!("Unchanged, skipped write: {}", path.display());
                output.unchanged.push(path);
            }
        }

        on_tile(tile.ordinal, total);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn settings(across: u32, high: u32, edge_size: u32, maintain: bool) -> EffectiveSettings {
        EffectiveSettings {
            edge_size,
            across,
            high,
            maintain_source_format: maintain,
            folder_name: None,
        }
    }

    fn write_png(dir: &Path, name: &str, w: u32, h: u32) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_fn(w, h, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 90]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn grid_split_writes_every_tile_in_order() {
        let dir = TempDir::new().unwrap();
        let source = write_png(dir.path(), "grid.png", 120, 60);
        let mut seen = Vec::new();

        let out = split_single(&source, &settings(3, 2, 32, false), "ts", |i, n| seen.push((i, n))).unwrap();

        assert_eq!(out.folder, dir.path().join("grid"));
        assert_eq!(seen, (1..=6).map(|i| (i, 6)).collect::<Vec<_>>());
        let names: Vec<_> = out.written.iter().map(|p| extract_filename(p)).collect();
        assert_eq!(names[0], "grid_part_1.jpg");
        assert_eq!(names[5], "grid_part_6.jpg");

        let tile = image::open(&out.written[0]).unwrap();
        assert_eq!((tile.width(), tile.height()), (32, 24));
    }

    #[test]
    fn maintained_format_keeps_the_codec_and_native_extension() {
        let dir = TempDir::new().unwrap();
        let source = write_png(dir.path(), "keep.png", 40, 20);

        let out = split_single(&source, &settings(2, 1, 10, true), "ts", |_, _| {}).unwrap();

        assert!(out.written[1].ends_with("keep/keep_part_2.png"));
        let bytes = std::fs::read(&out.written[1]).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
    }

    #[test]
    fn rerun_finds_identical_output() {
        let dir = TempDir::new().unwrap();
        let source = write_png(dir.path(), "again.png", 50, 50);
        let s = settings(2, 2, 16, false);

        let first = split_single(&source, &s, "ts", |_, _| {}).unwrap();
        let second = split_single(&source, &s, "ts", |_, _| {}).unwrap();

        assert_eq!(first.written.len(), 4);
        assert!(second.written.is_empty());
        assert_eq!(second.unchanged, first.written);
    }

    #[test]
    fn missing_source_is_a_read_error_and_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("ghost.jpg");

        let err = split_single(&source, &settings(2, 2, 16, false), "ts", |_, _| {}).unwrap_err();

        assert!(matches!(err, SplitterError::SourceRead { .. }));
        assert!(!dir.path().join("ghost").exists());
    }

    #[test]
    fn corrupt_source_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("broken.png");
        std::fs::write(&source, b"definitely not an image").unwrap();

        let err = split_single(&source, &settings(1, 1, 16, false), "ts", |_, _| {}).unwrap_err();
        assert!(matches!(err, SplitterError::SourceRead { .. }));
    }

    #[test]
    fn grid_finer_than_the_image_is_refused() {
        let dir = TempDir::new().unwrap();
        let source = write_png(dir.path(), "tiny.png", 3, 3);

        let err = split_single(&source, &settings(4, 1, 16, false), "ts", |_, _| {}).unwrap_err();
        assert!(matches!(err, SplitterError::Processing(_)));
    }
}
