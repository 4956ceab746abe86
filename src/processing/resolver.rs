//! Merges global defaults with an optional per-image override.

use tracing::warn;
use crate::core::{EffectiveSettings, GlobalSettings, ImageOverride};

/// Resolves the settings one task is processed with. Pure; no I/O.
///
/// Edge size precedence: override custom size, override base size, global
/// custom size, global base size. A size of zero is not a positive integer
/// and falls through to the next tier. Grid, format and folder each fall
/// back from override to global independently.
pub fn resolve(global: &GlobalSettings, image_override: Option<&ImageOverride>) -> EffectiveSettings {
    let empty = ImageOverride::default();
    let o = image_override.unwrap_or(&empty);

    let edge_size = [
        ("override custom size", o.custom_edge_size),
        ("override base size", o.base_edge_size),
        ("global custom size", global.custom_edge_size),
    ]
    .into_iter()
    .find_map(|(tier, size)| match size {
        Some(0) => {
            warn!("Ignoring non-positive {tier}; falling back to the next tier");
            None
        }
        other => other,
    })
    .unwrap_or(global.base_edge_size);

    let across = clamp_grid(o.grid_across.unwrap_or(global.grid_across));
    let high = clamp_grid(o.grid_high.unwrap_or(global.grid_high));

    let maintain_source_format = o
        .maintain_source_format
        .unwrap_or(global.maintain_source_format);

    let folder_name = o
        .output_folder_name
        .as_ref()
        .or(global.output_folder_name.as_ref())
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty());

    EffectiveSettings {
        edge_size,
        across,
        high,
        maintain_source_format,
        folder_name,
    }
}

/// Grid dimensions below one become one; a zero divisor is never produced.
fn clamp_grid(value: i32) -> u32 {
    value.max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global() -> GlobalSettings {
        GlobalSettings {
            base_edge_size: 512,
            custom_edge_size: Some(600),
            grid_across: 4,
            grid_high: 2,
            maintain_source_format: true,
            output_folder_name: Some("tiles".into()),
        }
    }

    #[test]
    fn no_override_equals_global_defaults() {
        let g = global();
        let expected = EffectiveSettings {
            edge_size: 600,
            across: 4,
            high: 2,
            maintain_source_format: true,
            folder_name: Some("tiles".into()),
        };
        assert_eq!(resolve(&g, None), expected);
        assert_eq!(resolve(&g, Some(&ImageOverride::default())), expected);
    }

    #[test]
    fn override_custom_size_wins_over_everything() {
        let o = ImageOverride {
            base_edge_size: Some(768),
            custom_edge_size: Some(333),
            ..ImageOverride::default()
        };
        assert_eq!(resolve(&global(), Some(&o)).edge_size, 333);
    }

    #[test]
    fn override_base_size_beats_global_custom_size() {
        let o = ImageOverride {
            base_edge_size: Some(1024),
            ..ImageOverride::default()
        };
        assert_eq!(resolve(&global(), Some(&o)).edge_size, 1024);
    }

    #[test]
    fn global_base_size_is_the_last_resort() {
        let g = GlobalSettings {
            custom_edge_size: None,
            ..global()
        };
        assert_eq!(resolve(&g, None).edge_size, 512);
    }

    #[test]
    fn zero_sizes_fall_through() {
        let o = ImageOverride {
            custom_edge_size: Some(0),
            base_edge_size: Some(0),
            ..ImageOverride::default()
        };
        let g = GlobalSettings {
            custom_edge_size: Some(0),
            ..global()
        };
        assert_eq!(resolve(&g, Some(&o)).edge_size, 512);
    }

    #[test]
    fn grid_dimensions_are_clamped() {
        let o = ImageOverride {
            grid_across: Some(0),
            grid_high: Some(-3),
            ..ImageOverride::default()
        };
        let resolved = resolve(&global(), Some(&o));
        assert_eq!((resolved.across, resolved.high), (1, 1));
        assert!(resolved.is_single_tile());
    }

    #[test]
    fn fields_fall_back_independently() {
        let o = ImageOverride {
            grid_high: Some(5),
            maintain_source_format: Some(false),
            ..ImageOverride::default()
        };
        let resolved = resolve(&global(), Some(&o));
        assert_eq!(resolved.across, 4);
        assert_eq!(resolved.high, 5);
        assert!(!resolved.maintain_source_format);
        assert_eq!(resolved.folder_name.as_deref(), Some("tiles"));
    }

    #[test]
    fn empty_override_folder_drops_the_global_folder() {
        let o = ImageOverride {
            output_folder_name: Some("  ".into()),
            ..ImageOverride::default()
        };
        assert_eq!(resolve(&global(), Some(&o)).folder_name, None);
    }
}
