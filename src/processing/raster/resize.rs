// src/processing/raster/resize.rs

//! Aspect-preserving resize to a target edge length.

use image::DynamicImage;
use image::imageops::FilterType;

/// Resampling filter for every resize.
const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Output dimensions for scaling the longer side of `width × height` to `target_edge`.
///
/// The shorter side is scaled by the same ratio and rounded down, but never
/// below one pixel. Square inputs become `target_edge × target_edge`.
pub fn target_dimensions(width: u32, height: u32, target_edge: u32) -> (u32, u32) {
    let scale_shorter = |shorter: u32, longer: u32| {
        let scaled = u64::from(target_edge) * u64::from(shorter) / u64::from(longer);
        (scaled as u32).max(1)
    };

    if width > height {
        (target_edge, scale_shorter(height, width))
    } else if height > width {
        (scale_shorter(width, height), target_edge)
    } else {
        (target_edge, target_edge)
    }
}

/// Resizes `image` so its longer side is exactly `target_edge` pixels.
///
/// Scales up as well as down.
pub fn resize_to_edge(image: &DynamicImage, target_edge: u32) -> DynamicImage {
    let (width, height) = target_dimensions(image.width(), image.height(), target_edge);
    if (width, height) == (image.width(), image.height()) {
        return image.clone();
    }
    image.resize_exact(width, height, RESIZE_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn longer_side_hits_the_target_exactly() {
        assert_eq!(target_dimensions(250, 300, 100), (83, 100));
        assert_eq!(target_dimensions(1920, 1080, 512), (512, 288));
        assert_eq!(target_dimensions(300, 300, 100), (100, 100));
        assert_eq!(target_dimensions(64, 48, 512), (512, 384));
    }

    #[test]
    fn shorter_side_is_floored_and_never_zero() {
        assert_eq!(target_dimensions(1000, 999, 10), (10, 9));
        assert_eq!(target_dimensions(5000, 1, 100), (100, 1));
    }

    #[test]
    fn shorter_side_never_exceeds_the_exact_ratio() {
        for &(w, h, edge) in &[(1001, 333, 512), (7, 3, 100), (640, 481, 768), (12, 4000, 1024)] {
            let (nw, nh) = target_dimensions(w, h, edge);
            let (longer, shorter) = (w.max(h) as f64, w.min(h) as f64);
            let exact = edge as f64 * shorter / longer;
            assert_eq!(nw.max(nh), edge);
            assert!(nw.min(nh) as f64 <= exact.max(1.0));
        }
    }

    #[test]
    fn resized_image_has_the_computed_dimensions() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(250, 300));
        let resized = resize_to_edge(&image, 100);
        assert_eq!((resized.width(), resized.height()), (83, 100));
    }
}
