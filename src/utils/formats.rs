use serde::Serialize;
use std::path::Path;
use std::str::FromStr;
use crate::utils::{SplitterError, ValidationError};

/// Codecs accepted at intake and supported for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    JPEG,
    PNG,
    BMP,
    WebP,
}

impl ImageFormat {
    /// JPEG quality used whenever tiles are re-encoded as JPEG
    pub const JPEG_QUALITY: u8 = 90;

    /// Lowercase codec name, used as the tile extension when the source format is kept.
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::JPEG => "jpeg",
            Self::PNG => "png",
            Self::BMP => "bmp",
            Self::WebP => "webp",
        }
    }

    /// Extension for tiles written in this format.
    ///
    /// Converted output is always `jpg`; kept formats use the codec's native name.
    pub fn output_extension(&self, maintain_source_format: bool) -> &'static str {
        if maintain_source_format {
            self.native_name()
        } else {
            "jpg"
        }
    }

    /// Maps a codec sniffed by the `image` crate onto a supported format.
    pub fn from_codec(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(Self::JPEG),
            image::ImageFormat::Png => Some(Self::PNG),
            image::ImageFormat::Bmp => Some(Self::BMP),
            image::ImageFormat::WebP => Some(Self::WebP),
            _ => None,
        }
    }

    pub fn codec(&self) -> image::ImageFormat {
        match self {
            Self::JPEG => image::ImageFormat::Jpeg,
            Self::PNG => image::ImageFormat::Png,
            Self::BMP => image::ImageFormat::Bmp,
            Self::WebP => image::ImageFormat::WebP,
        }
    }
}

impl FromStr for ImageFormat {
    type Err = SplitterError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::JPEG),
            "png" => Ok(Self::PNG),
            "bmp" => Ok(Self::BMP),
            "webp" => Ok(Self::WebP),
            _ => Err(SplitterError::processing(format!(
                "Unsupported image format: {}", ext
            ))),
        }
    }
}

/// Get format from file extension
pub fn format_from_extension(path: &Path) -> Result<ImageFormat, ValidationError> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(|ext| ImageFormat::from_str(ext).ok())
        .ok_or_else(|| ValidationError::UnsupportedExtension(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_case_insensitive() {
        assert_eq!(format_from_extension(Path::new("a/B.JPG")).unwrap(), ImageFormat::JPEG);
        assert_eq!(format_from_extension(Path::new("c.WebP")).unwrap(), ImageFormat::WebP);
        assert_eq!(format_from_extension(Path::new("d.Bmp")).unwrap(), ImageFormat::BMP);
        assert_eq!("PNG".parse::<ImageFormat>().unwrap(), ImageFormat::PNG);
    }

    #[test]
    fn unknown_or_missing_extension_is_rejected() {
        assert!(matches!(
            format_from_extension(Path::new("scan.tiff")),
            Err(ValidationError::UnsupportedExtension(_))
        ));
        assert!(format_from_extension(Path::new("README")).is_err());
    }

    #[test]
    fn output_extension_follows_format_policy() {
        assert_eq!(ImageFormat::PNG.output_extension(false), "jpg");
        assert_eq!(ImageFormat::PNG.output_extension(true), "png");
        assert_eq!(ImageFormat::JPEG.output_extension(true), "jpeg");
        assert_eq!(ImageFormat::WebP.output_extension(true), "webp");
    }
}
