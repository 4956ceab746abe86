// src/processing/raster/encode.rs

//! In-memory tile encoding, one function per output codec.
//!
//! Tiles are encoded into a buffer first so the executor can compare the
//! bytes against an existing file before writing.

use std::io::Cursor;
use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageResult};
use crate::utils::ImageFormat;

/// Encodes `image` as JPEG. Alpha is dropped since JPEG cannot carry it.
pub fn encode_jpeg(image: &DynamicImage) -> ImageResult<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, ImageFormat::JPEG_QUALITY);
    DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)?;
    Ok(buf)
}

/// Encodes `image` as PNG, keeping its colour type and bit depth.
pub fn encode_png(image: &DynamicImage) -> ImageResult<Vec<u8>> {
    let mut buf = Vec::new();
    image.write_with_encoder(PngEncoder::new(&mut buf))?;
    Ok(buf)
}

/// Encodes `image` as BMP (8-bit RGB, or RGBA when the tile has alpha).
pub fn encode_bmp(image: &DynamicImage) -> ImageResult<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    let normalized = if image.color().has_alpha() {
        DynamicImage::ImageRgba8(image.to_rgba8())
    } else {
        DynamicImage::ImageRgb8(image.to_rgb8())
    };
    normalized.write_with_encoder(BmpEncoder::new(&mut cursor))?;
    Ok(cursor.into_inner())
}

/// Encodes `image` as lossless WebP, the only WebP mode the encoder supports.
pub fn encode_webp(image: &DynamicImage) -> ImageResult<Vec<u8>> {
    let mut buf = Vec::new();
    let normalized = if image.color().has_alpha() {
        DynamicImage::ImageRgba8(image.to_rgba8())
    } else {
        DynamicImage::ImageRgb8(image.to_rgb8())
    };
    normalized.write_with_encoder(WebPEncoder::new_lossless(&mut buf))?;
    Ok(buf)
}

/// Dispatches to the correct encoder for `format`.
pub fn encode_as(image: &DynamicImage, format: ImageFormat) -> ImageResult<Vec<u8>> {
    match format {
        ImageFormat::JPEG => encode_jpeg(image),
        ImageFormat::PNG => encode_png(image),
        ImageFormat::BMP => encode_bmp(image),
        ImageFormat::WebP => encode_webp(image),
    }
}
