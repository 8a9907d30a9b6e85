//! # Image Loading and Decoding
//!
//! Resolves an [`ImageRef`] to intrinsic pixel dimensions plus data the PDF
//! writer can embed. JPEG images pass through without re-encoding (the PDF
//! format supports DCTDecode natively). PNG images are decoded to RGB pixels
//! with a separate alpha channel for SMask transparency.
//!
//! Decoding failures are reported as [`ImageError`] and are always recoverable:
//! the renderers substitute a placeholder line and carry on.

use std::io::Cursor;

use crate::error::ImageError;
use crate::model::ImageRef;

/// A fully decoded/loaded image ready for PDF embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub pixel_data: ImagePixelData,
    pub width_px: u32,
    pub height_px: u32,
}

impl LoadedImage {
    /// Width over height of the source pixels.
    pub fn aspect_ratio(&self) -> f64 {
        self.width_px as f64 / self.height_px as f64
    }

    /// Reject images with a zero dimension, which have no usable aspect ratio.
    ///
    /// The renderers run every decoder result through this, so a custom
    /// [`ImageDecoder`] cannot hand a degenerate image to layout.
    pub fn non_empty(self) -> Result<Self, ImageError> {
        if self.width_px == 0 || self.height_px == 0 {
            return Err(ImageError::ZeroSize);
        }
        Ok(self)
    }
}

/// The pixel data in a format the PDF serializer can consume directly.
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePixelData {
    /// Raw JPEG bytes, embedded directly with DCTDecode.
    Jpeg {
        data: Vec<u8>,
        color_space: JpegColorSpace,
    },
    /// Decoded RGB pixels + optional alpha channel.
    Decoded {
        /// width * height * 3 bytes (RGB)
        rgb: Vec<u8>,
        /// width * height bytes (grayscale alpha). None if fully opaque.
        alpha: Option<Vec<u8>>,
    },
}

/// JPEG color space for the PDF /ColorSpace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JpegColorSpace {
    DeviceRGB,
    DeviceGray,
}

/// The image-decode facility the layout engine consumes.
///
/// Implementations must be deterministic: identical handles yield identical
/// results within one generation.
pub trait ImageDecoder {
    fn decode(&self, image: &ImageRef) -> Result<LoadedImage, ImageError>;
}

/// Decodes images from the source string held by the [`ImageRef`].
///
/// Supported `src` formats:
/// - `data:image/...;base64,...` data URI
/// - File path with an explicit `/`, `./` or `../` prefix
/// - Raw base64-encoded image data
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceImageDecoder;

impl ImageDecoder for SourceImageDecoder {
    fn decode(&self, image: &ImageRef) -> Result<LoadedImage, ImageError> {
        load_image(&image.src)
    }
}

/// Load an image from a source string.
pub fn load_image(src: &str) -> Result<LoadedImage, ImageError> {
    let raw_bytes = read_source_bytes(src)?;
    decode_image_bytes(&raw_bytes)
}

/// Resolve the source string to raw image bytes.
fn read_source_bytes(src: &str) -> Result<Vec<u8>, ImageError> {
    if src.starts_with("data:") {
        let comma_pos = src.find(',').ok_or(ImageError::InvalidDataUri)?;
        return base64_decode(&src[comma_pos + 1..]);
    }

    // Only explicit path prefixes count as paths; base64 text contains '/'.
    if src.starts_with('/') || src.starts_with("./") || src.starts_with("../") {
        return std::fs::read(src).map_err(|source| ImageError::File {
            path: src.to_string(),
            source,
        });
    }

    base64_decode(src)
}

fn base64_decode(input: &str) -> Result<Vec<u8>, ImageError> {
    use base64::Engine;
    let cleaned: String = input.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(base64::engine::general_purpose::STANDARD.decode(cleaned)?)
}

/// Detect image format from magic bytes and decode accordingly.
pub fn decode_image_bytes(data: &[u8]) -> Result<LoadedImage, ImageError> {
    if data.len() < 4 {
        return Err(ImageError::TooShort);
    }

    let loaded = if is_jpeg(data) {
        decode_jpeg(data)?
    } else if is_png(data) {
        decode_png(data)?
    } else {
        return Err(ImageError::UnsupportedFormat);
    };
    loaded.non_empty()
}

fn is_jpeg(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0xFF && data[1] == 0xD8
}

fn is_png(data: &[u8]) -> bool {
    data.len() >= 4 && data[0] == 0x89 && data[1] == 0x50 && data[2] == 0x4E && data[3] == 0x47
}

/// JPEG: read dimensions and color space without decoding pixels.
fn decode_jpeg(data: &[u8]) -> Result<LoadedImage, ImageError> {
    let reader = image::io::Reader::with_format(Cursor::new(data), image::ImageFormat::Jpeg);
    let (width, height) = reader.into_dimensions()?;

    Ok(LoadedImage {
        pixel_data: ImagePixelData::Jpeg {
            data: data.to_vec(),
            color_space: detect_jpeg_color_space(data),
        },
        width_px: width,
        height_px: height,
    })
}

/// Scan JPEG markers for the SOF segment and read its component count.
fn detect_jpeg_color_space(data: &[u8]) -> JpegColorSpace {
    let mut i = 2; // skip SOI
    while i + 1 < data.len() {
        if data[i] != 0xFF {
            break;
        }
        let marker = data[i + 1];
        let is_sof = matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF);
        if is_sof && i + 9 < data.len() {
            // length(2) + precision(1) + height(2) + width(2) + components(1)
            return if data[i + 9] == 1 {
                JpegColorSpace::DeviceGray
            } else {
                JpegColorSpace::DeviceRGB
            };
        }
        if i + 3 < data.len() {
            let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
            i += 2 + seg_len;
        } else {
            break;
        }
    }
    JpegColorSpace::DeviceRGB
}

/// PNG: decode to RGBA, split into RGB + alpha.
fn decode_png(data: &[u8]) -> Result<LoadedImage, ImageError> {
    let img = image::load_from_memory_with_format(data, image::ImageFormat::Png)?;

    let rgba = img.to_rgba8();
    let width = rgba.width();
    let height = rgba.height();

    let pixel_count = (width as usize) * (height as usize);
    let mut rgb = Vec::with_capacity(pixel_count * 3);
    let mut alpha = Vec::with_capacity(pixel_count);
    let mut has_transparency = false;

    for pixel in rgba.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
        alpha.push(pixel[3]);
        has_transparency |= pixel[3] != 255;
    }

    Ok(LoadedImage {
        pixel_data: ImagePixelData::Decoded {
            rgb,
            alpha: has_transparency.then_some(alpha),
        },
        width_px: width,
        height_px: height,
    })
}
