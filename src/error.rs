//! Structured error types for the report engine.
//!
//! Image failures are recoverable and never leave the renderer that hit them.
//! Everything else that goes wrong during layout is fatal to the generation
//! and surfaces as a single [`ReportError::Generation`].

use thiserror::Error;

/// The unified error type returned by all public API functions.
#[derive(Debug, Error)]
pub enum ReportError {
    /// JSON input failed to parse as a report or inspection record.
    #[error("Failed to parse report: {source}{}", format_hint(.hint))]
    Parse {
        source: serde_json::Error,
        hint: String,
    },
    /// The layout configuration cannot produce a usable page.
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// Layout or PDF generation failed. No partial output exists.
    #[error("Report generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_hint(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the report schema. Check field names and that exactly three signatures are given.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        ReportError::Parse { source: e, hint }
    }
}

/// A fatal failure inside one generation call.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("text measurement rejected input: {0}")]
    Measure(#[from] MeasureError),
    #[error("rendering backend refused operation: {0}")]
    Backend(#[from] BackendError),
}

/// Malformed input handed to the text measurer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    #[error("font size must be finite and positive, got {0}")]
    FontSize(f64),
    #[error("wrap width must be finite and positive, got {0}")]
    Width(f64),
}

/// A rendering backend refused a draw or page operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    #[error("no page has been started")]
    NoActivePage,
    #[error("page {index} does not exist ({count} pages)")]
    PageOutOfRange { index: usize, count: usize },
    #[error("{0}")]
    Refused(String),
}

/// An image could not be resolved or decoded. Recovered locally by
/// substituting a placeholder line.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("invalid data URI: missing comma")]
    InvalidDataUri,
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("failed to read image file '{path}': {source}")]
    File {
        path: String,
        source: std::io::Error,
    },
    #[error("image data too short")]
    TooShort,
    #[error("unsupported image format (expected JPEG or PNG)")]
    UnsupportedFormat,
    #[error("image has zero width or height")]
    ZeroSize,
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}
