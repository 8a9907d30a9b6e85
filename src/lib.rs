//! # Inspection Report
//!
//! A paginated PDF engine for property inspection reports.
//!
//! A report is a fixed sequence of sections: details, observations, an
//! externally generated condition summary, photographed items, and a
//! three-party signature block. Every unit is measured before it is drawn and
//! the page flow cursor decides whether it still fits, so a photographed item
//! is never split from its description across a page boundary.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON / ReportModel / InspectionRecord)
//!       ↓
//!   [model]    Report model, record normalization
//!       ↓
//!   [layout]   Page-aware layout into a RenderBackend
//!       ↓
//!   [backend]  Recorded pages of draw commands
//!       ↓
//!   [pdf]      Serialize to PDF bytes
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod font;
pub mod image_loader;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod text;

use chrono::{DateTime, Utc};

use backend::PageRecorder;
use config::LayoutConfig;
use error::ReportError;
use image_loader::{ImageDecoder, SourceImageDecoder};
use layout::{DocumentBuilder, LayoutSummary};
use model::inspection::InspectionRecord;
use model::ReportModel;
use pdf::{DocumentInfo, PdfWriter};

/// Options that affect the PDF file but not the layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOptions {
    /// Written as the document's creation date. The library never reads the
    /// clock, so identical input and options give identical bytes.
    pub created_at: Option<DateTime<Utc>>,
    pub author: Option<String>,
}

/// Lay out a report without serializing it.
///
/// Returns the recorded pages together with the layout summary; useful for
/// inspecting where content landed.
pub fn layout(
    report: &ReportModel,
    config: &LayoutConfig,
    decoder: &dyn ImageDecoder,
) -> Result<(PageRecorder, LayoutSummary), ReportError> {
    config.validate()?;
    let (width, height) = config.page_dimensions();
    let mut recorder = PageRecorder::new(width, height);
    let summary = DocumentBuilder::new(config, decoder).build(report, &mut recorder)?;
    Ok((recorder, summary))
}

/// Generate a report to PDF bytes.
///
/// This is the primary entry point. Either the whole document is produced or
/// an error is returned; there is no partial output.
pub fn generate(
    report: &ReportModel,
    config: &LayoutConfig,
    decoder: &dyn ImageDecoder,
    options: &GenerationOptions,
) -> Result<Vec<u8>, ReportError> {
    let (recorder, _) = layout(report, config, decoder)?;
    let info = DocumentInfo {
        title: Some(report.title.clone()),
        author: options.author.clone(),
        created_at: options.created_at,
    };
    Ok(PdfWriter::new(config.font_family).write(recorder.pages(), &info))
}

/// Generate a report described as JSON, resolving images from their sources.
pub fn generate_json(
    json: &str,
    config: &LayoutConfig,
    options: &GenerationOptions,
) -> Result<Vec<u8>, ReportError> {
    let report: ReportModel = serde_json::from_str(json)?;
    generate(&report, config, &SourceImageDecoder, options)
}

/// Generate a report straight from a captured inspection record.
pub fn generate_record(
    record: &InspectionRecord,
    summary: Option<&str>,
    config: &LayoutConfig,
    options: &GenerationOptions,
) -> Result<Vec<u8>, ReportError> {
    let report = ReportModel::from_record(record, summary, &config.labels);
    generate(&report, config, &SourceImageDecoder, options)
}

/// Render a report with the default layout, decoder and options.
pub fn render(report: &ReportModel) -> Result<Vec<u8>, ReportError> {
    generate(
        report,
        &LayoutConfig::default(),
        &SourceImageDecoder,
        &GenerationOptions::default(),
    )
}
