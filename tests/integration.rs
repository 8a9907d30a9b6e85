//! Integration tests for the report generation pipeline.
//!
//! These tests exercise the full path from a report model (or JSON, or an
//! inspection record) to recorded pages and PDF bytes. They verify:
//! - Sections land on the right pages and forced breaks happen
//! - Items are never split across pages
//! - Page numbers are stamped once per page
//! - Image failures degrade to placeholders
//! - PDF output is structurally valid and reproducible

use std::io::Cursor;

use base64::Engine;
use chrono::{TimeZone, Utc};

use inspection_report::backend::{DrawCommand, LayoutPage, PageRecorder, RenderBackend};
use inspection_report::config::{Color, Labels, LayoutConfig};
use inspection_report::error::{BackendError, GenerationError, ImageError, ReportError};
use inspection_report::font::FontWeight;
use inspection_report::image_loader::{ImageDecoder, ImagePixelData, LoadedImage, SourceImageDecoder};
use inspection_report::layout::DocumentBuilder;
use inspection_report::model::inspection::{Geolocation, InspectionRecord, InspectionType, PropertyPhoto};
use inspection_report::model::*;
use inspection_report::{generate, generate_json, generate_record, layout, GenerationOptions};

// ─── Helpers ────────────────────────────────────────────────────

fn png_data_uri(width: u32, height: u32) -> String {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 120, 40]));
    let mut bytes: Vec<u8> = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
        .unwrap();
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&bytes)
    )
}

fn jpeg_data_uri(width: u32, height: u32) -> String {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([90, 90, 90]));
    let mut bytes: Vec<u8> = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Jpeg(80))
        .unwrap();
    format!(
        "data:image/jpeg;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&bytes)
    )
}

/// Resolves `WxH` sources to images of that pixel size without real pixel
/// data, so layout tests can use large photos cheaply. Anything else fails.
struct DimensionDecoder;

impl ImageDecoder for DimensionDecoder {
    fn decode(&self, image: &ImageRef) -> Result<LoadedImage, ImageError> {
        let (w, h) = image.src.split_once('x').ok_or(ImageError::UnsupportedFormat)?;
        Ok(LoadedImage {
            pixel_data: ImagePixelData::Decoded {
                rgb: Vec::new(),
                alpha: None,
            },
            width_px: w.parse().map_err(|_| ImageError::UnsupportedFormat)?,
            height_px: h.parse().map_err(|_| ImageError::UnsupportedFormat)?,
        })
    }
}

fn unsigned_slots() -> [SignatureSlot; 3] {
    [
        SignatureSlot::unsigned(SignatureRole::Inspector, "Ana Souza", "Inspector"),
        SignatureSlot::unsigned(SignatureRole::Landlord, "Carlos Dias", "Landlord"),
        SignatureSlot::unsigned(SignatureRole::Tenant, "Bruno Lima", "Tenant"),
    ]
}

fn make_report(items: Vec<InspectionItem>) -> ReportModel {
    ReportModel {
        title: "Property Inspection Report (Final)".to_string(),
        details: vec![
            DetailField::new("Inspector", "Ana Souza"),
            DetailField::new("Landlord", "Carlos Dias"),
            DetailField::new("Tenant", "Bruno Lima"),
            DetailField::new("Address", "Rua das Flores, 123, Apt 45"),
            DetailField::new("Date", "2026-02-14"),
            DetailField::new("Geolocation", ""),
        ],
        observations: Some("Keys handed over.".to_string()),
        summary: "Good overall condition.".to_string(),
        items,
        signatures: unsigned_slots(),
    }
}

fn make_item(ordinal: u32, src: &str, description: &str) -> InspectionItem {
    InspectionItem {
        ordinal,
        image: ImageRef::new(src),
        description: description.to_string(),
    }
}

/// A description whose every word identifies its item.
fn tagged_description(ordinal: u32, words: usize) -> String {
    vec![format!("room{}", ordinal); words].join(" ")
}

fn page_with_text<'a>(pages: &'a [LayoutPage], text: &str) -> Option<&'a LayoutPage> {
    pages.iter().find(|p| p.contains_text(text))
}

fn pages_with_word(pages: &[LayoutPage], word: &str) -> Vec<usize> {
    let mut found: Vec<usize> = pages
        .iter()
        .filter(|p| p.texts().any(|t| t.split_whitespace().any(|w| w == word)))
        .map(|p| p.index)
        .collect();
    found.dedup();
    found
}

fn layout_with(report: &ReportModel, config: &LayoutConfig) -> (Vec<LayoutPage>, inspection_report::layout::LayoutSummary) {
    let (recorder, summary) = layout(report, config, &DimensionDecoder).unwrap();
    (recorder.into_pages(), summary)
}

fn is_page_label(text: &str) -> bool {
    text.starts_with("page ")
}

// ─── Page structure ─────────────────────────────────────────────

#[test]
fn test_sections_and_forced_breaks() {
    let report = make_report(vec![make_item(1, "400x300", "Living room")]);
    let (pages, summary) = layout_with(&report, &LayoutConfig::default());

    assert_eq!(summary.page_count, 3);
    assert!(pages[0].contains_text("Property Inspection Report (Final)"));
    assert!(pages[0].contains_text("Inspection Details"));
    assert!(pages[0].contains_text("General Observations"));
    assert!(pages[0].contains_text("Property Condition Summary (AI)"));
    assert!(pages[0].contains_text("not provided"), "blank geolocation");
    assert!(pages[1].contains_text("Inspected Items"));
    assert!(pages[2].contains_text("Signatures"));
}

#[test]
fn test_every_page_stamped_exactly_once() {
    let items = (1..=12).map(|n| make_item(n, "800x600", &tagged_description(n, 40))).collect();
    let (pages, summary) = layout_with(&make_report(items), &LayoutConfig::default());

    let total = pages.len();
    assert!(total >= 1);
    assert_eq!(summary.stamped_pages, total);
    for (i, page) in pages.iter().enumerate() {
        let labels: Vec<_> = page.texts().filter(|t| is_page_label(t)).collect();
        assert_eq!(labels, [format!("page {} of {}", i + 1, total)], "page {}", i);
    }
}

#[test]
fn test_zero_items() {
    let (pages, summary) = layout_with(&make_report(vec![]), &LayoutConfig::default());

    assert_eq!(pages.len(), 3);
    assert_eq!(summary.stamped_pages, 3);
    assert!(summary.items.is_empty());
    assert!(pages[1].contains_text("no items were added"));
    assert!(!pages[1].commands.iter().any(|c| matches!(c, DrawCommand::Image { .. })));
    assert!(pages[2].contains_text("Signatures"));
}

#[test]
fn test_unsigned_placeholders() {
    let (pages, _) = layout_with(&make_report(vec![]), &LayoutConfig::default());
    let last = pages.last().unwrap();
    assert_eq!(last.texts().filter(|t| *t == "[unsigned]").count(), 3);
    for name in ["Ana Souza", "Carlos Dias", "Bruno Lima"] {
        assert!(last.contains_text(name), "missing signer {}", name);
    }
}

// ─── Items ──────────────────────────────────────────────────────

#[test]
fn test_wide_photo_scaled_to_fixed_height() {
    let report = make_report(vec![make_item(1, "4000x2000", "Facade")]);
    let (pages, summary) = layout_with(&report, &LayoutConfig::default());

    assert_eq!(summary.items[0].image_size, Some((400.0, 200.0)));
    let drawn = pages[1]
        .commands
        .iter()
        .find_map(|c| match c {
            DrawCommand::Image { width, height, .. } => Some((*width, *height)),
            _ => None,
        })
        .unwrap();
    assert_eq!(drawn, (400.0, 200.0));
}

#[test]
fn test_items_never_straddle_pages() {
    for words in [3, 150] {
        let items = (1..=25).map(|n| make_item(n, "640x480", &tagged_description(n, words))).collect();
        let (pages, summary) = layout_with(&make_report(items), &LayoutConfig::default());

        assert_eq!(summary.items.len(), 25);
        for placement in &summary.items {
            let label = format!("Item {}", placement.ordinal);
            let label_page = page_with_text(&pages, &label).unwrap().index;
            assert_eq!(label_page, placement.page_index);
            assert_eq!(
                pages_with_word(&pages, &format!("room{}", placement.ordinal)),
                [label_page],
                "item {} split across pages ({} words)",
                placement.ordinal,
                words
            );
        }

        for page in &pages {
            for command in &page.commands {
                if let DrawCommand::Text { text, y, .. } = command {
                    if !is_page_label(text) {
                        assert!(*y <= 841.89 - 40.0 + 1e-9, "'{}' drawn below the margin", text);
                    }
                }
            }
        }
    }
}

#[test]
fn test_long_descriptions_take_more_pages() {
    let short = (1..=25).map(|n| make_item(n, "640x480", &tagged_description(n, 3))).collect();
    let long = (1..=25).map(|n| make_item(n, "640x480", &tagged_description(n, 150))).collect();
    let (_, short) = layout_with(&make_report(short), &LayoutConfig::default());
    let (_, long) = layout_with(&make_report(long), &LayoutConfig::default());
    assert!(long.page_count > short.page_count);
}

#[test]
fn test_break_happens_before_label() {
    let items = (1..=6).map(|n| make_item(n, "640x480", &tagged_description(n, 20))).collect();
    let (pages, summary) = layout_with(&make_report(items), &LayoutConfig::default());

    let broken: Vec<_> = summary.items.iter().filter(|p| p.broke_before).collect();
    assert!(!broken.is_empty(), "expected at least one item on a fresh page");
    for placement in broken {
        let previous = &pages[placement.page_index - 1];
        assert!(!previous.contains_text(&format!("Item {}", placement.ordinal)));
        let first = pages[placement.page_index]
            .texts()
            .next()
            .unwrap();
        assert_eq!(first, format!("Item {}", placement.ordinal));
    }
}

#[test]
fn test_undershooting_margin_overflows_without_second_break() {
    // Reserves 700 + 12 from y=75, but draws the description at 75 + 730.
    let config = LayoutConfig {
        item_margin: 0.0,
        image_height: 700.0,
        ..Default::default()
    };
    let report = make_report(vec![make_item(1, "100x100", "Bedroom wall")]);
    let (pages, summary) = layout_with(&report, &config);

    assert_eq!(pages.len(), 3);
    assert!(!summary.items[0].broke_before);
    let description_y = pages[1]
        .commands
        .iter()
        .find_map(|c| match c {
            DrawCommand::Text { text, y, .. } if text == "Bedroom wall" => Some(*y),
            _ => None,
        })
        .unwrap();
    assert!(description_y > 841.89 - 40.0, "description should overflow the margin");
}

#[test]
fn test_oversized_item_breaks_at_most_once() {
    let config = LayoutConfig {
        image_height: 900.0,
        ..Default::default()
    };
    let report = make_report(vec![make_item(1, "100x100", "Tall photo")]);
    let (pages, summary) = layout_with(&report, &config);

    assert!(summary.items[0].broke_before);
    assert_eq!(summary.items[0].page_index, 2);
    assert_eq!(pages.len(), 4);
    assert!(pages[2].contains_text("Tall photo"));
}

#[test]
fn test_failed_photo_keeps_its_item() {
    let report = make_report(vec![
        make_item(1, "not-an-image", "Kitchen sink"),
        make_item(2, "300x200", "Oven"),
    ]);
    let (pages, summary) = layout_with(&report, &LayoutConfig::default());

    assert_eq!(summary.items.len(), 2);
    assert!(summary.items[0].image_size.is_none());
    assert!(pages[1].contains_text("image failed to load"));
    assert!(pages[1].contains_text("Kitchen sink"));
    assert!(pages[1].contains_text("Item 2"));
}

// ─── Errors ─────────────────────────────────────────────────────

/// Refuses to open more than `limit` pages.
struct LimitedBackend {
    inner: PageRecorder,
    limit: usize,
}

impl RenderBackend for LimitedBackend {
    fn place_text(&mut self, text: &str, x: f64, y: f64, size: f64, weight: FontWeight) -> Result<(), BackendError> {
        self.inner.place_text(text, x, y, size, weight)
    }

    fn place_image(
        &mut self,
        image: &std::sync::Arc<LoadedImage>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), BackendError> {
        self.inner.place_image(image, x, y, width, height)
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Color) -> Result<(), BackendError> {
        self.inner.draw_line(x1, y1, x2, y2, width, color)
    }

    fn start_new_page(&mut self) -> Result<usize, BackendError> {
        if self.inner.page_count() >= self.limit {
            return Err(BackendError::Refused("page limit reached".to_string()));
        }
        self.inner.start_new_page()
    }

    fn page_count(&self) -> usize {
        self.inner.page_count()
    }

    fn seek_page(&mut self, index: usize) -> Result<(), BackendError> {
        self.inner.seek_page(index)
    }
}

#[test]
fn test_refusing_backend_fails_generation() {
    let config = LayoutConfig::default();
    let mut backend = LimitedBackend {
        inner: PageRecorder::new(595.28, 841.89),
        limit: 2,
    };
    let err = DocumentBuilder::new(&config, &DimensionDecoder)
        .build(&make_report(vec![]), &mut backend)
        .unwrap_err();
    assert!(matches!(err, GenerationError::Backend(BackendError::Refused(_))));
    assert!(matches!(ReportError::from(err), ReportError::Generation(_)));
}

#[test]
fn test_invalid_config_rejected_before_layout() {
    let config = LayoutConfig {
        body_font_size: 0.0,
        ..Default::default()
    };
    let result = generate(
        &make_report(vec![]),
        &config,
        &SourceImageDecoder,
        &GenerationOptions::default(),
    );
    assert!(matches!(result, Err(ReportError::Config(_))));
}

#[test]
fn test_json_errors_carry_hints() {
    let err = generate_json("{ \"title\": ", &LayoutConfig::default(), &GenerationOptions::default()).unwrap_err();
    assert!(matches!(err, ReportError::Parse { .. }));

    let two_signatures = r#"{
        "title": "t",
        "signatures": [
            { "role": "inspector", "roleTitle": "Inspector" },
            { "role": "tenant", "roleTitle": "Tenant" }
        ]
    }"#;
    let err = generate_json(two_signatures, &LayoutConfig::default(), &GenerationOptions::default()).unwrap_err();
    assert!(err.to_string().contains("Hint: The JSON is valid"));
}

// ─── PDF output ─────────────────────────────────────────────────

#[test]
fn test_full_report_produces_valid_pdf() {
    let mut report = make_report(vec![
        make_item(1, &png_data_uri(40, 20), "Living room"),
        make_item(2, &jpeg_data_uri(30, 30), "Bathroom"),
    ]);
    report.signatures[0].image = Some(ImageRef::new(png_data_uri(60, 20)));

    let bytes = generate(
        &report,
        &LayoutConfig::default(),
        &SourceImageDecoder,
        &GenerationOptions::default(),
    )
    .unwrap();
    let text = String::from_utf8_lossy(&bytes);

    assert!(bytes.starts_with(b"%PDF-1.7"));
    assert!(bytes.ends_with(b"%%EOF\n"));
    assert!(text.contains("/Type /Pages"));
    assert!(text.contains("/Count 3"));
    assert!(text.contains("/Filter /DCTDecode"));
    assert!(text.contains("/Title (Property Inspection Report \\(Final\\))"));
    assert_eq!(text.matches("/Subtype /Image").count(), 3);
}

#[test]
fn test_output_is_reproducible() {
    let report = make_report(vec![make_item(1, &png_data_uri(8, 4), "Hall")]);
    let options = GenerationOptions {
        created_at: Some(Utc.with_ymd_and_hms(2026, 2, 14, 9, 30, 0).unwrap()),
        author: Some("Ana Souza".to_string()),
    };
    let config = LayoutConfig::default();
    let first = generate(&report, &config, &SourceImageDecoder, &options).unwrap();
    let second = generate(&report, &config, &SourceImageDecoder, &options).unwrap();

    assert_eq!(first, second);
    assert!(String::from_utf8_lossy(&first).contains("/CreationDate (D:20260214093000Z)"));
}

// ─── Inspection records ─────────────────────────────────────────

fn make_record() -> InspectionRecord {
    InspectionRecord {
        inspector_name: "Ana Souza".to_string(),
        landlord_name: "Carlos Dias".to_string(),
        tenant_name: String::new(),
        property_address: "Rua das Flores, 123".to_string(),
        inspection_type: InspectionType::Final,
        inspection_date: "14/02/2026".to_string(),
        geolocation: Some(Geolocation {
            latitude: -23.550520,
            longitude: -46.633308,
        }),
        photos: vec![PropertyPhoto {
            id: "p1".to_string(),
            image_data_url: png_data_uri(4, 4),
            description: "Sala".to_string(),
        }],
        observations: None,
        inspector_signature_url: Some(png_data_uri(10, 4)),
        landlord_signature_url: None,
        tenant_signature_url: None,
    }
}

#[test]
fn test_record_in_portuguese() {
    let config = LayoutConfig {
        labels: Labels::portuguese(),
        ..Default::default()
    };
    let report = ReportModel::from_record(&make_record(), Some("Imóvel em bom estado."), &config.labels);
    let (recorder, summary) = layout(&report, &config, &SourceImageDecoder).unwrap();
    let pages = recorder.pages();

    assert_eq!(summary.page_count, 3);
    assert!(pages[0].contains_text("Laudo de Vistoria de Imóvel (Final)"));
    assert!(pages[0].contains_text("-23.55052, -46.63331"));
    assert!(pages[0].contains_text("Não informado"), "empty tenant name");
    assert!(pages[1].contains_text("Item 1"));
    assert_eq!(pages[2].texts().filter(|t| *t == "[Não assinado]").count(), 2);
    assert!(pages[2].contains_text("Página 3 de 3"));
}

#[test]
fn test_generate_record_end_to_end() {
    let bytes = generate_record(&make_record(), None, &LayoutConfig::default(), &GenerationOptions::default()).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7"));
    assert!(String::from_utf8_lossy(&bytes).contains("/Count 3"));
}
