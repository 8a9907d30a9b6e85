//! # Page-Aware Report Layout
//!
//! Content is measured before it is drawn, and every unit of content asks the
//! cursor whether it fits before anything of it reaches the page:
//!
//! 1. Open a page with known dimensions
//! 2. Measure the next unit (a title block, a detail row, a text line, a
//!    whole photographed item)
//! 3. `reserve` its height: if it does not fit, start a new page first
//! 4. Draw it, then `advance` past it
//!
//! A photographed item is planned as one unit: image plus description are
//! reserved together, so the item lands on one page span and is never split.
//! This is a lookahead estimate, not a constraint solver. If the estimate is
//! short of what actually gets drawn, the item overflows into the bottom
//! margin; no second break is inserted mid-item.
//!
//! Two breaks are presentation policy rather than overflow: the itemized
//! section and the signature section always start on a fresh page
//! (see [`DocumentBuilder::build`]).
//!
//! Page numbers come last, once the total page count is known.

pub mod builder;
pub mod cursor;
pub mod details;
pub mod items;
pub mod page_numbers;
pub mod section;
pub mod signatures;

pub use builder::{DocumentBuilder, LayoutSummary};
pub use cursor::PageFlowCursor;
pub use details::DetailListRenderer;
pub use items::{scaled_image_size, ItemPlacement, ItemRenderer};
pub use page_numbers::PageNumberStamper;
pub use section::SectionRenderer;
pub use signatures::SignatureRowRenderer;

use crate::backend::RenderBackend;
use crate::error::BackendError;
use crate::font::FontWeight;
use crate::text::TextMeasurer;

/// Draw one line of text horizontally centered on `center_x`.
pub(crate) fn place_centered(
    backend: &mut dyn RenderBackend,
    measurer: &TextMeasurer,
    text: &str,
    center_x: f64,
    y: f64,
    font_size: f64,
    weight: FontWeight,
) -> Result<(), BackendError> {
    let width = measurer.measure_width(text, font_size, weight);
    backend.place_text(text, center_x - width / 2.0, y, font_size, weight)
}

/// Draw pre-wrapped lines starting at baseline `y`, one line height apart.
pub(crate) fn place_lines(
    backend: &mut dyn RenderBackend,
    measurer: &TextMeasurer,
    lines: &[String],
    x: f64,
    y: f64,
    font_size: f64,
    weight: FontWeight,
) -> Result<(), BackendError> {
    let line_height = measurer.measure_height(1, font_size);
    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        backend.place_text(line, x, y + i as f64 * line_height, font_size, weight)?;
    }
    Ok(())
}
