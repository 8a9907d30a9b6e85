//! "page i of N" stamping, run once after all content has been laid out.

use crate::backend::RenderBackend;
use crate::config::LayoutConfig;
use crate::error::GenerationError;
use crate::font::FontWeight;
use crate::text::TextMeasurer;

use super::place_centered;

pub struct PageNumberStamper<'a> {
    config: &'a LayoutConfig,
    measurer: &'a TextMeasurer,
}

impl<'a> PageNumberStamper<'a> {
    pub fn new(config: &'a LayoutConfig, measurer: &'a TextMeasurer) -> Self {
        Self { config, measurer }
    }

    /// Visit every page once, in order, and return how many were stamped.
    ///
    /// The total is read from the backend before the first page is visited, so
    /// the stamper must run after the last page has been opened. It never
    /// opens pages itself.
    pub fn stamp(&self, backend: &mut dyn RenderBackend) -> Result<usize, GenerationError> {
        let total = backend.page_count();
        let (page_width, page_height) = self.config.page_dimensions();
        let y = page_height - self.config.page_number_offset;

        for index in 0..total {
            backend.seek_page(index)?;
            place_centered(
                backend,
                self.measurer,
                &self.config.labels.page_label(index + 1, total),
                page_width / 2.0,
                y,
                self.config.page_number_font_size,
                FontWeight::Regular,
            )?;
        }
        Ok(total)
    }
}
