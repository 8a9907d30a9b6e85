//! Section headers, the document heading, and free-text paragraphs.

use crate::backend::RenderBackend;
use crate::config::LayoutConfig;
use crate::error::GenerationError;
use crate::font::FontWeight;
use crate::text::TextMeasurer;

use super::{place_centered, PageFlowCursor};

/// Draws titled section headers so every section has the same rhythm.
pub struct SectionRenderer<'a> {
    config: &'a LayoutConfig,
    measurer: &'a TextMeasurer,
}

impl<'a> SectionRenderer<'a> {
    pub fn new(config: &'a LayoutConfig, measurer: &'a TextMeasurer) -> Self {
        Self { config, measurer }
    }

    /// The document title, bold and centered on the page.
    pub fn render_heading(
        &self,
        cursor: &mut PageFlowCursor,
        backend: &mut dyn RenderBackend,
        title: &str,
    ) -> Result<(), GenerationError> {
        cursor.reserve(self.config.heading_advance, backend)?;
        place_centered(
            backend,
            self.measurer,
            title,
            cursor.page_width() / 2.0,
            cursor.y(),
            self.config.heading_font_size,
            FontWeight::Bold,
        )?;
        cursor.advance(self.config.heading_advance);
        Ok(())
    }

    /// Title text followed by a full-width rule. Titles are never wrapped.
    pub fn render_title(
        &self,
        cursor: &mut PageFlowCursor,
        backend: &mut dyn RenderBackend,
        title: &str,
    ) -> Result<(), GenerationError> {
        let c = self.config;
        cursor.reserve(c.section_title_block, backend)?;
        backend.place_text(
            title,
            cursor.left(),
            cursor.y(),
            c.section_title_font_size,
            FontWeight::Bold,
        )?;
        cursor.advance(c.section_title_advance);

        let y = cursor.y();
        backend.draw_line(
            cursor.left(),
            y,
            cursor.left() + cursor.content_width(),
            y,
            0.5,
            c.rule_color,
        )?;
        cursor.advance(c.section_rule_gap);
        Ok(())
    }

    /// Body text at full content width.
    ///
    /// Each wrapped line reserves its own height, so a long paragraph carries
    /// on to the next page instead of running past the bottom margin.
    pub fn render_paragraph(
        &self,
        cursor: &mut PageFlowCursor,
        backend: &mut dyn RenderBackend,
        text: &str,
    ) -> Result<(), GenerationError> {
        let size = self.config.body_font_size;
        let lines = self
            .measurer
            .wrap(text, cursor.content_width(), size, FontWeight::Regular)?;
        let line_height = self.measurer.measure_height(1, size);

        for line in &lines {
            cursor.reserve(line_height, backend)?;
            if !line.is_empty() {
                backend.place_text(line, cursor.left(), cursor.y(), size, FontWeight::Regular)?;
            }
            cursor.advance(line_height);
        }
        Ok(())
    }
}
