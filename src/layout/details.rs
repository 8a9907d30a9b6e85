//! Label/value rows for the inspection metadata.

use crate::backend::RenderBackend;
use crate::config::LayoutConfig;
use crate::error::GenerationError;
use crate::font::FontWeight;
use crate::model::DetailField;
use crate::text::TextMeasurer;

use super::{place_lines, PageFlowCursor};

pub struct DetailListRenderer<'a> {
    config: &'a LayoutConfig,
    measurer: &'a TextMeasurer,
}

impl<'a> DetailListRenderer<'a> {
    pub fn new(config: &'a LayoutConfig, measurer: &'a TextMeasurer) -> Self {
        Self { config, measurer }
    }

    /// Draw every field in order. Each row is kept whole on one page.
    pub fn render(
        &self,
        cursor: &mut PageFlowCursor,
        backend: &mut dyn RenderBackend,
        fields: &[DetailField],
    ) -> Result<(), GenerationError> {
        for field in fields {
            self.render_row(cursor, backend, field)?;
        }
        Ok(())
    }

    fn render_row(
        &self,
        cursor: &mut PageFlowCursor,
        backend: &mut dyn RenderBackend,
        field: &DetailField,
    ) -> Result<(), GenerationError> {
        let c = self.config;
        let size = c.body_font_size;
        let value = if field.value.trim().is_empty() {
            c.labels.not_provided.as_str()
        } else {
            field.value.as_str()
        };

        let value_width = cursor.content_width() - c.detail_label_width;
        let lines = self.measurer.wrap(value, value_width, size, FontWeight::Regular)?;
        let row_height = self.measurer.measure_height(lines.len(), size) + c.detail_row_gap;

        cursor.reserve(row_height, backend)?;
        backend.place_text(
            &format!("{}:", field.label),
            cursor.left(),
            cursor.y(),
            size,
            FontWeight::Bold,
        )?;
        place_lines(
            backend,
            self.measurer,
            &lines,
            cursor.left() + c.detail_label_width,
            cursor.y(),
            size,
            FontWeight::Regular,
        )?;
        cursor.advance(row_height);
        Ok(())
    }
}
