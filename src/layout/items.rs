//! Photographed items: ordinal label, photo and description, laid out as one
//! atomic unit.

use std::sync::Arc;

use log::warn;

use crate::backend::RenderBackend;
use crate::config::LayoutConfig;
use crate::error::GenerationError;
use crate::font::FontWeight;
use crate::image_loader::{ImageDecoder, LoadedImage};
use crate::model::InspectionItem;
use crate::text::TextMeasurer;

use super::{place_lines, PageFlowCursor};

/// Where an item ended up.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPlacement {
    pub ordinal: u32,
    /// The page the item's label was drawn on.
    pub page_index: usize,
    /// Whether reserving the item started a new page.
    pub broke_before: bool,
    /// Height reserved for the item before drawing.
    pub reserved_height: f64,
    /// Drawn image size, or `None` when the placeholder line was used.
    pub image_size: Option<(f64, f64)>,
}

/// Scale an image to `target_height`, keeping its aspect ratio, and clamp the
/// width to the content width.
pub fn scaled_image_size(image: &LoadedImage, target_height: f64, content_width: f64) -> (f64, f64) {
    let width = (target_height * image.aspect_ratio()).min(content_width);
    (width, target_height)
}

pub struct ItemRenderer<'a> {
    config: &'a LayoutConfig,
    measurer: &'a TextMeasurer,
    decoder: &'a dyn ImageDecoder,
}

impl<'a> ItemRenderer<'a> {
    pub fn new(config: &'a LayoutConfig, measurer: &'a TextMeasurer, decoder: &'a dyn ImageDecoder) -> Self {
        Self {
            config,
            measurer,
            decoder,
        }
    }

    /// Draw every item in order, or the "no items" line when there are none.
    ///
    /// Item `n + 1` is not measured until item `n` has been fully drawn.
    pub fn render_all(
        &self,
        cursor: &mut PageFlowCursor,
        backend: &mut dyn RenderBackend,
        items: &[InspectionItem],
    ) -> Result<Vec<ItemPlacement>, GenerationError> {
        if items.is_empty() {
            let size = self.config.body_font_size;
            let line_height = self.measurer.measure_height(1, size);
            cursor.reserve(line_height, backend)?;
            backend.place_text(
                &self.config.labels.no_items,
                cursor.left(),
                cursor.y(),
                size,
                FontWeight::Regular,
            )?;
            cursor.advance(line_height);
            return Ok(Vec::new());
        }

        items
            .iter()
            .map(|item| self.render_item(cursor, backend, item))
            .collect()
    }

    /// Draw one item. The single `reserve` call is the only place a page
    /// break can happen for it.
    pub fn render_item(
        &self,
        cursor: &mut PageFlowCursor,
        backend: &mut dyn RenderBackend,
        item: &InspectionItem,
    ) -> Result<ItemPlacement, GenerationError> {
        let c = self.config;
        let size = c.body_font_size;
        let lines = self
            .measurer
            .wrap(&item.description, cursor.content_width(), size, FontWeight::Regular)?;
        let text_height = self.measurer.measure_height(lines.len(), size);

        let image = match self.decoder.decode(&item.image).and_then(LoadedImage::non_empty) {
            Ok(image) => Some(Arc::new(image)),
            Err(e) => {
                warn!("item {}: image substituted by placeholder: {}", item.ordinal, e);
                None
            }
        };

        let item_height = c.image_height + text_height + c.item_margin;
        let broke_before = cursor.reserve(item_height, backend)?;
        let page_index = cursor.page_index();

        backend.place_text(
            &c.labels.item_label(item.ordinal),
            cursor.left(),
            cursor.y(),
            c.item_label_font_size,
            FontWeight::Bold,
        )?;
        cursor.advance(c.item_label_advance);

        let image_size = match &image {
            Some(image) => {
                let (width, height) = scaled_image_size(image, c.image_height, cursor.content_width());
                backend.place_image(image, cursor.left(), cursor.y(), width, height)?;
                cursor.advance(height + c.image_gap);
                Some((width, height))
            }
            None => {
                backend.place_text(
                    &c.labels.image_failed,
                    cursor.left(),
                    cursor.y(),
                    size,
                    FontWeight::Regular,
                )?;
                cursor.advance(c.failed_image_advance);
                None
            }
        };

        place_lines(
            backend,
            self.measurer,
            &lines,
            cursor.left(),
            cursor.y(),
            size,
            FontWeight::Regular,
        )?;
        cursor.advance(text_height + c.item_gap);

        Ok(ItemPlacement {
            ordinal: item.ordinal,
            page_index,
            broke_before,
            reserved_height: item_height,
            image_size,
        })
    }
}
