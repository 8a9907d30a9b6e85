//! Orchestrates a whole report: sections in order, forced breaks before the
//! items and signatures, page numbers last.

use log::info;

use crate::backend::RenderBackend;
use crate::config::LayoutConfig;
use crate::error::GenerationError;
use crate::image_loader::ImageDecoder;
use crate::model::ReportModel;
use crate::text::TextMeasurer;

use super::{
    DetailListRenderer, ItemPlacement, ItemRenderer, PageFlowCursor, PageNumberStamper, SectionRenderer,
    SignatureRowRenderer,
};

/// What a finished layout produced.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSummary {
    pub page_count: usize,
    pub stamped_pages: usize,
    /// One entry per item, in input order.
    pub items: Vec<ItemPlacement>,
}

pub struct DocumentBuilder<'a> {
    config: &'a LayoutConfig,
    measurer: TextMeasurer,
    decoder: &'a dyn ImageDecoder,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(config: &'a LayoutConfig, decoder: &'a dyn ImageDecoder) -> Self {
        Self {
            config,
            measurer: TextMeasurer::new(config.font_family),
            decoder,
        }
    }

    /// Lay out `report` onto `backend`, starting from an empty backend.
    ///
    /// Page order: heading, details, observations (when non-blank) and
    /// summary flow from the first page; the items section and the signature
    /// section each begin on a page of their own.
    pub fn build(
        &self,
        report: &ReportModel,
        backend: &mut dyn RenderBackend,
    ) -> Result<LayoutSummary, GenerationError> {
        let c = self.config;
        let labels = &c.labels;
        let sections = SectionRenderer::new(c, &self.measurer);

        let mut cursor = PageFlowCursor::open(c, backend)?;
        sections.render_heading(&mut cursor, backend, &report.title)?;

        sections.render_title(&mut cursor, backend, &labels.details_section)?;
        DetailListRenderer::new(c, &self.measurer).render(&mut cursor, backend, &report.details)?;
        cursor.advance(c.section_gap);

        if let Some(observations) = report.observations.as_deref().filter(|o| !o.trim().is_empty()) {
            sections.render_title(&mut cursor, backend, &labels.observations_section)?;
            sections.render_paragraph(&mut cursor, backend, observations)?;
            cursor.advance(c.section_gap);
        }

        sections.render_title(&mut cursor, backend, &labels.summary_section)?;
        sections.render_paragraph(&mut cursor, backend, &report.summary)?;
        cursor.advance(c.section_gap);

        cursor.new_page(backend)?;
        sections.render_title(&mut cursor, backend, &labels.items_section)?;
        let items = ItemRenderer::new(c, &self.measurer, self.decoder).render_all(&mut cursor, backend, &report.items)?;

        cursor.new_page(backend)?;
        sections.render_title(&mut cursor, backend, &labels.signatures_section)?;
        SignatureRowRenderer::new(c, &self.measurer, self.decoder).render(&mut cursor, backend, &report.signatures)?;

        let stamped_pages = PageNumberStamper::new(c, &self.measurer).stamp(backend)?;
        let page_count = backend.page_count();
        info!(
            "laid out \"{}\": {} items on {} pages",
            report.title,
            items.len(),
            page_count
        );

        Ok(LayoutSummary {
            page_count,
            stamped_pages,
            items,
        })
    }
}
