//! The page flow cursor: where the next unit goes, and when a page must break.

use log::debug;

use crate::backend::RenderBackend;
use crate::config::{Edges, LayoutConfig};
use crate::error::BackendError;

/// Tolerance for "the cursor has not moved since the page opened".
const EPSILON: f64 = 1e-6;

/// Tracks the vertical write position on the active page.
///
/// One cursor belongs to one generation. Pages are opened through the backend
/// the cursor is handed, so the cursor's page index always matches the
/// backend's active page while content is being laid out.
#[derive(Debug, Clone)]
pub struct PageFlowCursor {
    y: f64,
    margin: Edges,
    page_width: f64,
    page_height: f64,
    page_index: usize,
}

impl PageFlowCursor {
    /// Open the first page and place the cursor at its top margin.
    pub fn open(config: &LayoutConfig, backend: &mut dyn RenderBackend) -> Result<Self, BackendError> {
        let (page_width, page_height) = config.page_dimensions();
        let page_index = backend.start_new_page()?;
        Ok(Self {
            y: config.margin.top,
            margin: config.margin,
            page_width,
            page_height,
            page_index,
        })
    }

    /// Make room for a unit of known `height`.
    ///
    /// Breaks to a new page when the unit would cross the bottom margin and
    /// returns whether it did. A unit taller than a whole page breaks at most
    /// once and then overflows into the margin.
    ///
    /// On a page nothing has been placed on yet, reserve never breaks, even
    /// for an oversized unit, so no empty page is left behind. The report
    /// flow never hits this case, since every fresh page starts with a
    /// section title.
    pub fn reserve(&mut self, height: f64, backend: &mut dyn RenderBackend) -> Result<bool, BackendError> {
        if self.y + height <= self.bottom_limit() {
            return Ok(false);
        }
        if self.at_page_top() {
            debug!(
                "unit of {:.2}pt exceeds usable page height {:.2}pt, overflowing page {}",
                height,
                self.usable_height(),
                self.page_index
            );
            return Ok(false);
        }
        debug!(
            "page break before {:.2}pt unit at y={:.2} on page {}",
            height, self.y, self.page_index
        );
        self.start_page(backend)?;
        Ok(true)
    }

    /// Move down past content that has just been drawn.
    pub fn advance(&mut self, height: f64) {
        self.y += height;
    }

    /// Unconditionally start a new page, regardless of remaining space.
    pub fn new_page(&mut self, backend: &mut dyn RenderBackend) -> Result<(), BackendError> {
        debug!("forced page break after page {}", self.page_index);
        self.start_page(backend)
    }

    fn start_page(&mut self, backend: &mut dyn RenderBackend) -> Result<(), BackendError> {
        self.page_index = backend.start_new_page()?;
        self.y = self.margin.top;
        Ok(())
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Left edge of the content area.
    pub fn left(&self) -> f64 {
        self.margin.left
    }

    pub fn content_width(&self) -> f64 {
        self.page_width - self.margin.horizontal()
    }

    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    /// The lowest y content may reach.
    pub fn bottom_limit(&self) -> f64 {
        self.page_height - self.margin.bottom
    }

    pub fn usable_height(&self) -> f64 {
        self.page_height - self.margin.vertical()
    }

    pub fn remaining_height(&self) -> f64 {
        (self.bottom_limit() - self.y).max(0.0)
    }

    pub fn at_page_top(&self) -> bool {
        (self.y - self.margin.top).abs() < EPSILON
    }
}
