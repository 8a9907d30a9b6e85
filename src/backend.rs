//! # Rendering Backend
//!
//! The primitive drawing surface the layout renderers write to: text runs,
//! image regions, lines, and page management. All coordinates are in points
//! with the origin at the top-left corner of the page and y growing down;
//! text is positioned by its baseline.
//!
//! [`PageRecorder`] is the in-memory implementation. It keeps every page as an
//! append-only list of [`DrawCommand`]s, which the PDF writer serializes and
//! tests inspect directly.

use std::sync::Arc;

use crate::config::Color;
use crate::error::BackendError;
use crate::font::FontWeight;
use crate::image_loader::LoadedImage;

/// One primitive placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A single line of text; `y` is the baseline.
    Text {
        text: String,
        x: f64,
        y: f64,
        font_size: f64,
        weight: FontWeight,
        color: Color,
    },
    /// An image scaled into the region whose top-left corner is `(x, y)`.
    Image {
        image: Arc<LoadedImage>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// A straight stroked line.
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        color: Color,
    },
}

/// A page and everything drawn on it, in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPage {
    pub index: usize,
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

impl LayoutPage {
    /// The text of every text run on the page, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }
}

/// The drawing surface consumed by the layout engine.
///
/// Draw calls go to the active page. `start_new_page` appends a page and makes
/// it active; `seek_page` re-activates an existing page so a post-pass can
/// add to it.
pub trait RenderBackend {
    fn place_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font_size: f64,
        weight: FontWeight,
    ) -> Result<(), BackendError>;

    fn place_image(
        &mut self,
        image: &Arc<LoadedImage>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), BackendError>;

    fn draw_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        color: Color,
    ) -> Result<(), BackendError>;

    /// Append a new page, make it active and return its index.
    fn start_new_page(&mut self) -> Result<usize, BackendError>;

    fn page_count(&self) -> usize;

    fn seek_page(&mut self, index: usize) -> Result<(), BackendError>;
}

/// In-memory backend recording each page's draw commands.
#[derive(Debug, Clone)]
pub struct PageRecorder {
    width: f64,
    height: f64,
    pages: Vec<LayoutPage>,
    active: Option<usize>,
}

impl PageRecorder {
    /// A recorder producing pages of the given size in points.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pages: Vec::new(),
            active: None,
        }
    }

    pub fn pages(&self) -> &[LayoutPage] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<LayoutPage> {
        self.pages
    }

    fn active_page(&mut self) -> Result<&mut LayoutPage, BackendError> {
        let index = self.active.ok_or(BackendError::NoActivePage)?;
        Ok(&mut self.pages[index])
    }

    fn push(&mut self, command: DrawCommand) -> Result<(), BackendError> {
        self.active_page()?.commands.push(command);
        Ok(())
    }
}

impl RenderBackend for PageRecorder {
    fn place_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font_size: f64,
        weight: FontWeight,
    ) -> Result<(), BackendError> {
        self.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            font_size,
            weight,
            color: Color::BLACK,
        })
    }

    fn place_image(
        &mut self,
        image: &Arc<LoadedImage>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), BackendError> {
        self.push(DrawCommand::Image {
            image: Arc::clone(image),
            x,
            y,
            width,
            height,
        })
    }

    fn draw_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        color: Color,
    ) -> Result<(), BackendError> {
        self.push(DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            width,
            color,
        })
    }

    fn start_new_page(&mut self) -> Result<usize, BackendError> {
        let index = self.pages.len();
        self.pages.push(LayoutPage {
            index,
            width: self.width,
            height: self.height,
            commands: Vec::new(),
        });
        self.active = Some(index);
        Ok(index)
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn seek_page(&mut self, index: usize) -> Result<(), BackendError> {
        if index >= self.pages.len() {
            return Err(BackendError::PageOutOfRange {
                index,
                count: self.pages.len(),
            });
        }
        self.active = Some(index);
        Ok(())
    }
}
