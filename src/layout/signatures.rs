//! The three-column signature block.

use std::sync::Arc;

use log::warn;

use crate::backend::RenderBackend;
use crate::config::LayoutConfig;
use crate::error::GenerationError;
use crate::font::FontWeight;
use crate::image_loader::{ImageDecoder, LoadedImage};
use crate::model::SignatureSlot;
use crate::text::TextMeasurer;

use super::{place_centered, PageFlowCursor};

pub struct SignatureRowRenderer<'a> {
    config: &'a LayoutConfig,
    measurer: &'a TextMeasurer,
    decoder: &'a dyn ImageDecoder,
}

impl<'a> SignatureRowRenderer<'a> {
    pub fn new(config: &'a LayoutConfig, measurer: &'a TextMeasurer, decoder: &'a dyn ImageDecoder) -> Self {
        Self {
            config,
            measurer,
            decoder,
        }
    }

    /// Distance from the row top to the role caption baseline.
    pub fn row_height(&self) -> f64 {
        let c = self.config;
        c.signature_rule_offset + c.signer_name_gap + c.signer_role_gap
    }

    /// Draw the three slots side by side. Every column is positioned from the
    /// same row start, so the columns line up whatever each one contains.
    pub fn render(
        &self,
        cursor: &mut PageFlowCursor,
        backend: &mut dyn RenderBackend,
        slots: &[SignatureSlot; 3],
    ) -> Result<(), GenerationError> {
        let row_height = self.row_height();
        cursor.reserve(row_height, backend)?;
        let row_y = cursor.y();
        let column_width = cursor.content_width() / slots.len() as f64;

        for (i, slot) in slots.iter().enumerate() {
            let x = cursor.left() + i as f64 * column_width;
            self.render_column(backend, slot, x, row_y, column_width)?;
        }

        cursor.advance(row_height);
        Ok(())
    }

    fn render_column(
        &self,
        backend: &mut dyn RenderBackend,
        slot: &SignatureSlot,
        x: f64,
        row_y: f64,
        width: f64,
    ) -> Result<(), GenerationError> {
        let c = self.config;
        let center = x + width / 2.0;
        let body = c.body_font_size;

        let placeholder = match &slot.image {
            None => Some(c.labels.unsigned.as_str()),
            Some(image_ref) => match self
                .decoder
                .decode(image_ref)
                .and_then(LoadedImage::non_empty)
            {
                Ok(image) => {
                    let box_x = x + c.signature_box_inset;
                    let box_w = width - 2.0 * c.signature_box_inset;
                    let (w, h) = fit_into(&image, box_w, c.signature_box_height);
                    let image = Arc::new(image);
                    backend.place_image(
                        &image,
                        box_x + (box_w - w) / 2.0,
                        row_y + (c.signature_box_height - h) / 2.0,
                        w,
                        h,
                    )?;
                    None
                }
                Err(e) => {
                    warn!("{:?} signature substituted by placeholder: {}", slot.role, e);
                    Some(c.labels.signature_failed.as_str())
                }
            },
        };
        if let Some(text) = placeholder {
            place_centered(
                backend,
                self.measurer,
                text,
                center,
                row_y + c.signature_placeholder_offset,
                body,
                FontWeight::Regular,
            )?;
        }

        let rule_y = row_y + c.signature_rule_offset;
        backend.draw_line(
            x + c.signature_rule_inset,
            rule_y,
            x + width - c.signature_rule_inset,
            rule_y,
            0.5,
            c.signature_rule_color,
        )?;

        let name = if slot.signer_name.trim().is_empty() {
            c.labels.not_provided.as_str()
        } else {
            slot.signer_name.as_str()
        };
        let name_y = rule_y + c.signer_name_gap;
        place_centered(
            backend,
            self.measurer,
            name,
            center,
            name_y,
            c.signer_name_font_size,
            FontWeight::Bold,
        )?;
        place_centered(
            backend,
            self.measurer,
            &slot.role_title,
            center,
            name_y + c.signer_role_gap,
            c.signer_role_font_size,
            FontWeight::Regular,
        )?;
        Ok(())
    }
}

/// Largest size with the image's aspect ratio that fits the box.
fn fit_into(image: &LoadedImage, box_width: f64, box_height: f64) -> (f64, f64) {
    let aspect = image.aspect_ratio();
    if box_height * aspect <= box_width {
        (box_height * aspect, box_height)
    } else {
        (box_width, box_width / aspect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DrawCommand, PageRecorder};
    use crate::error::ImageError;
    use crate::image_loader::ImagePixelData;
    use crate::model::{ImageRef, SignatureRole};

    struct FixedDecoder;

    impl ImageDecoder for FixedDecoder {
        fn decode(&self, image: &ImageRef) -> Result<LoadedImage, ImageError> {
            let (width_px, height_px) = match image.src.as_str() {
                "broken" => return Err(ImageError::TooShort),
                "flat" => (200, 0),
                _ => (200, 100),
            };
            Ok(LoadedImage {
                pixel_data: ImagePixelData::Decoded {
                    rgb: Vec::new(),
                    alpha: None,
                },
                width_px,
                height_px,
            })
        }
    }

    fn slots() -> [SignatureSlot; 3] {
        [
            SignatureSlot::unsigned(SignatureRole::Inspector, "Ana Souza", "Inspector"),
            SignatureSlot::unsigned(SignatureRole::Landlord, "", "Landlord"),
            SignatureSlot::unsigned(SignatureRole::Tenant, "Bruno Lima", "Tenant"),
        ]
    }

    fn render(slots: &[SignatureSlot; 3]) -> (PageRecorder, PageFlowCursor) {
        let config = LayoutConfig::default();
        let measurer = TextMeasurer::default();
        let (w, h) = config.page_dimensions();
        let mut recorder = PageRecorder::new(w, h);
        let mut cursor = PageFlowCursor::open(&config, &mut recorder).unwrap();
        SignatureRowRenderer::new(&config, &measurer, &FixedDecoder)
            .render(&mut cursor, &mut recorder, slots)
            .unwrap();
        (recorder, cursor)
    }

    #[test]
    fn unsigned_slots_show_placeholder() {
        let (recorder, cursor) = render(&slots());
        let page = &recorder.pages()[0];
        assert_eq!(page.texts().filter(|t| *t == "[unsigned]").count(), 3);
        assert!(page.contains_text("not provided"), "empty signer name");
        assert_eq!(cursor.y(), 40.0 + 85.0);
    }

    #[test]
    fn columns_share_row_start() {
        let (recorder, _) = render(&slots());
        let rules: Vec<_> = recorder.pages()[0]
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { x1, y1, x2, .. } => Some((*x1, *y1, *x2)),
                _ => None,
            })
            .collect();
        assert_eq!(rules.len(), 3);
        let w = 515.28 / 3.0;
        for (i, (x1, y1, x2)) in rules.iter().enumerate() {
            assert_eq!(*y1, 100.0);
            assert!((x1 - (40.0 + i as f64 * w + 5.0)).abs() < 1e-9);
            assert!((x2 - (40.0 + (i + 1) as f64 * w - 5.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn wide_image_is_width_limited() {
        let image = LoadedImage {
            pixel_data: ImagePixelData::Decoded {
                rgb: Vec::new(),
                alpha: None,
            },
            width_px: 800,
            height_px: 100,
        };
        assert_eq!(fit_into(&image, 100.0, 50.0), (100.0, 12.5));
    }

    #[test]
    fn signature_image_fits_box() {
        let mut slots = slots();
        slots[0].image = Some(ImageRef::new("sig"));
        slots[1].image = Some(ImageRef::new("broken"));
        let (recorder, _) = render(&slots);
        let page = &recorder.pages()[0];
        assert!(page.contains_text("signature failed to load"));
        assert_eq!(page.texts().filter(|t| *t == "[unsigned]").count(), 1);

        let (x, y, w, h) = page
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Image { x, y, width, height, .. } => Some((*x, *y, *width, *height)),
                _ => None,
            })
            .unwrap();
        // 2:1 into a 50pt-high box is height-limited
        assert_eq!((w, h), (100.0, 50.0));
        assert_eq!(y, 40.0);
        let box_w = 515.28 / 3.0 - 20.0;
        assert!((x - (50.0 + (box_w - 100.0) / 2.0)).abs() < 1e-9);

        // Names and roles stay on shared baselines whatever each column holds.
        let baseline = |wanted: &str| {
            page.commands
                .iter()
                .find_map(|c| match c {
                    DrawCommand::Text { text, y, .. } if text == wanted => Some(*y),
                    _ => None,
                })
                .unwrap()
        };
        for name in ["Ana Souza", "not provided", "Bruno Lima"] {
            assert_eq!(baseline(name), 115.0, "{}", name);
        }
        for role in ["Inspector", "Landlord", "Tenant"] {
            assert_eq!(baseline(role), 125.0, "{}", role);
        }
    }

    #[test]
    fn zero_height_signature_counts_as_failed() {
        let mut slots = slots();
        slots[2].image = Some(ImageRef::new("flat"));
        let (recorder, _) = render(&slots);
        let page = &recorder.pages()[0];
        assert!(page.contains_text("signature failed to load"));
        assert!(!page.commands.iter().any(|c| matches!(c, DrawCommand::Image { .. })));
    }
}
