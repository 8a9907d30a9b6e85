//! # PDF Serializer
//!
//! Takes the recorded pages and writes a PDF 1.7 file.
//!
//! This is a from-scratch writer covering the subset a report needs: two
//! standard Type1 fonts, stroked lines, and image XObjects.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (fonts, pages, content streams, etc.)
//! 2 0 obj ... endobj
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Layout coordinates are top-down; PDF user space is bottom-up, so every y is
//! flipped against the page height here and nowhere else.
//!
//! Output is a pure function of the pages and the [`DocumentInfo`]: object
//! numbering follows page and drawing order, and no clock is read.

use std::fmt::Write as FmtWrite;
use std::io::Write as IoWrite;

use chrono::{DateTime, Utc};
use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::backend::{DrawCommand, LayoutPage};
use crate::font::{FontFamily, FontWeight, StandardFont};
use crate::image_loader::{ImagePixelData, JpegColorSpace, LoadedImage};

const PRODUCER: &str = concat!("inspection-report ", env!("CARGO_PKG_VERSION"));

/// Document-level metadata for the Info dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    /// Written as `/CreationDate` only when supplied.
    pub created_at: Option<DateTime<Utc>>,
}

pub struct PdfWriter {
    family: FontFamily,
}

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    /// Index 0 is the unused free-list head; ids are indices.
    objects: Vec<Vec<u8>>,
}

impl PdfBuilder {
    fn reserve(&mut self) -> usize {
        self.objects.push(Vec::new());
        self.objects.len() - 1
    }

    fn push(&mut self, data: Vec<u8>) -> usize {
        self.objects.push(data);
        self.objects.len() - 1
    }

    fn push_stream(&mut self, dict_entries: &str, payload: &[u8]) -> usize {
        let mut data: Vec<u8> = Vec::new();
        let _ = write!(data, "<< {} /Length {} >>\nstream\n", dict_entries, payload.len());
        data.extend_from_slice(payload);
        data.extend_from_slice(b"\nendstream");
        self.push(data)
    }
}

impl PdfWriter {
    pub fn new(family: FontFamily) -> Self {
        Self { family }
    }

    /// Write the pages to a PDF byte vector.
    pub fn write(&self, pages: &[LayoutPage], info: &DocumentInfo) -> Vec<u8> {
        let mut builder = PdfBuilder { objects: Vec::new() };

        // 0 = free-list head, 1 = Catalog, 2 = Pages tree
        builder.reserve();
        let catalog_id = builder.reserve();
        let pages_id = builder.reserve();

        // /F0 regular, /F1 bold
        let font_ids: Vec<usize> = [FontWeight::Regular, FontWeight::Bold]
            .iter()
            .map(|&weight| {
                let font = StandardFont::resolve(self.family, weight);
                builder.push(
                    format!(
                        "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                        font.pdf_name()
                    )
                    .into_bytes(),
                )
            })
            .collect();
        let font_resources = font_ids
            .iter()
            .enumerate()
            .map(|(i, id)| format!("/F{} {} 0 R", i, id))
            .collect::<Vec<_>>()
            .join(" ");

        let mut page_ids: Vec<usize> = Vec::with_capacity(pages.len());
        let mut image_count = 0usize;

        for page in pages {
            let mut xobjects: Vec<(usize, usize)> = Vec::new();
            for command in &page.commands {
                if let DrawCommand::Image { image, .. } = command {
                    let id = Self::write_image_xobject(&mut builder, image);
                    xobjects.push((image_count + xobjects.len(), id));
                }
            }

            let content = self.build_content_stream(page, image_count);
            image_count += xobjects.len();
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);
            let content_id = builder.push_stream("/Filter /FlateDecode", &compressed);

            let mut resources = format!("/Font << {} >>", font_resources);
            if !xobjects.is_empty() {
                let entries = xobjects
                    .iter()
                    .map(|(idx, id)| format!("/Im{} {} 0 R", idx, id))
                    .collect::<Vec<_>>()
                    .join(" ");
                let _ = write!(resources, " /XObject << {} >>", entries);
            }

            let page_id = builder.push(
                format!(
                    "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {:.2} {:.2}] \
                     /Contents {} 0 R /Resources << {} >> >>",
                    pages_id, page.width, page.height, content_id, resources
                )
                .into_bytes(),
            );
            page_ids.push(page_id);
        }

        builder.objects[catalog_id] = format!("<< /Type /Catalog /Pages {} 0 R >>", pages_id).into_bytes();

        let kids = page_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[pages_id] =
            format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, page_ids.len()).into_bytes();

        let info_id = builder.push(Self::info_dict(info).into_bytes());

        self.serialize(&builder, catalog_id, info_id)
    }

    fn info_dict(info: &DocumentInfo) -> String {
        let mut dict = String::from("<< ");
        if let Some(title) = &info.title {
            let _ = write!(dict, "/Title ({}) ", encode_text(title));
        }
        if let Some(author) = &info.author {
            let _ = write!(dict, "/Author ({}) ", encode_text(author));
        }
        if let Some(created_at) = &info.created_at {
            let _ = write!(dict, "/CreationDate ({}) ", format_pdf_date(created_at));
        }
        let _ = write!(dict, "/Producer ({}) >>", escape_pdf_string(PRODUCER));
        dict
    }

    /// Build the PDF content stream for a single page. Images are named
    /// `/Im{first_image + n}` in drawing order.
    fn build_content_stream(&self, page: &LayoutPage, first_image: usize) -> String {
        let mut stream = String::new();
        let page_height = page.height;
        let mut image_index = first_image;

        for command in &page.commands {
            match command {
                DrawCommand::Text {
                    text,
                    x,
                    y,
                    font_size,
                    weight,
                    color,
                } => {
                    let font = match weight {
                        FontWeight::Regular => 0,
                        FontWeight::Bold => 1,
                    };
                    let _ = write!(
                        stream,
                        "BT\n{:.3} {:.3} {:.3} rg\n/F{} {:.1} Tf\n{:.2} {:.2} Td\n({}) Tj\nET\n",
                        color.r,
                        color.g,
                        color.b,
                        font,
                        font_size,
                        x,
                        page_height - y,
                        encode_text(text)
                    );
                }
                DrawCommand::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    width,
                    color,
                } => {
                    let _ = write!(
                        stream,
                        "q\n{:.3} {:.3} {:.3} RG\n{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                        color.r,
                        color.g,
                        color.b,
                        width,
                        x1,
                        page_height - y1,
                        x2,
                        page_height - y2
                    );
                }
                DrawCommand::Image {
                    x,
                    y,
                    width,
                    height,
                    ..
                } => {
                    let _ = write!(
                        stream,
                        "q\n{:.2} 0 0 {:.2} {:.2} {:.2} cm\n/Im{} Do\nQ\n",
                        width,
                        height,
                        x,
                        page_height - y - height,
                        image_index
                    );
                    image_index += 1;
                }
            }
        }

        stream
    }

    /// Write a single image as one or two XObject PDF objects.
    /// Returns the main XObject ID.
    fn write_image_xobject(builder: &mut PdfBuilder, image: &LoadedImage) -> usize {
        match &image.pixel_data {
            ImagePixelData::Jpeg { data, color_space } => {
                let color_space = match color_space {
                    JpegColorSpace::DeviceRGB => "/DeviceRGB",
                    JpegColorSpace::DeviceGray => "/DeviceGray",
                };
                builder.push_stream(
                    &format!(
                        "/Type /XObject /Subtype /Image /Width {} /Height {} \
                         /ColorSpace {} /BitsPerComponent 8 /Filter /DCTDecode",
                        image.width_px, image.height_px, color_space
                    ),
                    data,
                )
            }

            ImagePixelData::Decoded { rgb, alpha } => {
                let smask_ref = alpha
                    .as_ref()
                    .map(|alpha| {
                        let id = builder.push_stream(
                            &format!(
                                "/Type /XObject /Subtype /Image /Width {} /Height {} \
                                 /ColorSpace /DeviceGray /BitsPerComponent 8 /Filter /FlateDecode",
                                image.width_px, image.height_px
                            ),
                            &compress_to_vec_zlib(alpha, 6),
                        );
                        format!(" /SMask {} 0 R", id)
                    })
                    .unwrap_or_default();

                builder.push_stream(
                    &format!(
                        "/Type /XObject /Subtype /Image /Width {} /Height {} \
                         /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /FlateDecode{}",
                        image.width_px, image.height_px, smask_ref
                    ),
                    &compress_to_vec_zlib(rgb, 6),
                )
            }
        }
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, root_id: usize, info_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, data) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let _ = write!(output, "{} 0 obj\n", i);
            output.extend_from_slice(data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            root_id,
            info_id,
            xref_offset
        );

        output
    }
}

/// `D:YYYYMMDDHHmmSSZ`
fn format_pdf_date(at: &DateTime<Utc>) -> String {
    at.format("D:%Y%m%d%H%M%SZ").to_string()
}

/// Escape special characters in a PDF string.
fn escape_pdf_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('(', "\\(").replace(')', "\\)")
}

/// Encode text as a WinAnsi literal string body. Whitespace the encoding
/// lacks (tabs, for one) is written as a space, matching how it is measured.
/// Other characters outside the encoding become `?`; bytes outside printable
/// ASCII are octal-escaped.
fn encode_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        let b = match unicode_to_winansi(ch) {
            Some(b) => b,
            None if ch.is_whitespace() => b' ',
            None => b'?',
        };
        match b {
            b'\\' => out.push_str("\\\\"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            0x20..=0x7E => out.push(b as char),
            _ => {
                let _ = write!(out, "\\{:03o}", b);
            }
        }
    }
    out
}

/// Map a Unicode codepoint to a WinAnsiEncoding byte value.
///
/// WinAnsiEncoding is based on Windows-1252. Most codepoints in
/// 0x20..=0x7E and 0xA0..=0xFF map directly. The 0x80..=0x9F range
/// contains special mappings for smart quotes, bullets, dashes, etc.
fn unicode_to_winansi(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    match cp {
        0x20AC => Some(0x80),
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85),
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95),
        0x2013 => Some(0x96),
        0x2014 => Some(0x97),
        0x02DC => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}
