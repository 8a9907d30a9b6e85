//! # Text Measurement and Wrapping
//!
//! Greedy line breaking at UAX#14 break opportunities, measured with the
//! standard font width tables. No kerning, no justification, no hyphenation.

use crate::error::MeasureError;
use crate::font::{FontFamily, FontWeight, StandardFont};
use unicode_linebreak::{linebreaks, BreakOpportunity};

/// Fixed line-height factor applied to every wrapped block.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

const NEWLINES: &[char] = &['\n', '\r', '\u{000B}', '\u{000C}', '\u{0085}', '\u{2028}', '\u{2029}'];

/// Measures and wraps text set in one font family.
#[derive(Debug, Clone, Copy)]
pub struct TextMeasurer {
    family: FontFamily,
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self::new(FontFamily::default())
    }
}

impl TextMeasurer {
    pub fn new(family: FontFamily) -> Self {
        Self { family }
    }

    pub fn family(&self) -> FontFamily {
        self.family
    }

    /// Width of `text` on a single line, in points.
    pub fn measure_width(&self, text: &str, font_size: f64, weight: FontWeight) -> f64 {
        StandardFont::resolve(self.family, weight)
            .metrics()
            .measure_string(text, font_size)
    }

    /// Height of a block of `line_count` lines.
    pub fn measure_height(&self, line_count: usize, font_size: f64) -> f64 {
        line_count as f64 * font_size * LINE_HEIGHT_FACTOR
    }

    /// Break `text` into lines no wider than `max_width`.
    ///
    /// Empty or whitespace-only text produces no lines at all. Explicit
    /// newlines are honored, so blank lines inside the text survive as empty
    /// strings. A word wider than `max_width` on its own is split between
    /// characters.
    pub fn wrap(
        &self,
        text: &str,
        max_width: f64,
        font_size: f64,
        weight: FontWeight,
    ) -> Result<Vec<String>, MeasureError> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(MeasureError::FontSize(font_size));
        }
        if !max_width.is_finite() || max_width <= 0.0 {
            return Err(MeasureError::Width(max_width));
        }
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let width = |s: &str| self.measure_width(s, font_size, weight);
        let mut lines = Vec::new();
        let mut line = String::new();
        let mut line_width = 0.0;
        let mut start = 0;

        for (end, opportunity) in linebreaks(text) {
            // A segment is a word plus its trailing spaces (and newline, if
            // the break after it is mandatory).
            let segment = text[start..end].trim_end_matches(NEWLINES);
            start = end;
            let word = segment.trim_end();
            let word_width = width(word);

            if !line.is_empty() && line_width + word_width > max_width {
                // Leading indentation alone never makes a line of its own.
                if !line.trim().is_empty() {
                    lines.push(line.trim_end().to_string());
                }
                line.clear();
                line_width = 0.0;
            }

            if line.is_empty() && word_width > max_width {
                let mut pieces = split_word(word, max_width, &width);
                line = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
                line.push_str(&segment[word.len()..]);
                line_width = width(&line);
            } else {
                line.push_str(segment);
                line_width += width(segment);
            }

            if opportunity == BreakOpportunity::Mandatory {
                lines.push(line.trim_end().to_string());
                line.clear();
                line_width = 0.0;
            }
        }

        if !line.trim_end().is_empty() {
            lines.push(line.trim_end().to_string());
        }

        // The end of text always reports a mandatory break; drop blank lines
        // that only came from trailing newlines.
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        Ok(lines)
    }
}

/// Split one oversized word into pieces that each fit `max_width`.
fn split_word(word: &str, max_width: f64, width: &impl Fn(&str) -> f64) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for ch in word.chars() {
        piece.push(ch);
        if width(&piece) > max_width && piece.chars().count() > 1 {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
