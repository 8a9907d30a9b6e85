//! Advance widths for the standard PDF fonts, taken from the Adobe AFM files.
//!
//! Widths are in thousandths of an em. Only the printable ASCII range is
//! tabulated; Latin-1 letters with diacritics are measured as their base
//! letter, which is exact for Helvetica's accented glyphs.

/// Helvetica, U+0020..=U+007E.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Helvetica-Bold, U+0020..=U+007E.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

/// Width table for one standard font.
#[derive(Debug, Clone, Copy)]
pub struct StandardFontMetrics {
    /// `None` marks a monospaced font.
    widths: Option<&'static [u16; 95]>,
    default_width: u16,
}

impl StandardFontMetrics {
    pub const HELVETICA: Self = Self {
        widths: Some(&HELVETICA),
        default_width: 556,
    };

    pub const HELVETICA_BOLD: Self = Self {
        widths: Some(&HELVETICA_BOLD),
        default_width: 611,
    };

    pub const COURIER: Self = Self {
        widths: None,
        default_width: 600,
    };

    /// Advance width of `ch` in thousandths of an em.
    pub fn advance(&self, ch: char) -> u16 {
        let Some(table) = self.widths else {
            return self.default_width;
        };
        let ch = fold_latin1(ch);
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) {
            table[(cp - 0x20) as usize]
        } else if ch.is_whitespace() {
            table[0]
        } else {
            self.default_width
        }
    }

    /// Width of one character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        self.advance(ch) as f64 / 1000.0 * font_size
    }

    /// Width of a string in points.
    pub fn measure_string(&self, text: &str, font_size: f64) -> f64 {
        let units: u32 = text.chars().map(|ch| self.advance(ch) as u32).sum();
        units as f64 / 1000.0 * font_size
    }
}

/// Map a Latin-1 letter with a diacritic to its base letter.
fn fold_latin1(ch: char) -> char {
    match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        '\u{00A0}' => ' ',
        _ => ch,
    }
}
