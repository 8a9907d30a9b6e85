//! # Fonts
//!
//! The engine is bound to one standard PDF font family with exactly two
//! weights. Standard fonts are referenced by name and never embedded, so the
//! only font data we carry is the width tables in [`metrics`].

pub mod metrics;

pub use metrics::StandardFontMetrics;
use serde::{Deserialize, Serialize};

/// The font family the whole document is set in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    Helvetica,
    Courier,
}

/// The two weights the measurer and the backend understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// A concrete standard PDF font: one family at one weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    Courier,
    CourierBold,
}

impl StandardFont {
    pub fn resolve(family: FontFamily, weight: FontWeight) -> Self {
        match (family, weight) {
            (FontFamily::Helvetica, FontWeight::Regular) => Self::Helvetica,
            (FontFamily::Helvetica, FontWeight::Bold) => Self::HelveticaBold,
            (FontFamily::Courier, FontWeight::Regular) => Self::Courier,
            (FontFamily::Courier, FontWeight::Bold) => Self::CourierBold,
        }
    }

    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
        }
    }

    pub fn metrics(&self) -> StandardFontMetrics {
        match self {
            Self::Helvetica => StandardFontMetrics::HELVETICA,
            Self::HelveticaBold => StandardFontMetrics::HELVETICA_BOLD,
            Self::Courier | Self::CourierBold => StandardFontMetrics::COURIER,
        }
    }
}
