//! # Layout Configuration
//!
//! Page geometry, type sizes, spacing constants and every literal string the
//! engine draws. All fields default, so a config file only needs to name the
//! values it changes:
//!
//! ```json
//! { "pageSize": "Letter", "imageHeight": 180, "labels": { "unsigned": "[pending]" } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::font::FontFamily;

/// Standard page sizes in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Custom {
        width: f64,
        height: f64,
    },
}

impl PageSize {
    /// Returns (width, height) in points.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::A5 => (419.53, 595.28),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Edge values (top, right, bottom, left) used for page margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Edges {
    fn default() -> Self {
        Self::uniform(40.0)
    }
}

impl Edges {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::gray(0.0);

    pub const fn gray(level: f64) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
        }
    }
}

/// Every literal string drawn into a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Labels {
    pub report_title: String,
    pub initial: String,
    #[serde(rename = "final")]
    pub final_: String,
    pub details_section: String,
    pub observations_section: String,
    pub summary_section: String,
    pub items_section: String,
    pub signatures_section: String,
    pub inspector: String,
    pub landlord: String,
    pub tenant: String,
    pub address: String,
    pub date: String,
    pub geolocation: String,
    pub inspector_role: String,
    pub landlord_role: String,
    pub tenant_role: String,
    /// `{n}` is replaced by the item ordinal.
    pub item: String,
    pub not_provided: String,
    pub not_available: String,
    pub image_failed: String,
    pub signature_failed: String,
    pub unsigned: String,
    pub no_items: String,
    pub no_summary_items: String,
    /// `{page}` and `{total}` are replaced by the stamper.
    pub page_number: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self::english()
    }
}

impl Labels {
    pub fn english() -> Self {
        Self {
            report_title: "Property Inspection Report".to_string(),
            initial: "Initial".to_string(),
            final_: "Final".to_string(),
            details_section: "Inspection Details".to_string(),
            observations_section: "General Observations".to_string(),
            summary_section: "Property Condition Summary (AI)".to_string(),
            items_section: "Inspected Items".to_string(),
            signatures_section: "Signatures".to_string(),
            inspector: "Inspector".to_string(),
            landlord: "Landlord".to_string(),
            tenant: "Tenant".to_string(),
            address: "Address".to_string(),
            date: "Date".to_string(),
            geolocation: "Geolocation".to_string(),
            inspector_role: "Inspector".to_string(),
            landlord_role: "Landlord".to_string(),
            tenant_role: "Tenant".to_string(),
            item: "Item {n}".to_string(),
            not_provided: "not provided".to_string(),
            not_available: "not available".to_string(),
            image_failed: "image failed to load".to_string(),
            signature_failed: "signature failed to load".to_string(),
            unsigned: "[unsigned]".to_string(),
            no_items: "no items were added".to_string(),
            no_summary_items: "No items were added to generate a summary.".to_string(),
            page_number: "page {page} of {total}".to_string(),
        }
    }

    /// Brazilian Portuguese wording.
    pub fn portuguese() -> Self {
        Self {
            report_title: "Laudo de Vistoria de Imóvel".to_string(),
            initial: "Inicial".to_string(),
            final_: "Final".to_string(),
            details_section: "Dados da Vistoria".to_string(),
            observations_section: "Observações Gerais".to_string(),
            summary_section: "Resumo da Condição do Imóvel (IA)".to_string(),
            items_section: "Itens Vistoriados".to_string(),
            signatures_section: "Assinaturas".to_string(),
            inspector: "Vistoriador".to_string(),
            landlord: "Locador(a)".to_string(),
            tenant: "Locatário(a)".to_string(),
            address: "Endereço".to_string(),
            date: "Data".to_string(),
            geolocation: "Geolocalização".to_string(),
            inspector_role: "Vistoriador(a)".to_string(),
            landlord_role: "Locador(a)".to_string(),
            tenant_role: "Locatário(a)".to_string(),
            item: "Item {n}".to_string(),
            not_provided: "Não informado".to_string(),
            not_available: "Não disponível".to_string(),
            image_failed: "Erro ao carregar imagem.".to_string(),
            signature_failed: "Erro na assinatura".to_string(),
            unsigned: "[Não assinado]".to_string(),
            no_items: "Nenhuma foto foi adicionada a esta vistoria.".to_string(),
            no_summary_items: "Nenhum item foi adicionado para gerar um resumo.".to_string(),
            page_number: "Página {page} de {total}".to_string(),
        }
    }

    pub fn item_label(&self, ordinal: u32) -> String {
        self.item.replace("{n}", &ordinal.to_string())
    }

    pub fn page_label(&self, page: usize, total: usize) -> String {
        self.page_number
            .replace("{page}", &page.to_string())
            .replace("{total}", &total.to_string())
    }
}

/// Geometry, sizes and spacing for one generated report. Lengths are points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub page_size: PageSize,
    pub margin: Edges,
    pub font_family: FontFamily,

    pub heading_font_size: f64,
    pub heading_advance: f64,

    pub section_title_font_size: f64,
    /// Height reserved before a section title is drawn.
    pub section_title_block: f64,
    pub section_title_advance: f64,
    pub section_rule_gap: f64,
    pub section_gap: f64,
    pub rule_color: Color,

    pub body_font_size: f64,

    pub detail_label_width: f64,
    pub detail_row_gap: f64,

    pub item_label_font_size: f64,
    pub item_label_advance: f64,
    pub image_height: f64,
    pub image_gap: f64,
    /// Added to image and text height when reserving space for an item.
    /// Covers the label advance, the image gap and the trailing gap.
    pub item_margin: f64,
    pub item_gap: f64,
    pub failed_image_advance: f64,

    pub signature_box_height: f64,
    pub signature_box_inset: f64,
    pub signature_placeholder_offset: f64,
    pub signature_rule_offset: f64,
    pub signature_rule_inset: f64,
    pub signature_rule_color: Color,
    pub signer_name_gap: f64,
    pub signer_name_font_size: f64,
    pub signer_role_gap: f64,
    pub signer_role_font_size: f64,

    pub page_number_font_size: f64,
    /// Baseline distance from the bottom edge of the page.
    pub page_number_offset: f64,

    pub labels: Labels,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin: Edges::uniform(40.0),
            font_family: FontFamily::Helvetica,
            heading_font_size: 18.0,
            heading_advance: 30.0,
            section_title_font_size: 14.0,
            section_title_block: 30.0,
            section_title_advance: 20.0,
            section_rule_gap: 15.0,
            section_gap: 10.0,
            rule_color: Color::gray(200.0 / 255.0),
            body_font_size: 10.0,
            detail_label_width: 80.0,
            detail_row_gap: 5.0,
            item_label_font_size: 12.0,
            item_label_advance: 20.0,
            image_height: 200.0,
            image_gap: 10.0,
            item_margin: 50.0,
            item_gap: 20.0,
            failed_image_advance: 20.0,
            signature_box_height: 50.0,
            signature_box_inset: 10.0,
            signature_placeholder_offset: 25.0,
            signature_rule_offset: 60.0,
            signature_rule_inset: 5.0,
            signature_rule_color: Color::gray(150.0 / 255.0),
            signer_name_gap: 15.0,
            signer_name_font_size: 10.0,
            signer_role_gap: 10.0,
            signer_role_font_size: 8.0,
            page_number_font_size: 8.0,
            page_number_offset: 20.0,
            labels: Labels::default(),
        }
    }
}

impl LayoutConfig {
    /// Load a configuration from a JSON file. Missing fields keep defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn page_dimensions(&self) -> (f64, f64) {
        self.page_size.dimensions()
    }

    pub fn content_width(&self) -> f64 {
        self.page_size.dimensions().0 - self.margin.horizontal()
    }

    /// Reject geometry that cannot hold any content.
    pub fn validate(&self) -> Result<(), ReportError> {
        let (width, height) = self.page_dimensions();
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ReportError::Config(format!(
                "page size must be positive, got {}x{}",
                width, height
            )));
        }
        let m = &self.margin;
        if [m.top, m.right, m.bottom, m.left].iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ReportError::Config("margins must be non-negative".to_string()));
        }
        if self.content_width() <= self.detail_label_width {
            return Err(ReportError::Config(format!(
                "content width {:.2} leaves no room beside the {:.2}pt label column",
                self.content_width(),
                self.detail_label_width
            )));
        }
        if height - m.vertical() <= 0.0 {
            return Err(ReportError::Config("margins leave no usable page height".to_string()));
        }
        if self.image_height <= 0.0 || !self.image_height.is_finite() {
            return Err(ReportError::Config("image height must be positive".to_string()));
        }
        let font_sizes = [
            ("heading", self.heading_font_size),
            ("section title", self.section_title_font_size),
            ("body", self.body_font_size),
            ("item label", self.item_label_font_size),
            ("signer name", self.signer_name_font_size),
            ("signer role", self.signer_role_font_size),
            ("page number", self.page_number_font_size),
        ];
        if let Some((name, size)) = font_sizes.iter().find(|(_, s)| !s.is_finite() || *s <= 0.0) {
            return Err(ReportError::Config(format!(
                "{} font size must be positive, got {}",
                name, size
            )));
        }
        Ok(())
    }
}
