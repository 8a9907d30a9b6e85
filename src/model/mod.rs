//! # Report Model
//!
//! The normalized input the layout engine consumes. A report is a flat,
//! ordered record: a title, label/value detail rows, two free-text sections,
//! the photographed items, and exactly three signature slots. It is built
//! once by the caller and never mutated during generation.
//!
//! Applications that store the raw inspection form can hand that over
//! instead; see [`inspection::InspectionRecord`].

pub mod inspection;

use serde::{Deserialize, Serialize};

/// A complete report ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportModel {
    pub title: String,

    /// Metadata rows, rendered in order.
    #[serde(default)]
    pub details: Vec<DetailField>,

    /// General observations. The section is omitted when absent or blank.
    #[serde(default)]
    pub observations: Option<String>,

    /// AI-generated condition summary, produced outside the engine.
    #[serde(default)]
    pub summary: String,

    /// Photographed items, rendered in order.
    #[serde(default)]
    pub items: Vec<InspectionItem>,

    /// Inspector, landlord and tenant, in that order.
    pub signatures: [SignatureSlot; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailField {
    pub label: String,
    /// An empty value is rendered as the "not provided" placeholder.
    #[serde(default)]
    pub value: String,
}

impl DetailField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionItem {
    /// The number shown in the item's label.
    pub ordinal: u32,
    pub image: ImageRef,
    #[serde(default)]
    pub description: String,
}

/// Opaque handle to raster image data.
///
/// `src` is a data URI (`data:image/png;base64,...`), an explicit file path
/// (`/`, `./` or `../` prefix), or raw base64. Intrinsic pixel dimensions are
/// resolved by an [`ImageDecoder`](crate::image_loader::ImageDecoder).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef {
    pub src: String,
}

impl ImageRef {
    pub fn new(src: impl Into<String>) -> Self {
        Self { src: src.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignatureRole {
    Inspector,
    Landlord,
    Tenant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureSlot {
    pub role: SignatureRole,
    #[serde(default)]
    pub signer_name: String,
    /// Caption printed under the signer's name.
    pub role_title: String,
    /// Captured signature; `None` renders the unsigned placeholder.
    #[serde(default)]
    pub image: Option<ImageRef>,
}

impl SignatureSlot {
    pub fn unsigned(role: SignatureRole, signer_name: &str, role_title: &str) -> Self {
        Self {
            role,
            signer_name: signer_name.to_string(),
            role_title: role_title.to_string(),
            image: None,
        }
    }
}
