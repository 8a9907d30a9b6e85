//! Normalization of a raw inspection record into a [`ReportModel`].
//!
//! The record mirrors what the capture application stores: participant
//! names, property data, photos with descriptions and optional signature
//! images. Presentation choices (title wording, detail order, coordinate
//! precision) live here so the layout engine only ever sees finished strings.

use serde::{Deserialize, Serialize};

use super::{DetailField, ImageRef, InspectionItem, ReportModel, SignatureRole, SignatureSlot};
use crate::config::Labels;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InspectionType {
    #[default]
    Initial,
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPhoto {
    #[serde(default)]
    pub id: String,
    pub image_data_url: String,
    #[serde(default)]
    pub description: String,
}

/// A captured inspection, as stored by the surrounding application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectionRecord {
    pub inspector_name: String,
    pub landlord_name: String,
    pub tenant_name: String,
    pub property_address: String,
    pub inspection_type: InspectionType,
    pub inspection_date: String,
    pub geolocation: Option<Geolocation>,
    pub photos: Vec<PropertyPhoto>,
    pub observations: Option<String>,
    pub inspector_signature_url: Option<String>,
    pub landlord_signature_url: Option<String>,
    pub tenant_signature_url: Option<String>,
}

impl ReportModel {
    /// Build a report from a raw record and the externally generated summary.
    ///
    /// When no summary is supplied and the record has no photos, the
    /// "nothing to summarize" label is used instead.
    pub fn from_record(record: &InspectionRecord, summary: Option<&str>, labels: &Labels) -> Self {
        let kind = match record.inspection_type {
            InspectionType::Initial => &labels.initial,
            InspectionType::Final => &labels.final_,
        };

        let geolocation = record
            .geolocation
            .map(|g| format!("{:.5}, {:.5}", g.latitude, g.longitude))
            .unwrap_or_else(|| labels.not_available.clone());

        let details = vec![
            DetailField::new(&labels.inspector, &record.inspector_name),
            DetailField::new(&labels.landlord, &record.landlord_name),
            DetailField::new(&labels.tenant, &record.tenant_name),
            DetailField::new(&labels.address, &record.property_address),
            DetailField::new(&labels.date, &record.inspection_date),
            DetailField::new(&labels.geolocation, geolocation),
        ];

        let items = record
            .photos
            .iter()
            .zip(1u32..)
            .map(|(photo, ordinal)| InspectionItem {
                ordinal,
                image: ImageRef::new(&photo.image_data_url),
                description: photo.description.clone(),
            })
            .collect();

        let summary = match summary {
            Some(text) => text.to_string(),
            None if record.photos.is_empty() => labels.no_summary_items.clone(),
            None => String::new(),
        };

        let slot = |role, name: &str, title: &str, url: &Option<String>| SignatureSlot {
            role,
            signer_name: name.to_string(),
            role_title: title.to_string(),
            image: url.as_deref().filter(|u| !u.is_empty()).map(ImageRef::new),
        };

        ReportModel {
            title: format!("{} ({})", labels.report_title, kind),
            details,
            observations: record.observations.clone().filter(|o| !o.trim().is_empty()),
            summary,
            items,
            signatures: [
                slot(
                    SignatureRole::Inspector,
                    &record.inspector_name,
                    &labels.inspector_role,
                    &record.inspector_signature_url,
                ),
                slot(
                    SignatureRole::Landlord,
                    &record.landlord_name,
                    &labels.landlord_role,
                    &record.landlord_signature_url,
                ),
                slot(
                    SignatureRole::Tenant,
                    &record.tenant_name,
                    &labels.tenant_role,
                    &record.tenant_signature_url,
                ),
            ],
        }
    }
}
