//! Crop models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Record, RecordId};

/// A crop planted in a farm field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "type")]
    pub crop_type: CropType,
    /// Weak reference to a `Field::id` on some farm
    pub field_id: String,
    pub planting_date: NaiveDate,
    pub expected_harvest: Option<NaiveDate>,
    pub status: CropStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for Crop {
    const KIND: &'static str = "Crop";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

/// Crop kinds offered when planting
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CropType {
    Corn,
    Wheat,
    Soybeans,
    Rice,
    Tomatoes,
    Potatoes,
    Lettuce,
    Carrots,
    Onions,
    Peppers,
    Cucumber,
    Squash,
    Beans,
    Peas,
    Cabbage,
    Other,
}

impl CropType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Corn => "corn",
            CropType::Wheat => "wheat",
            CropType::Soybeans => "soybeans",
            CropType::Rice => "rice",
            CropType::Tomatoes => "tomatoes",
            CropType::Potatoes => "potatoes",
            CropType::Lettuce => "lettuce",
            CropType::Carrots => "carrots",
            CropType::Onions => "onions",
            CropType::Peppers => "peppers",
            CropType::Cucumber => "cucumber",
            CropType::Squash => "squash",
            CropType::Beans => "beans",
            CropType::Peas => "peas",
            CropType::Cabbage => "cabbage",
            CropType::Other => "other",
        }
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str()),
            None => Ok(()),
        }
    }
}

/// Crop lifecycle stage. Ordered, but any stage may be set directly.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum CropStatus {
    #[default]
    Planted,
    Growing,
    Flowering,
    Fruiting,
    Ready,
    Harvested,
}

impl CropStatus {
    pub const ALL: [CropStatus; 6] = [
        CropStatus::Planted,
        CropStatus::Growing,
        CropStatus::Flowering,
        CropStatus::Fruiting,
        CropStatus::Ready,
        CropStatus::Harvested,
    ];

    /// Still in the field and not yet ready to pick
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            CropStatus::Planted | CropStatus::Growing | CropStatus::Flowering | CropStatus::Fruiting
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CropStatus::Planted => "planted",
            CropStatus::Growing => "growing",
            CropStatus::Flowering => "flowering",
            CropStatus::Fruiting => "fruiting",
            CropStatus::Ready => "ready",
            CropStatus::Harvested => "harvested",
        }
    }
}

impl std::fmt::Display for CropStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropStatus::Planted => write!(f, "Planted"),
            CropStatus::Growing => write!(f, "Growing"),
            CropStatus::Flowering => write!(f, "Flowering"),
            CropStatus::Fruiting => write!(f, "Fruiting"),
            CropStatus::Ready => write!(f, "Ready to Harvest"),
            CropStatus::Harvested => write!(f, "Harvested"),
        }
    }
}

/// Input for planting a crop
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCropInput {
    #[serde(rename = "type")]
    pub crop_type: Option<CropType>,
    #[serde(default)]
    pub field_id: String,
    pub planting_date: Option<NaiveDate>,
    pub expected_harvest: Option<NaiveDate>,
    #[serde(default)]
    pub status: CropStatus,
    pub notes: Option<String>,
}

impl CreateCropInput {
    /// Build the stored record. Callers validate first; the fallbacks here are
    /// never reached for a valid form.
    pub fn into_record(self, id: RecordId, today: NaiveDate) -> Crop {
        Crop {
            id,
            crop_type: self.crop_type.unwrap_or(CropType::Other),
            field_id: self.field_id,
            planting_date: self.planting_date.unwrap_or(today),
            expected_harvest: self.expected_harvest,
            status: self.status,
            notes: self.notes,
        }
    }
}

/// Input for updating a crop. Omitted fields keep their stored value; an
/// explicit `null` clears `expectedHarvest` or `notes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCropInput {
    #[serde(rename = "type")]
    pub crop_type: Option<CropType>,
    pub field_id: Option<String>,
    pub planting_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::types::double_option", skip_serializing_if = "Option::is_none")]
    pub expected_harvest: Option<Option<NaiveDate>>,
    pub status: Option<CropStatus>,
    #[serde(default, deserialize_with = "crate::types::double_option", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

impl UpdateCropInput {
    pub fn apply_to(self, crop: &mut Crop) {
        if let Some(crop_type) = self.crop_type {
            crop.crop_type = crop_type;
        }
        if let Some(field_id) = self.field_id {
            crop.field_id = field_id;
        }
        if let Some(planting_date) = self.planting_date {
            crop.planting_date = planting_date;
        }
        if let Some(expected_harvest) = self.expected_harvest {
            crop.expected_harvest = expected_harvest;
        }
        if let Some(status) = self.status {
            crop.status = status;
        }
        if let Some(notes) = self.notes {
            crop.notes = notes;
        }
    }
}
