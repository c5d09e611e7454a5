//! Farm models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Record, RecordId};

/// A farm and the fields it owns
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Farm {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub name: String,
    pub location: String,
    pub size: Decimal,
    #[serde(default)]
    pub size_unit: SizeUnit,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Record for Farm {
    const KIND: &'static str = "Farm";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

/// A field within a farm. Crops point at fields by `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Field {
    pub id: String,
    pub name: String,
    pub size: Decimal,
}

/// Unit used for farm and field sizes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    #[default]
    Acres,
    Hectares,
    Sqft,
    Sqm,
}

impl SizeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeUnit::Acres => "acres",
            SizeUnit::Hectares => "hectares",
            SizeUnit::Sqft => "sqft",
            SizeUnit::Sqm => "sqm",
        }
    }
}

impl std::fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizeUnit::Acres => write!(f, "Acres"),
            SizeUnit::Hectares => write!(f, "Hectares"),
            SizeUnit::Sqft => write!(f, "Square Feet"),
            SizeUnit::Sqm => write!(f, "Square Meters"),
        }
    }
}

/// Input for creating a farm
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFarmInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub size: Option<Decimal>,
    #[serde(default)]
    pub size_unit: SizeUnit,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl CreateFarmInput {
    /// Build the stored record under the id assigned by the store
    pub fn into_record(self, id: RecordId) -> Farm {
        Farm {
            id,
            name: self.name,
            location: self.location,
            size: self.size.unwrap_or(Decimal::ZERO),
            size_unit: self.size_unit,
            fields: self.fields,
        }
    }
}

/// Input for updating a farm. Omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFarmInput {
    pub name: Option<String>,
    pub location: Option<String>,
    pub size: Option<Decimal>,
    pub size_unit: Option<SizeUnit>,
    pub fields: Option<Vec<Field>>,
}

impl UpdateFarmInput {
    pub fn apply_to(self, farm: &mut Farm) {
        if let Some(name) = self.name {
            farm.name = name;
        }
        if let Some(location) = self.location {
            farm.location = location;
        }
        if let Some(size) = self.size {
            farm.size = size;
        }
        if let Some(size_unit) = self.size_unit {
            farm.size_unit = size_unit;
        }
        if let Some(fields) = self.fields {
            farm.fields = fields;
        }
    }
}
