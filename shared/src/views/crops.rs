//! Crop lists and the joins between crops, fields and farms

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{days_between, parse_wire_name, sorted_by, UnknownSelector};
use crate::models::{Crop, CropStatus, CropType, Farm, SizeUnit};
use crate::types::RecordId;

/// Label used when a field or farm cannot be resolved
pub const UNKNOWN: &str = "Unknown";

/// Field names listed on a farm card before "+N more"
pub const FIELD_PREVIEW_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CropFilter {
    #[default]
    All,
    /// Planted through fruiting
    Active,
    Status(CropStatus),
    Type(CropType),
}

impl CropFilter {
    pub fn matches(&self, crop: &Crop) -> bool {
        match self {
            CropFilter::All => true,
            CropFilter::Active => crop.status.is_active(),
            CropFilter::Status(status) => crop.status == *status,
            CropFilter::Type(crop_type) => crop.crop_type == *crop_type,
        }
    }
}

impl FromStr for CropFilter {
    type Err = UnknownSelector;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(CropFilter::All),
            "active" => Ok(CropFilter::Active),
            other => {
                let parsed = match other.strip_prefix("type:") {
                    Some(t) => parse_wire_name(t).map(CropFilter::Type),
                    None => parse_wire_name(other).map(CropFilter::Status),
                };
                parsed.ok_or_else(|| UnknownSelector::new("crop filter", value))
            }
        }
    }
}

impl std::fmt::Display for CropFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropFilter::All => write!(f, "all"),
            CropFilter::Active => write!(f, "active"),
            CropFilter::Status(status) => write!(f, "{}", status.as_str()),
            CropFilter::Type(crop_type) => write!(f, "type:{}", crop_type.as_str()),
        }
    }
}

impl TryFrom<String> for CropFilter {
    type Error = UnknownSelector;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CropFilter> for String {
    fn from(filter: CropFilter) -> Self {
        filter.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CropSort {
    /// Earliest planted first
    #[default]
    PlantingDate,
    /// Earliest harvest first; crops without a date go last
    ExpectedHarvest,
    /// Lifecycle order, planted first
    Status,
    /// Crop type name, A to Z
    Type,
}

impl FromStr for CropSort {
    type Err = UnknownSelector;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "plantingDate" => Ok(CropSort::PlantingDate),
            "expectedHarvest" => Ok(CropSort::ExpectedHarvest),
            "status" => Ok(CropSort::Status),
            "type" => Ok(CropSort::Type),
            _ => Err(UnknownSelector::new("crop sort", value)),
        }
    }
}

impl std::fmt::Display for CropSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropSort::PlantingDate => write!(f, "plantingDate"),
            CropSort::ExpectedHarvest => write!(f, "expectedHarvest"),
            CropSort::Status => write!(f, "status"),
            CropSort::Type => write!(f, "type"),
        }
    }
}

impl TryFrom<String> for CropSort {
    type Error = UnknownSelector;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CropSort> for String {
    fn from(sort: CropSort) -> Self {
        sort.to_string()
    }
}

pub fn filter_crops(crops: &[Crop], filter: CropFilter) -> Vec<Crop> {
    crops.iter().filter(|crop| filter.matches(crop)).cloned().collect()
}

pub fn sort_crops(crops: &[Crop], sort: CropSort) -> Vec<Crop> {
    match sort {
        CropSort::PlantingDate => sorted_by(crops, |a, b| a.planting_date.cmp(&b.planting_date)),
        CropSort::ExpectedHarvest => sorted_by(crops, |a, b| {
            match (a.expected_harvest, b.expected_harvest) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        }),
        CropSort::Status => sorted_by(crops, |a, b| a.status.cmp(&b.status)),
        CropSort::Type => sorted_by(crops, |a, b| a.crop_type.as_str().cmp(b.crop_type.as_str())),
    }
}

/// Where a crop's field lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldLocation {
    /// `None` only for the unknown sentinel
    pub farm_id: Option<RecordId>,
    pub farm_name: String,
    pub field_id: String,
    pub field_name: String,
    pub field_size: Decimal,
    pub size_unit: SizeUnit,
}

impl FieldLocation {
    /// Placeholder for a crop whose field no longer exists
    pub fn unknown(field_id: &str) -> Self {
        Self {
            farm_id: None,
            farm_name: UNKNOWN.to_string(),
            field_id: field_id.to_string(),
            field_name: UNKNOWN.to_string(),
            field_size: Decimal::ZERO,
            size_unit: SizeUnit::Acres,
        }
    }
}

/// Find the farm owning `field_id` by scanning every farm's fields in order
pub fn locate_field(farms: &[Farm], field_id: &str) -> Option<FieldLocation> {
    farms.iter().find_map(|farm| {
        farm.fields
            .iter()
            .find(|field| field.id == field_id)
            .map(|field| FieldLocation {
                farm_id: Some(farm.id),
                farm_name: farm.name.clone(),
                field_id: field.id.clone(),
                field_name: field.name.clone(),
                field_size: field.size,
                size_unit: farm.size_unit,
            })
    })
}

pub fn farm_name(farms: &[Farm], farm_id: RecordId) -> Option<&str> {
    farms
        .iter()
        .find(|farm| farm.id == farm_id)
        .map(|farm| farm.name.as_str())
}

/// A crop card: the crop, where it grows and how far along it is
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropOverview {
    pub crop: Crop,
    pub location: FieldLocation,
    /// False when `location` is the unknown sentinel
    pub located: bool,
    pub days_planted: i64,
    /// Negative once the expected harvest has passed
    pub days_to_harvest: Option<i64>,
}

pub fn crop_overview(crops: &[Crop], farms: &[Farm], today: NaiveDate) -> Vec<CropOverview> {
    crops
        .iter()
        .map(|crop| {
            let found = locate_field(farms, &crop.field_id);
            CropOverview {
                located: found.is_some(),
                location: found.unwrap_or_else(|| FieldLocation::unknown(&crop.field_id)),
                days_planted: days_between(crop.planting_date, today),
                days_to_harvest: crop.expected_harvest.map(|harvest| days_between(today, harvest)),
                crop: crop.clone(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: CropStatus,
    pub count: usize,
}

/// One bucket per lifecycle stage, in lifecycle order, including empty ones
pub fn crop_status_counts(crops: &[Crop]) -> Vec<StatusCount> {
    CropStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: crops.iter().filter(|c| c.status == status).count(),
        })
        .collect()
}

/// A farm card
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmOverview {
    #[serde(flatten)]
    pub farm: Farm,
    pub field_count: usize,
    pub field_preview: Vec<String>,
    /// Fields beyond the preview, shown as "+N more"
    pub more_fields: usize,
    /// Crops planted in any of this farm's fields
    pub crop_count: usize,
}

pub fn farm_overview(farms: &[Farm], crops: &[Crop]) -> Vec<FarmOverview> {
    farms
        .iter()
        .map(|farm| {
            let field_count = farm.fields.len();
            FarmOverview {
                field_count,
                field_preview: farm
                    .fields
                    .iter()
                    .take(FIELD_PREVIEW_LIMIT)
                    .map(|f| f.name.clone())
                    .collect(),
                more_fields: field_count.saturating_sub(FIELD_PREVIEW_LIMIT),
                crop_count: crops
                    .iter()
                    .filter(|crop| farm.fields.iter().any(|f| f.id == crop.field_id))
                    .count(),
                farm: farm.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Field;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn field(id: &str, name: &str) -> Field {
        Field {
            id: id.to_string(),
            name: name.to_string(),
            size: Decimal::from(5),
        }
    }

    fn farm(id: u32, name: &str, fields: Vec<Field>) -> Farm {
        Farm {
            id,
            name: name.to_string(),
            location: "Valley Road".to_string(),
            size: Decimal::from(20),
            size_unit: SizeUnit::Hectares,
            fields,
        }
    }

    fn crop(id: u32, field_id: &str, status: CropStatus, planted: NaiveDate) -> Crop {
        Crop {
            id,
            crop_type: CropType::Corn,
            field_id: field_id.to_string(),
            planting_date: planted,
            expected_harvest: None,
            status,
            notes: None,
        }
    }

    #[test]
    fn test_locate_field_scans_all_farms() {
        let farms = vec![
            farm(1, "North", vec![field("f1", "Upper")]),
            farm(2, "South", vec![field("f2", "Lower")]),
        ];
        let location = locate_field(&farms, "f2").unwrap();
        assert_eq!(location.farm_id, Some(2));
        assert_eq!(location.farm_name, "South");
        assert_eq!(location.field_name, "Lower");
        assert_eq!(location.size_unit, SizeUnit::Hectares);
        assert!(locate_field(&farms, "f9").is_none());
    }

    #[test]
    fn test_missing_field_uses_unknown_sentinel() {
        let today = date(2024, 5, 15);
        let crops = vec![crop(1, "gone", CropStatus::Growing, date(2024, 5, 5))];
        let overview = crop_overview(&crops, &[], today);
        assert!(!overview[0].located);
        assert_eq!(overview[0].location.farm_name, "Unknown");
        assert_eq!(overview[0].location.field_name, "Unknown");
        assert_eq!(overview[0].location.field_size, Decimal::ZERO);
        assert_eq!(overview[0].location.size_unit, SizeUnit::Acres);
        assert_eq!(overview[0].days_planted, 10);
    }

    #[test]
    fn test_days_to_harvest_goes_negative() {
        let today = date(2024, 5, 15);
        let mut late = crop(1, "f1", CropStatus::Ready, date(2024, 3, 1));
        late.expected_harvest = Some(date(2024, 5, 10));
        let overview = crop_overview(&[late], &[], today);
        assert_eq!(overview[0].days_to_harvest, Some(-5));
    }

    #[test]
    fn test_active_filter_excludes_ready_and_harvested() {
        let on = date(2024, 5, 1);
        let crops: Vec<Crop> = CropStatus::ALL
            .iter()
            .enumerate()
            .map(|(i, s)| crop(i as u32 + 1, "f1", *s, on))
            .collect();
        let active = filter_crops(&crops, CropFilter::Active);
        assert_eq!(active.len(), 4);
        assert!(active.iter().all(|c| c.status.is_active()));
    }

    #[test]
    fn test_expected_harvest_sort_puts_undated_last() {
        let on = date(2024, 5, 1);
        let mut a = crop(1, "f1", CropStatus::Growing, on);
        let mut b = crop(2, "f1", CropStatus::Growing, on);
        let c = crop(3, "f1", CropStatus::Growing, on);
        a.expected_harvest = Some(date(2024, 9, 1));
        b.expected_harvest = Some(date(2024, 7, 1));
        let ids: Vec<u32> = sort_crops(&[c, a, b], CropSort::ExpectedHarvest)
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_farm_overview_previews_three_fields() {
        let farms = vec![farm(
            1,
            "North",
            vec![field("a", "A"), field("b", "B"), field("c", "C"), field("d", "D"), field("e", "E")],
        )];
        let crops = vec![
            crop(1, "a", CropStatus::Growing, date(2024, 5, 1)),
            crop(2, "e", CropStatus::Growing, date(2024, 5, 1)),
            crop(3, "zz", CropStatus::Growing, date(2024, 5, 1)),
        ];
        let overview = farm_overview(&farms, &crops);
        assert_eq!(overview[0].field_count, 5);
        assert_eq!(overview[0].field_preview, vec!["A", "B", "C"]);
        assert_eq!(overview[0].more_fields, 2);
        assert_eq!(overview[0].crop_count, 2);
    }

    #[test]
    fn test_status_counts_cover_every_stage() {
        let crops = vec![
            crop(1, "f1", CropStatus::Growing, date(2024, 5, 1)),
            crop(2, "f1", CropStatus::Growing, date(2024, 5, 1)),
        ];
        let counts = crop_status_counts(&crops);
        assert_eq!(counts.len(), 6);
        assert_eq!(counts[1], StatusCount { status: CropStatus::Growing, count: 2 });
    }

    #[test]
    fn test_filter_keys() {
        assert_eq!("ready".parse::<CropFilter>(), Ok(CropFilter::Status(CropStatus::Ready)));
        assert_eq!("type:wheat".parse::<CropFilter>(), Ok(CropFilter::Type(CropType::Wheat)));
        assert!("wilted".parse::<CropFilter>().is_err());
        assert!("type:kale".parse::<CropFilter>().is_err());
    }
}
