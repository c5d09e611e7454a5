//! Crop management service

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use shared::{
    crop_overview, crop_status_counts, filter_crops, sort_crops, validate_crop,
    validate_crop_form, CreateCropInput, Crop, CropFilter, CropOverview, CropSort, RecordId,
    StatusCount, UpdateCropInput,
};

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Crop service for planting and tracking crops
#[derive(Clone)]
pub struct CropService {
    store: Arc<Store>,
}

/// A filtered, sorted crop list with lifecycle counts over every crop
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropList {
    pub filter: CropFilter,
    pub sort: CropSort,
    pub crops: Vec<Crop>,
    pub status_counts: Vec<StatusCount>,
}

impl CropService {
    /// Create a new CropService instance
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn get_crops(&self, filter: CropFilter, sort: CropSort) -> AppResult<CropList> {
        let crops = self.store.crops.get_all().await;
        let filtered = filter_crops(&crops, filter);

        Ok(CropList {
            filter,
            sort,
            crops: sort_crops(&filtered, sort),
            status_counts: crop_status_counts(&crops),
        })
    }

    pub async fn get_crop(&self, crop_id: RecordId) -> AppResult<Crop> {
        Ok(self.store.crops.get_by_id(crop_id).await?)
    }

    /// Plant a crop. The field reference is not checked against any farm.
    pub async fn create_crop(&self, input: CreateCropInput, today: NaiveDate) -> AppResult<Crop> {
        validate_crop_form(&input).into_result()?;

        let crop = self.store.crops.create(|id| input.into_record(id, today)).await?;
        tracing::info!(crop_id = crop.id, crop_type = crop.crop_type.as_str(), "Crop planted");
        Ok(crop)
    }

    /// Merge `input` over the stored crop. Any status may be set, in any order.
    pub async fn update_crop(&self, crop_id: RecordId, input: UpdateCropInput) -> AppResult<Crop> {
        self.store
            .crops
            .update(crop_id, |crop| {
                input.apply_to(crop);
                validate_crop(crop).into_result().map_err(AppError::from)
            })
            .await
    }

    pub async fn delete_crop(&self, crop_id: RecordId) -> AppResult<()> {
        self.store.crops.delete(crop_id).await?;
        tracing::info!(crop_id, "Crop deleted");
        Ok(())
    }

    /// Every crop joined with its field, fetched alongside the farms
    pub async fn get_crop_overviews(&self, today: NaiveDate) -> AppResult<Vec<CropOverview>> {
        let (crops, farms) = tokio::join!(self.store.crops.get_all(), self.store.farms.get_all());
        let overviews = crop_overview(&crops, &farms, today);

        let unlocated = overviews.iter().filter(|o| !o.located).count();
        if unlocated > 0 {
            tracing::debug!(unlocated, "Crops reference fields that no longer exist");
        }
        Ok(overviews)
    }
}
