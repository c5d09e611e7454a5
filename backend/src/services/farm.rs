//! Farm management service

use std::sync::Arc;

use shared::{
    farm_overview, validate_farm, validate_farm_form, CreateFarmInput, Farm, FarmOverview,
    RecordId, UpdateFarmInput,
};

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Farm service for managing farms and their fields
#[derive(Clone)]
pub struct FarmService {
    store: Arc<Store>,
}

impl FarmService {
    /// Create a new FarmService instance
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn get_farms(&self) -> AppResult<Vec<Farm>> {
        Ok(self.store.farms.get_all().await)
    }

    pub async fn get_farm(&self, farm_id: RecordId) -> AppResult<Farm> {
        Ok(self.store.farms.get_by_id(farm_id).await?)
    }

    /// Create a farm. An omitted field list becomes empty.
    pub async fn create_farm(&self, input: CreateFarmInput) -> AppResult<Farm> {
        validate_farm_form(&input).into_result()?;

        let farm = self.store.farms.create(|id| input.into_record(id)).await?;
        tracing::info!(farm_id = farm.id, name = %farm.name, "Farm created");
        Ok(farm)
    }

    /// Merge `input` over the stored farm, rejecting the result if it no
    /// longer passes the farm form checks
    pub async fn update_farm(&self, farm_id: RecordId, input: UpdateFarmInput) -> AppResult<Farm> {
        self.store
            .farms
            .update(farm_id, |farm| {
                input.apply_to(farm);
                validate_farm(farm).into_result().map_err(AppError::from)
            })
            .await
    }

    /// Delete a farm. Crops and expenses that point at it are left alone.
    pub async fn delete_farm(&self, farm_id: RecordId) -> AppResult<()> {
        self.store.farms.delete(farm_id).await?;
        tracing::info!(farm_id, "Farm deleted");
        Ok(())
    }

    /// Farm cards with field previews and crop counts
    pub async fn get_farm_overviews(&self) -> AppResult<Vec<FarmOverview>> {
        let (farms, crops) = tokio::join!(self.store.farms.get_all(), self.store.crops.get_all());
        Ok(farm_overview(&farms, &crops))
    }
}
