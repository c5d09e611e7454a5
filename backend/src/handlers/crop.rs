//! Crop management HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::{CreateCropInput, CropFilter, CropSort, RecordId, UpdateCropInput};

use super::ListQuery;
use crate::services::{today, CropService};
use crate::AppState;

/// List crops, e.g. `?filter=active&sort=expectedHarvest`
pub async fn list_crops(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let (filter, sort) = match query.selectors::<CropFilter, CropSort>() {
        Ok(selectors) => selectors,
        Err(e) => return e.into_response(),
    };
    let service = CropService::new(state.store.clone());

    match service.get_crops(filter, sort).await {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Crops joined with their fields and farms
pub async fn list_crop_overviews(State(state): State<AppState>) -> impl IntoResponse {
    let service = CropService::new(state.store.clone());

    match service.get_crop_overviews(today()).await {
        Ok(overviews) => (StatusCode::OK, Json(overviews)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific crop
pub async fn get_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<RecordId>,
) -> impl IntoResponse {
    let service = CropService::new(state.store.clone());

    match service.get_crop(crop_id).await {
        Ok(crop) => (StatusCode::OK, Json(crop)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Plant a new crop
pub async fn create_crop(
    State(state): State<AppState>,
    Json(input): Json<CreateCropInput>,
) -> impl IntoResponse {
    let service = CropService::new(state.store.clone());

    match service.create_crop(input, today()).await {
        Ok(crop) => (StatusCode::CREATED, Json(crop)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a crop
pub async fn update_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<RecordId>,
    Json(input): Json<UpdateCropInput>,
) -> impl IntoResponse {
    let service = CropService::new(state.store.clone());

    match service.update_crop(crop_id, input).await {
        Ok(crop) => (StatusCode::OK, Json(crop)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a crop
pub async fn delete_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<RecordId>,
) -> impl IntoResponse {
    let service = CropService::new(state.store.clone());

    match service.delete_crop(crop_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
