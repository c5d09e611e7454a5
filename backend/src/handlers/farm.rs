//! Farm management HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::{CreateFarmInput, RecordId, UpdateFarmInput};

use crate::services::FarmService;
use crate::AppState;

/// List all farms
pub async fn list_farms(State(state): State<AppState>) -> impl IntoResponse {
    let service = FarmService::new(state.store.clone());

    match service.get_farms().await {
        Ok(farms) => (StatusCode::OK, Json(farms)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Farm cards with field previews
pub async fn list_farm_overviews(State(state): State<AppState>) -> impl IntoResponse {
    let service = FarmService::new(state.store.clone());

    match service.get_farm_overviews().await {
        Ok(overviews) => (StatusCode::OK, Json(overviews)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific farm
pub async fn get_farm(
    State(state): State<AppState>,
    Path(farm_id): Path<RecordId>,
) -> impl IntoResponse {
    let service = FarmService::new(state.store.clone());

    match service.get_farm(farm_id).await {
        Ok(farm) => (StatusCode::OK, Json(farm)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new farm
pub async fn create_farm(
    State(state): State<AppState>,
    Json(input): Json<CreateFarmInput>,
) -> impl IntoResponse {
    let service = FarmService::new(state.store.clone());

    match service.create_farm(input).await {
        Ok(farm) => (StatusCode::CREATED, Json(farm)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a farm
pub async fn update_farm(
    State(state): State<AppState>,
    Path(farm_id): Path<RecordId>,
    Json(input): Json<UpdateFarmInput>,
) -> impl IntoResponse {
    let service = FarmService::new(state.store.clone());

    match service.update_farm(farm_id, input).await {
        Ok(farm) => (StatusCode::OK, Json(farm)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a farm
pub async fn delete_farm(
    State(state): State<AppState>,
    Path(farm_id): Path<RecordId>,
) -> impl IntoResponse {
    let service = FarmService::new(state.store.clone());

    match service.delete_farm(farm_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
