//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub records: RecordCounts,
    pub weather: String,
}

#[derive(Serialize)]
pub struct RecordCounts {
    pub farms: usize,
    pub crops: usize,
    pub tasks: usize,
    pub expenses: usize,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = &state.store;
    let (farms, crops, tasks, expenses) = tokio::join!(
        store.farms.len(),
        store.crops.len(),
        store.tasks.len(),
        store.expenses.len(),
    );

    let weather = if store.weather.is_loaded() {
        "loaded"
    } else {
        "missing"
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: RecordCounts {
            farms,
            crops,
            tasks,
            expenses,
        },
        weather: weather.to_string(),
    })
}
