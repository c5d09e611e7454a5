//! Dashboard HTTP handler

use axum::{extract::State, Json};
use shared::DashboardView;

use crate::error::AppResult;
use crate::services::{today, DashboardService};
use crate::AppState;

pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardView>> {
    let service = DashboardService::new(state.store);
    let view = service.get_dashboard(today()).await?;
    Ok(Json(view))
}
