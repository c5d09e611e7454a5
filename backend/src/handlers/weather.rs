//! HTTP handlers for the weather panel

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use shared::{CurrentWeather, DailyForecast, WeatherAlert, WeatherReport};

use crate::error::AppResult;
use crate::services::WeatherService;
use crate::AppState;

/// Current conditions, forecast and alerts together
pub async fn get_weather(State(state): State<AppState>) -> AppResult<Json<WeatherReport>> {
    let service = WeatherService::new(state.store);
    let report = service.get_report().await?;
    Ok(Json(report))
}

pub async fn get_current_weather(State(state): State<AppState>) -> AppResult<Json<CurrentWeather>> {
    let service = WeatherService::new(state.store);
    let current = service.get_current().await?;
    Ok(Json(current))
}

pub async fn get_forecast(State(state): State<AppState>) -> AppResult<Json<Vec<DailyForecast>>> {
    let service = WeatherService::new(state.store);
    let forecast = service.get_forecast().await?;
    Ok(Json(forecast))
}

/// Query parameters for weather alerts
#[derive(Debug, Default, Deserialize)]
pub struct AlertsQuery {
    /// Drop alerts that have already expired
    #[serde(default)]
    pub active: bool,
}

pub async fn get_alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertsQuery>,
) -> AppResult<Json<Vec<WeatherAlert>>> {
    let service = WeatherService::new(state.store);
    let active_at = query.active.then(Utc::now);
    let alerts = service.get_alerts(active_at).await?;
    Ok(Json(alerts))
}
