//! Weather panel service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::{CurrentWeather, DailyForecast, WeatherAlert, WeatherReport};

use crate::error::AppResult;
use crate::store::Store;

/// Weather service over the read-only weather feed
#[derive(Clone)]
pub struct WeatherService {
    store: Arc<Store>,
}

impl WeatherService {
    /// Create a new WeatherService instance
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn get_report(&self) -> AppResult<WeatherReport> {
        Ok(self.store.weather.report().await?)
    }

    pub async fn get_current(&self) -> AppResult<CurrentWeather> {
        Ok(self.store.weather.current().await?)
    }

    pub async fn get_forecast(&self) -> AppResult<Vec<DailyForecast>> {
        Ok(self.store.weather.forecast().await?)
    }

    /// Alerts in stored order. With `active_at`, expired alerts are dropped.
    pub async fn get_alerts(&self, active_at: Option<DateTime<Utc>>) -> AppResult<Vec<WeatherAlert>> {
        let alerts = self.store.weather.alerts().await?;
        Ok(match active_at {
            Some(now) => alerts.into_iter().filter(|a| a.is_active(now)).collect(),
            None => alerts,
        })
    }
}
