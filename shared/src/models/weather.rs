//! Weather data models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current, forecast and alert data as one read-only document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentWeather,
    pub forecast: Vec<DailyForecast>,
    pub alerts: Vec<WeatherAlert>,
}

/// Current conditions at the farm location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub location: String,
    /// Degrees Fahrenheit
    pub temperature: Decimal,
    pub humidity: i32,
    pub condition: String,
    /// Chance of rain, percent
    pub precipitation: i32,
    /// Miles per hour
    pub wind_speed: Option<Decimal>,
    pub uv_index: Option<i32>,
    #[serde(default)]
    pub is_alert: bool,
}

/// One day of the forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyForecast {
    pub day: String,
    pub condition: String,
    pub high: Decimal,
    pub low: Decimal,
    pub precipitation: i32,
}

/// Weather alert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherAlert {
    /// Hazard kind as published (frost, drought, storm, wind, hail, flood, ...)
    #[serde(rename = "type")]
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub title: String,
    pub description: String,
    pub expires: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Minor,
    Moderate,
    Severe,
    #[serde(other)]
    Unknown,
}

impl WeatherAlert {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires > now
    }
}
