//! Read-only weather document

use shared::{CurrentWeather, DailyForecast, WeatherAlert, WeatherReport};

use super::latency::{pause, Latency};
use super::StoreError;

/// Serves the seeded weather report. Nothing writes to it after startup.
pub struct WeatherFeed {
    report: Option<WeatherReport>,
    latency: Latency,
}

impl WeatherFeed {
    pub fn new(report: Option<WeatherReport>, latency: Latency) -> Self {
        Self { report, latency }
    }

    fn report_ref(&self) -> Result<&WeatherReport, StoreError> {
        self.report.as_ref().ok_or(StoreError::NoWeatherData)
    }

    pub async fn current(&self) -> Result<CurrentWeather, StoreError> {
        pause(self.latency.weather_current).await;
        Ok(self.report_ref()?.current.clone())
    }

    pub async fn forecast(&self) -> Result<Vec<DailyForecast>, StoreError> {
        pause(self.latency.weather_forecast).await;
        Ok(self.report_ref()?.forecast.clone())
    }

    pub async fn alerts(&self) -> Result<Vec<WeatherAlert>, StoreError> {
        pause(self.latency.weather_alerts).await;
        Ok(self.report_ref()?.alerts.clone())
    }

    /// All three parts, fetched concurrently
    pub async fn report(&self) -> Result<WeatherReport, StoreError> {
        let (current, forecast, alerts) = tokio::join!(self.current(), self.forecast(), self.alerts());
        Ok(WeatherReport {
            current: current?,
            forecast: forecast?,
            alerts: alerts?,
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.report.is_some()
    }
}
