//! Simulated per-operation latency

use std::time::Duration;

/// Delay applied before each store operation completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub get_all: Duration,
    pub get_by_id: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
    pub weather_current: Duration,
    pub weather_forecast: Duration,
    pub weather_alerts: Duration,
}

impl Latency {
    /// The delays a remote backend would roughly show
    pub fn simulated() -> Self {
        Self {
            get_all: Duration::from_millis(300),
            get_by_id: Duration::from_millis(200),
            create: Duration::from_millis(400),
            update: Duration::from_millis(400),
            delete: Duration::from_millis(300),
            weather_current: Duration::from_millis(500),
            weather_forecast: Duration::from_millis(400),
            weather_alerts: Duration::from_millis(300),
        }
    }

    /// No delay at all
    pub fn none() -> Self {
        Self {
            get_all: Duration::ZERO,
            get_by_id: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
            weather_current: Duration::ZERO,
            weather_forecast: Duration::ZERO,
            weather_alerts: Duration::ZERO,
        }
    }

    pub fn from_flag(simulate: bool) -> Self {
        if simulate {
            Self::simulated()
        } else {
            Self::none()
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::simulated()
    }
}

pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
