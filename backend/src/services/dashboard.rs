//! Dashboard aggregation service

use std::sync::Arc;

use chrono::NaiveDate;
use shared::{dashboard_view, DashboardView};

use crate::error::AppResult;
use crate::store::Store;

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<Store>,
}

impl DashboardService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Fetch all four collections and the current weather at once, then
    /// aggregate. Missing weather leaves the panel empty instead of failing.
    pub async fn get_dashboard(&self, today: NaiveDate) -> AppResult<DashboardView> {
        let store = &self.store;
        let (farms, crops, tasks, expenses, weather) = tokio::join!(
            store.farms.get_all(),
            store.crops.get_all(),
            store.tasks.get_all(),
            store.expenses.get_all(),
            store.weather.current(),
        );

        let weather = match weather {
            Ok(current) => Some(current),
            Err(e) => {
                tracing::warn!("Dashboard without weather: {}", e);
                None
            }
        };

        Ok(dashboard_view(&farms, &crops, &tasks, &expenses, weather, today))
    }
}
