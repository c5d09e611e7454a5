//! Business logic services for the Farmkeep record keeper
//!
//! Services own the rules that sit between HTTP and the store: form
//! validation before writes, merge-then-validate on updates, and the
//! concurrent fetches that feed the derived views.

pub mod crop;
pub mod dashboard;
pub mod expense;
pub mod farm;
pub mod task;
pub mod weather;

pub use crop::CropService;
pub use dashboard::DashboardService;
pub use expense::ExpenseService;
pub use farm::FarmService;
pub use task::TaskService;
pub use weather::WeatherService;

use chrono::NaiveDate;

/// The local calendar date used by date-relative views
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
