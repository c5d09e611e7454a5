//! Route definitions for the Farmkeep API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/farms", farm_routes())
        .nest("/crops", crop_routes())
        .nest("/tasks", task_routes())
        .nest("/expenses", expense_routes())
        .route("/dashboard", get(handlers::get_dashboard))
        .nest("/weather", weather_routes())
}

/// Farm management routes
fn farm_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_farms).post(handlers::create_farm))
        .route("/overview", get(handlers::list_farm_overviews))
        .route(
            "/:farm_id",
            get(handlers::get_farm)
                .put(handlers::update_farm)
                .delete(handlers::delete_farm),
        )
}

/// Crop management routes
fn crop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_crops).post(handlers::create_crop))
        .route("/overview", get(handlers::list_crop_overviews))
        .route(
            "/:crop_id",
            get(handlers::get_crop)
                .put(handlers::update_crop)
                .delete(handlers::delete_crop),
        )
}

/// Task scheduling routes
fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_tasks).post(handlers::create_task))
        .route(
            "/:task_id",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route("/:task_id/toggle", post(handlers::toggle_task))
}

/// Expense tracking routes
fn expense_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_expenses).post(handlers::create_expense))
        .route(
            "/:expense_id",
            get(handlers::get_expense)
                .put(handlers::update_expense)
                .delete(handlers::delete_expense),
        )
}

/// Read-only weather routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_weather))
        .route("/current", get(handlers::get_current_weather))
        .route("/forecast", get(handlers::get_forecast))
        .route("/alerts", get(handlers::get_alerts))
}
