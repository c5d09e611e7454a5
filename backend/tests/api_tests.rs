//! HTTP API tests
//!
//! Drives the full router with `tower::ServiceExt::oneshot` against a store
//! built per test with no simulated latency.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, NaiveDate};
use farmkeep_backend::{
    config::{Config, ServerConfig, StoreConfig},
    create_app, services, AppState, Latency, Seed, Store,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use shared::{
    Crop, CropStatus, CropType, CurrentWeather, DailyForecast, Expense, ExpenseCategory, Farm,
    Field, Priority, SizeUnit, Task, TaskType, WeatherReport,
};
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        store: StoreConfig {
            data_dir: "data".to_string(),
            simulate_latency: false,
        },
    }
}

fn app_with(seed: Seed) -> Router {
    create_app(AppState::new(Store::new(seed, Latency::none()), test_config()))
}

fn weather() -> WeatherReport {
    WeatherReport {
        current: CurrentWeather {
            location: "Fresno, CA".to_string(),
            temperature: Decimal::from(68),
            humidity: 40,
            condition: "Sunny".to_string(),
            precipitation: 0,
            wind_speed: Some(Decimal::from(5)),
            uv_index: Some(7),
            is_alert: false,
        },
        forecast: vec![DailyForecast {
            day: "Today".to_string(),
            condition: "Sunny".to_string(),
            high: Decimal::from(75),
            low: Decimal::from(50),
            precipitation: 0,
        }],
        alerts: vec![],
    }
}

/// One farm, one growing crop, one pending high-priority task due today and
/// one expense of 120.50 today
fn single_record_seed(today: NaiveDate) -> Seed {
    Seed {
        farms: vec![Farm {
            id: 1,
            name: "Green Valley".to_string(),
            location: "Salinas, CA".to_string(),
            size: Decimal::from(100),
            size_unit: SizeUnit::Acres,
            fields: vec![Field {
                id: "north".to_string(),
                name: "North Field".to_string(),
                size: Decimal::from(40),
            }],
        }],
        crops: vec![Crop {
            id: 1,
            crop_type: CropType::Corn,
            field_id: "north".to_string(),
            planting_date: today - Duration::days(30),
            expected_harvest: Some(today + Duration::days(60)),
            status: CropStatus::Growing,
            notes: None,
        }],
        tasks: vec![Task {
            id: 1,
            title: "Irrigate".to_string(),
            task_type: TaskType::Watering,
            due_date: today,
            priority: Priority::High,
            crop_id: Some(1),
            completed: false,
            description: None,
        }],
        expenses: vec![Expense {
            id: 1,
            category: ExpenseCategory::Fuel,
            amount: Decimal::new(12050, 2),
            date: today,
            description: None,
            farm_id: 1,
        }],
        weather: Some(weather()),
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

// ============================================================================
// Farms
// ============================================================================

#[cfg(test)]
mod farm_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_farm_assigns_id_and_defaults_fields() {
        let app = app_with(Seed::default());
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/farms",
            Some(json!({ "name": "Hilltop", "location": "Boise, ID", "size": "25" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["Id"], 1);
        assert_eq!(body["fields"], json!([]));
        assert_eq!(body["sizeUnit"], "acres");
    }

    #[tokio::test]
    async fn test_create_farm_rejects_invalid_form() {
        let app = app_with(Seed::default());
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/farms",
            Some(json!({ "name": "  ", "location": "Boise, ID", "size": "-4" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["fields"]["name"].is_string());
        assert!(body["error"]["fields"]["size"].is_string());
        assert!(body["error"]["fields"].get("location").is_none());

        let (_, farms) = send(&app, Method::GET, "/api/v1/farms", None).await;
        assert_eq!(farms, json!([]));
    }

    #[tokio::test]
    async fn test_update_farm_merges_fields() {
        let app = app_with(single_record_seed(services::today()));
        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/farms/1",
            Some(json!({ "location": "Monterey, CA" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["Id"], 1);
        assert_eq!(body["name"], "Green Valley");
        assert_eq!(body["location"], "Monterey, CA");
        assert_eq!(body["fields"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_404() {
        let app = app_with(single_record_seed(services::today()));
        let (status, _) = send(&app, Method::DELETE, "/api/v1/farms/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, Method::GET, "/api/v1/farms/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Farm not found");

        let (status, _) = send(&app, Method::DELETE, "/api/v1/farms/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_farm_overview_counts_crops() {
        let app = app_with(single_record_seed(services::today()));
        let (status, body) = send(&app, Method::GET, "/api/v1/farms/overview", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["fieldCount"], 1);
        assert_eq!(body[0]["cropCount"], 1);
        assert_eq!(body[0]["fieldPreview"], json!(["North Field"]));
    }
}

// ============================================================================
// Crops
// ============================================================================

#[cfg(test)]
mod crop_tests {
    use super::*;

    #[tokio::test]
    async fn test_crop_overview_uses_unknown_for_deleted_farm() {
        let app = app_with(single_record_seed(services::today()));
        send(&app, Method::DELETE, "/api/v1/farms/1", None).await;

        let (status, body) = send(&app, Method::GET, "/api/v1/crops/overview", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["located"], false);
        assert_eq!(body[0]["location"]["farmName"], "Unknown");
        assert_eq!(body[0]["location"]["fieldSize"], "0");
        assert_eq!(body[0]["daysPlanted"], 30);
        assert_eq!(body[0]["daysToHarvest"], 60);
    }

    #[tokio::test]
    async fn test_crop_list_filter_and_unknown_key() {
        let app = app_with(single_record_seed(services::today()));

        let (status, body) = send(&app, Method::GET, "/api/v1/crops?filter=active", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["crops"].as_array().unwrap().len(), 1);
        assert_eq!(body["filter"], "active");

        let (status, body) = send(&app, Method::GET, "/api/v1/crops?filter=harvested", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["crops"], json!([]));

        let (status, body) = send(&app, Method::GET, "/api/v1/crops?filter=wilted", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_create_crop_requires_harvest_after_planting() {
        let app = app_with(Seed::default());
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/crops",
            Some(json!({
                "type": "wheat",
                "fieldId": "north",
                "plantingDate": "2024-05-10",
                "expectedHarvest": "2024-05-01"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["fields"]["expectedHarvest"].is_string());
    }

    #[tokio::test]
    async fn test_crop_status_can_move_backwards() {
        let app = app_with(single_record_seed(services::today()));
        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/crops/1",
            Some(json!({ "status": "harvested" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "harvested");

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/crops/1",
            Some(json!({ "status": "planted" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "planted");
    }

    #[tokio::test]
    async fn test_update_crop_null_clears_expected_harvest() {
        let app = app_with(single_record_seed(services::today()));
        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/crops/1",
            Some(json!({ "expectedHarvest": null })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["expectedHarvest"].is_null());
        assert_eq!(body["status"], "growing");

        let (_, body) = send(&app, Method::GET, "/api/v1/crops/1", None).await;
        assert!(body["expectedHarvest"].is_null());
    }
}

// ============================================================================
// Tasks and Expenses
// ============================================================================

#[cfg(test)]
mod task_expense_tests {
    use super::*;

    #[tokio::test]
    async fn test_toggle_task_flips_completed() {
        let app = app_with(single_record_seed(services::today()));

        let (status, body) = send(&app, Method::POST, "/api/v1/tasks/1/toggle", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["completed"], true);

        let (_, body) = send(&app, Method::POST, "/api/v1/tasks/1/toggle", None).await;
        assert_eq!(body["completed"], false);

        let (status, _) = send(&app, Method::POST, "/api/v1/tasks/9/toggle", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_task_view_stats_and_filters() {
        let app = app_with(single_record_seed(services::today()));

        let (status, body) = send(&app, Method::GET, "/api/v1/tasks?filter=today&sort=priority", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tasks"].as_array().unwrap().len(), 1);
        assert_eq!(body["stats"]["pending"], 1);
        assert_eq!(body["stats"]["today"], 1);

        let (status, _) = send(&app, Method::GET, "/api/v1/tasks?sort=name", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_task_view_priority_counts() {
        let app = app_with(single_record_seed(services::today()));
        let (status, body) = send(&app, Method::GET, "/api/v1/tasks", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["priorityCounts"],
            json!([
                { "priority": "high", "count": 1 },
                { "priority": "medium", "count": 0 },
                { "priority": "low", "count": 0 }
            ])
        );
    }

    #[tokio::test]
    async fn test_empty_selectors_fall_back_to_defaults() {
        let app = app_with(single_record_seed(services::today()));
        let (status, body) = send(&app, Method::GET, "/api/v1/tasks?filter=&sort=", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["filter"], "all");
        assert_eq!(body["sort"], "dueDate");
    }

    #[tokio::test]
    async fn test_update_task_null_detaches_crop() {
        let app = app_with(single_record_seed(services::today()));
        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/tasks/1",
            Some(json!({ "cropId": null })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["cropId"].is_null());
        assert_eq!(body["title"], "Irrigate");

        let (_, body) = send(&app, Method::PUT, "/api/v1/tasks/1", Some(json!({ "priority": "low" }))).await;
        assert!(body["cropId"].is_null());
        assert_eq!(body["priority"], "low");
    }

    #[tokio::test]
    async fn test_create_task_and_expense_ids_follow_seed() {
        let today = services::today();
        let app = app_with(single_record_seed(today));

        let (status, task) = send(
            &app,
            Method::POST,
            "/api/v1/tasks",
            Some(json!({
                "title": "Check fences",
                "type": "maintenance",
                "dueDate": today.to_string(),
                "priority": "low"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(task["Id"], 2);
        assert_eq!(task["completed"], false);

        let (status, expense) = send(
            &app,
            Method::POST,
            "/api/v1/expenses",
            Some(json!({
                "category": "labor",
                "amount": "300",
                "date": today.to_string(),
                "farmId": 1
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(expense["Id"], 2);
    }

    #[tokio::test]
    async fn test_create_expense_rejects_zero_amount() {
        let app = app_with(Seed::default());
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/expenses",
            Some(json!({ "category": "fuel", "amount": "0", "date": "2024-05-01", "farmId": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["fields"]["amount"].is_string());
    }

    #[tokio::test]
    async fn test_expense_view_unknown_farm_name() {
        let app = app_with(single_record_seed(services::today()));
        send(&app, Method::DELETE, "/api/v1/farms/1", None).await;

        let (status, body) = send(&app, Method::GET, "/api/v1/expenses?filter=thisMonth", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["expenses"][0]["farmName"], "Unknown Farm");
        assert_eq!(body["summary"]["monthlyTotal"], "120.50");
    }
}

// ============================================================================
// Dashboard, Weather and Health
// ============================================================================

#[cfg(test)]
mod dashboard_tests {
    use super::*;

    #[tokio::test]
    async fn test_dashboard_single_record_scenario() {
        let app = app_with(single_record_seed(services::today()));
        let (status, body) = send(&app, Method::GET, "/api/v1/dashboard", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["totalFarms"], 1);
        assert_eq!(body["stats"]["activeCrops"], 1);
        assert_eq!(body["stats"]["pendingTasks"], 1);
        assert_eq!(body["stats"]["monthlyExpenses"], "120.50");
        assert_eq!(body["todaysTasks"].as_array().unwrap().len(), 1);
        assert_eq!(body["weather"]["location"], "Fresno, CA");
    }

    #[tokio::test]
    async fn test_dashboard_without_weather() {
        let mut seed = single_record_seed(services::today());
        seed.weather = None;
        let app = app_with(seed);

        let (status, body) = send(&app, Method::GET, "/api/v1/dashboard", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["weather"].is_null());

        let (status, body) = send(&app, Method::GET, "/api/v1/weather/current", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "WEATHER_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_weather_endpoints() {
        let app = app_with(single_record_seed(services::today()));

        let (status, body) = send(&app, Method::GET, "/api/v1/weather", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["forecast"].as_array().unwrap().len(), 1);

        let (status, body) = send(&app, Method::GET, "/api/v1/weather/forecast", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["day"], "Today");

        let (status, body) = send(&app, Method::GET, "/api/v1/weather/alerts?active=true", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_health_reports_counts() {
        let app = app_with(single_record_seed(services::today()));
        let (status, body) = send(&app, Method::GET, "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["records"]["farms"], 1);
        assert_eq!(body["weather"], "loaded");
    }
}
