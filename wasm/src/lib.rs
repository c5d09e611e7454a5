//! WebAssembly module for the Farmkeep record keeper
//!
//! Lets the browser run the same form checks and derived views as the
//! server over collections it already holds:
//! - Form validation for farms, crops, tasks and expenses
//! - Task, expense and crop list views with filters and sorts
//! - Dashboard aggregation
//!
//! Inputs and outputs are JSON strings. Dates are `YYYY-MM-DD`; when no date
//! is passed, "today" comes from the browser clock.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    crop_overview, dashboard_view, expense_view, farm_overview, filter_crops, sort_crops,
    task_view, validate_crop_form, validate_expense_form, validate_farm_form, validate_task_form,
    CreateCropInput, CreateExpenseInput, CreateFarmInput, CreateTaskInput, Crop, CropFilter,
    CropSort, CurrentWeather, Expense, ExpenseFilter, ExpenseSort, Farm, FormErrors, Task,
    TaskFilter, TaskSort,
};
use wasm_bindgen::prelude::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("farmkeep-wasm ready"));
}

fn parse<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| {
        let message = format!("Invalid {} JSON: {}", what, e);
        web_sys::console::warn_1(&JsValue::from_str(&message));
        JsValue::from_str(&message)
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn selector<T: FromStr<Err = shared::UnknownSelector> + Default>(key: Option<String>) -> Result<T, JsValue> {
    match key.as_deref() {
        None | Some("") => Ok(T::default()),
        Some(key) => key.parse().map_err(|e: shared::UnknownSelector| JsValue::from_str(&e.to_string())),
    }
}

fn resolve_today(today: Option<String>) -> Result<NaiveDate, JsValue> {
    match today {
        Some(iso) => NaiveDate::parse_from_str(&iso, "%Y-%m-%d")
            .map_err(|e| JsValue::from_str(&format!("Invalid date `{}`: {}", iso, e))),
        None => {
            let now = js_sys::Date::new_0();
            NaiveDate::from_ymd_opt(
                now.get_full_year() as i32,
                now.get_month() + 1,
                now.get_date(),
            )
            .ok_or_else(|| JsValue::from_str("Browser clock returned an invalid date"))
        }
    }
}

fn form_result(errors: FormErrors) -> Result<String, JsValue> {
    to_json(&errors)
}

// ============================================================================
// Form Validation
// ============================================================================

/// Field-keyed errors for a farm form; `{}` when valid
#[wasm_bindgen]
pub fn validate_farm_json(input_json: &str) -> Result<String, JsValue> {
    let input: CreateFarmInput = parse("farm", input_json)?;
    form_result(validate_farm_form(&input))
}

#[wasm_bindgen]
pub fn validate_crop_json(input_json: &str) -> Result<String, JsValue> {
    let input: CreateCropInput = parse("crop", input_json)?;
    form_result(validate_crop_form(&input))
}

#[wasm_bindgen]
pub fn validate_task_json(input_json: &str) -> Result<String, JsValue> {
    let input: CreateTaskInput = parse("task", input_json)?;
    form_result(validate_task_form(&input))
}

#[wasm_bindgen]
pub fn validate_expense_json(input_json: &str) -> Result<String, JsValue> {
    let input: CreateExpenseInput = parse("expense", input_json)?;
    form_result(validate_expense_form(&input))
}

// ============================================================================
// Views
// ============================================================================

/// Filtered, sorted tasks with stats. Unknown filter or sort keys are errors.
#[wasm_bindgen]
pub fn task_view_json(
    tasks_json: &str,
    filter: Option<String>,
    sort: Option<String>,
    today: Option<String>,
) -> Result<String, JsValue> {
    let tasks: Vec<Task> = parse("tasks", tasks_json)?;
    let filter: TaskFilter = selector(filter)?;
    let sort: TaskSort = selector(sort)?;
    to_json(&task_view(&tasks, filter, sort, resolve_today(today)?))
}

#[wasm_bindgen]
pub fn expense_view_json(
    expenses_json: &str,
    farms_json: &str,
    filter: Option<String>,
    sort: Option<String>,
    today: Option<String>,
) -> Result<String, JsValue> {
    let expenses: Vec<Expense> = parse("expenses", expenses_json)?;
    let farms: Vec<Farm> = parse("farms", farms_json)?;
    let filter: ExpenseFilter = selector(filter)?;
    let sort: ExpenseSort = selector(sort)?;
    to_json(&expense_view(&expenses, &farms, filter, sort, resolve_today(today)?))
}

#[wasm_bindgen]
pub fn crop_list_json(
    crops_json: &str,
    filter: Option<String>,
    sort: Option<String>,
) -> Result<String, JsValue> {
    let crops: Vec<Crop> = parse("crops", crops_json)?;
    let filter: CropFilter = selector(filter)?;
    let sort: CropSort = selector(sort)?;
    to_json(&sort_crops(&filter_crops(&crops, filter), sort))
}

/// Crops joined with their fields; missing fields show as "Unknown"
#[wasm_bindgen]
pub fn crop_overview_json(
    crops_json: &str,
    farms_json: &str,
    today: Option<String>,
) -> Result<String, JsValue> {
    let crops: Vec<Crop> = parse("crops", crops_json)?;
    let farms: Vec<Farm> = parse("farms", farms_json)?;
    to_json(&crop_overview(&crops, &farms, resolve_today(today)?))
}

#[wasm_bindgen]
pub fn farm_overview_json(farms_json: &str, crops_json: &str) -> Result<String, JsValue> {
    let farms: Vec<Farm> = parse("farms", farms_json)?;
    let crops: Vec<Crop> = parse("crops", crops_json)?;
    to_json(&farm_overview(&farms, &crops))
}

#[wasm_bindgen]
pub fn dashboard_json(
    farms_json: &str,
    crops_json: &str,
    tasks_json: &str,
    expenses_json: &str,
    weather_json: Option<String>,
    today: Option<String>,
) -> Result<String, JsValue> {
    let farms: Vec<Farm> = parse("farms", farms_json)?;
    let crops: Vec<Crop> = parse("crops", crops_json)?;
    let tasks: Vec<Task> = parse("tasks", tasks_json)?;
    let expenses: Vec<Expense> = parse("expenses", expenses_json)?;
    let weather: Option<CurrentWeather> = match weather_json.as_deref() {
        Some(json) => Some(parse("weather", json)?),
        None => None,
    };
    to_json(&dashboard_view(
        &farms,
        &crops,
        &tasks,
        &expenses,
        weather,
        resolve_today(today)?,
    ))
}

/// Format a decimal amount as dollars with two places, e.g. `$1204.50`
#[wasm_bindgen]
pub fn format_amount(amount: &str) -> Result<String, JsValue> {
    let value = Decimal::from_str(amount.trim())
        .map_err(|e| JsValue::from_str(&format!("Invalid amount `{}`: {}", amount, e)))?;
    Ok(format!("${:.2}", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const TODAY: &str = "2024-05-15";

    fn today() -> Option<String> {
        Some(TODAY.to_string())
    }

    #[test]
    fn test_validate_farm_json_reports_fields() {
        let out = validate_farm_json(r#"{"name":"","location":"Ames","size":"0"}"#).unwrap();
        let errors: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(errors["name"], "Farm name is required");
        assert_eq!(errors["size"], "Please enter a valid size");
        assert!(errors.get("location").is_none());

        let ok = validate_farm_json(r#"{"name":"North","location":"Ames","size":"12"}"#).unwrap();
        assert_eq!(ok, "{}");
    }

    #[test]
    fn test_task_view_json_filters_and_sorts() {
        let tasks = r#"[
            {"Id":1,"title":"A","type":"watering","dueDate":"2024-05-15","priority":"low","cropId":null,"completed":false},
            {"Id":2,"title":"B","type":"weeding","dueDate":"2024-05-15","priority":"high","cropId":null,"completed":false},
            {"Id":3,"title":"C","type":"weeding","dueDate":"2024-05-01","priority":"high","cropId":null,"completed":true}
        ]"#;
        let out = task_view_json(tasks, Some("today".into()), Some("priority".into()), today()).unwrap();
        let view: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(view["tasks"][0]["Id"], 2);
        assert_eq!(view["tasks"][1]["Id"], 1);
        assert_eq!(view["stats"]["completed"], 1);
        assert_eq!(view["filter"], "today");
    }

    #[test]
    fn test_default_selectors() {
        let out = task_view_json("[]", None, Some(String::new()), today()).unwrap();
        let view: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(view["filter"], "all");
        assert_eq!(view["sort"], "dueDate");
    }

    #[test]
    fn test_expense_view_json_unknown_farm() {
        let expenses = r#"[{"Id":1,"category":"fuel","amount":"40.00","date":"2024-05-02","farmId":9}]"#;
        let out = expense_view_json(expenses, "[]", Some("thisMonth".into()), None, today()).unwrap();
        let view: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(view["expenses"][0]["farmName"], "Unknown Farm");
        assert_eq!(view["summary"]["monthlyTotal"], "40.00");
    }

    #[test]
    fn test_crop_overview_json_sentinel() {
        let crops = r#"[{"Id":1,"type":"corn","fieldId":"gone","plantingDate":"2024-05-05","expectedHarvest":null,"status":"growing"}]"#;
        let out = crop_overview_json(crops, "[]", today()).unwrap();
        let overview: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(overview[0]["location"]["fieldName"], "Unknown");
        assert_eq!(overview[0]["daysPlanted"], 10);
    }

    #[test]
    fn test_dashboard_json_counts() {
        let farms = r#"[{"Id":1,"name":"F","location":"L","size":"10"}]"#;
        let crops = r#"[{"Id":1,"type":"corn","fieldId":"x","plantingDate":"2024-04-01","expectedHarvest":null,"status":"growing"}]"#;
        let tasks = r#"[{"Id":1,"title":"T","type":"other","dueDate":"2024-05-15","priority":"high","cropId":null,"completed":false}]"#;
        let expenses = r#"[{"Id":1,"category":"fuel","amount":"120.50","date":"2024-05-15","farmId":1}]"#;
        let out = dashboard_json(farms, crops, tasks, expenses, None, today()).unwrap();
        let view: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(view["stats"]["totalFarms"], 1);
        assert_eq!(view["stats"]["activeCrops"], 1);
        assert_eq!(view["stats"]["pendingTasks"], 1);
        assert_eq!(view["stats"]["monthlyExpenses"], "120.50");
        assert!(view["weather"].is_null());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount("120.5").unwrap(), "$120.50");
        assert_eq!(format_amount(" 7 ").unwrap(), "$7.00");
    }

    #[test]
    fn test_explicit_today_parses() {
        assert_eq!(
            resolve_today(today()).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
        );
    }
}
