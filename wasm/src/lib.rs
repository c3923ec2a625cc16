//! WebAssembly module for the Farm Dashboard
//!
//! Provides client-side computation of the same derived values the backend
//! page endpoints serve:
//! - Dashboard figures and the finance overview
//! - Task board filtering and grouping
//! - Crop growth timelines
//! - Weather tips and form validation
//!
//! Every export takes and returns JSON in the UI shape.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use shared::calendar::WeekStart;
use shared::dashboard::compute_dashboard;
use shared::finance::{finance_overview, monthly_chart_series, TransactionFilter};
use shared::tasks::{task_board, TaskFilter};
use shared::timeline::crop_detail;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("farm dashboard wasm ready"));
}

fn parse<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    flexible_date::parse(raw).ok_or_else(|| format!("Invalid date: {}", raw))
}

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

fn dashboard_json(
    farms: &str,
    crops: &str,
    tasks: &str,
    transactions: &str,
    today: &str,
) -> Result<String, String> {
    let farms: Vec<Farm> = parse(farms, "farms")?;
    let crops: Vec<Crop> = parse(crops, "crops")?;
    let tasks: Vec<Task> = parse(tasks, "tasks")?;
    let transactions: Vec<Transaction> = parse(transactions, "transactions")?;
    let today = parse_day(today)?;

    let stats = compute_dashboard(
        &farms,
        &crops,
        &tasks,
        &transactions,
        today,
        WeekStart::default(),
    );
    to_json(&stats)
}

/// Dashboard figures for `today` (`YYYY-MM-DD`)
#[wasm_bindgen]
pub fn dashboard_stats(
    farms_json: &str,
    crops_json: &str,
    tasks_json: &str,
    transactions_json: &str,
    today: &str,
) -> Result<String, JsValue> {
    dashboard_json(farms_json, crops_json, tasks_json, transactions_json, today).map_err(js_err)
}

fn board_json(tasks: &str, filter: &str, today: &str) -> Result<String, String> {
    let tasks: Vec<Task> = parse(tasks, "tasks")?;
    let filter = if filter.trim().is_empty() {
        TaskFilter::default()
    } else {
        filter.parse::<TaskFilter>().map_err(|e| e.to_string())?
    };
    let today = parse_day(today)?;
    to_json(&task_board(&tasks, filter, today, WeekStart::default()))
}

/// Filtered task board; an empty filter means pending
#[wasm_bindgen]
pub fn task_board_view(tasks_json: &str, filter: &str, today: &str) -> Result<String, JsValue> {
    board_json(tasks_json, filter, today).map_err(js_err)
}

fn finances_json(farms: &str, transactions: &str, filter: &str) -> Result<String, String> {
    let farms: Vec<Farm> = parse(farms, "farms")?;
    let transactions: Vec<Transaction> = parse(transactions, "transactions")?;
    let filter: TransactionFilter = if filter.trim().is_empty() {
        TransactionFilter::default()
    } else {
        parse(filter, "filter")?
    };
    to_json(&finance_overview(&farms, &transactions, filter))
}

/// Totals, chart series and filtered rows for the finances page.
/// `filter_json` is `{"farmId": 1, "type": "expense"}` with either key optional.
#[wasm_bindgen]
pub fn finance_view(
    farms_json: &str,
    transactions_json: &str,
    filter_json: &str,
) -> Result<String, JsValue> {
    finances_json(farms_json, transactions_json, filter_json).map_err(js_err)
}

/// Monthly income/expense series for the chart
#[wasm_bindgen]
pub fn chart_series(transactions_json: &str) -> Result<String, JsValue> {
    let transactions: Vec<Transaction> =
        parse(transactions_json, "transactions").map_err(js_err)?;
    to_json(&monthly_chart_series(&transactions)).map_err(js_err)
}

fn detail_json(crop: &str, farms: &str, today: &str) -> Result<String, String> {
    let crop: Crop = parse(crop, "crop")?;
    let farms: Vec<Farm> = parse(farms, "farms")?;
    let year = parse_day(today)?.year();
    to_json(&crop_detail(crop, &farms, year))
}

/// Crop detail with growth timeline, progress and yield history
#[wasm_bindgen]
pub fn crop_detail_view(crop_json: &str, farms_json: &str, today: &str) -> Result<String, JsValue> {
    detail_json(crop_json, farms_json, today).map_err(js_err)
}

#[derive(Serialize)]
struct Tip {
    kind: WeatherTip,
    message: &'static str,
}

fn tips_json(weather: &str) -> Result<String, String> {
    let weather: Weather = parse(weather, "weather")?;
    let tips: Vec<Tip> = weather_tips(&weather)
        .into_iter()
        .map(|kind| Tip {
            kind,
            message: kind.message(),
        })
        .collect();
    to_json(&tips)
}

/// Field-work tips for the given conditions
#[wasm_bindgen]
pub fn weather_tips_view(weather_json: &str) -> Result<String, JsValue> {
    tips_json(weather_json).map_err(js_err)
}

fn transaction_errors(input: &str) -> Result<String, String> {
    let input: NewTransaction = parse(input, "transaction")?;
    let errors = check_new_transaction(&input).err().unwrap_or_default();
    to_json(&errors)
}

/// Field errors for a transaction form; an empty array means valid
#[wasm_bindgen]
pub fn validate_transaction(input_json: &str) -> Result<String, JsValue> {
    transaction_errors(input_json).map_err(js_err)
}

/// The browser's local calendar date as `YYYY-MM-DD`
#[wasm_bindgen]
pub fn local_today() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date()
    )
}

/// Money display with two fraction digits
#[wasm_bindgen]
pub fn format_money(amount: f64) -> String {
    let amount = Decimal::try_from(amount).unwrap_or(Decimal::ZERO);
    format_amount(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn tasks() -> String {
        json!([
            { "Id": 1, "farmId": 1, "title": "Water", "type": "watering", "dueDate": "2024-06-12", "priority": "high", "completed": false },
            { "Id": 2, "farmId": 1, "title": "Weed", "type": "weeding", "dueDate": "2024-06-14", "priority": "low", "completed": false },
            { "Id": 3, "farmId": 1, "title": "Fix pump", "type": "maintenance", "dueDate": "2024-06-01", "priority": "low", "completed": true }
        ])
        .to_string()
    }

    #[test]
    fn test_task_board_groups_by_timeframe() {
        let board: Value =
            serde_json::from_str(&board_json(&tasks(), "week", "2024-06-12").unwrap()).unwrap();
        assert_eq!(board["total"], 2);
        assert_eq!(board["groups"][0]["timeframe"], "Today");
        assert_eq!(board["groups"][1]["timeframe"], "This Week");
    }

    #[test]
    fn test_empty_filter_is_pending_list() {
        let board: Value =
            serde_json::from_str(&board_json(&tasks(), "", "2024-06-12").unwrap()).unwrap();
        assert_eq!(board["filter"], "pending");
        assert_eq!(board["groups"].as_array().unwrap().len(), 1);
        assert!(board["groups"][0]["timeframe"].is_null());
    }

    #[test]
    fn test_task_board_rejects_unknown_filter() {
        assert!(board_json(&tasks(), "later", "2024-06-12").is_err());
    }

    #[test]
    fn test_dashboard_counts() {
        let farms = json!([{ "Id": 1, "name": "North", "size": 10, "location": "Here" }]).to_string();
        let crops = json!([]).to_string();
        let transactions = json!([
            { "Id": 1, "farmId": 1, "type": "income", "category": "Crop Sales", "amount": 500, "date": "2024-06-03" },
            { "Id": 2, "farmId": 1, "type": "expense", "category": "Fuel", "amount": -120.5, "date": "2024-06-08" }
        ])
        .to_string();

        let stats: Value = serde_json::from_str(
            &dashboard_json(&farms, &crops, &tasks(), &transactions, "2024-06-12").unwrap(),
        )
        .unwrap();
        assert_eq!(stats["totalFarms"], 1);
        assert_eq!(stats["pendingTasks"], 2);
        assert_eq!(stats["netIncomeDisplay"], "379.50");
    }

    #[test]
    fn test_finance_filter_by_type() {
        let farms = json!([]).to_string();
        let transactions = json!([
            { "Id": 1, "farmId": 1, "type": "income", "category": "Crop Sales", "amount": 500, "date": "2024-06-03" },
            { "Id": 2, "farmId": 2, "type": "expense", "category": "Fuel", "amount": -80, "date": "2024-05-08" }
        ])
        .to_string();

        let view: Value = serde_json::from_str(
            &finances_json(&farms, &transactions, r#"{"type":"expense"}"#).unwrap(),
        )
        .unwrap();
        assert_eq!(view["transactions"].as_array().unwrap().len(), 1);
        assert_eq!(view["transactions"][0]["farmName"], "Unknown Farm");
        assert_eq!(view["chart"]["categories"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_crop_detail_uses_year_of_today() {
        let crop = json!({
            "Id": 7, "farmId": 1, "cropType": "Corn", "field": "North",
            "plantingDate": "2024-04-10", "expectedHarvest": "2024-09-15", "status": "growing"
        })
        .to_string();
        let detail: Value = serde_json::from_str(&detail_json(&crop, "[]", "2024-06-12").unwrap()).unwrap();
        let years: Vec<i64> = detail["yieldHistory"]
            .as_array()
            .unwrap()
            .iter()
            .map(|y| y["year"].as_i64().unwrap())
            .collect();
        assert_eq!(years.last(), Some(&2024));
        assert_eq!(detail["farmName"], "Unknown Farm");
    }

    #[test]
    fn test_rainy_weather_tip() {
        let weather = json!({
            "location": "Fresno", "temperature": 70, "condition": "rainy",
            "humidity": 50, "windSpeed": 5
        })
        .to_string();
        let tips: Value = serde_json::from_str(&tips_json(&weather).unwrap()).unwrap();
        assert_eq!(tips[0]["kind"], "rain_expected");
    }

    #[test]
    fn test_transaction_sign_is_checked() {
        let input = json!({
            "farmId": 1, "type": "expense", "category": "Fuel", "amount": 40, "date": "2024-06-01"
        })
        .to_string();
        let errors: Value = serde_json::from_str(&transaction_errors(&input).unwrap()).unwrap();
        assert_eq!(errors[0]["fieldLabel"], "amount");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.5), "1234.50");
        assert_eq!(format_money(-3.0), "-3.00");
    }
}
