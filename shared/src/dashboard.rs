//! Dashboard aggregation
//!
//! Headline figures for the dashboard page, computed from the latest copy of
//! every entity collection.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::{is_same_month, is_same_week, WeekStart};
use crate::finance::{totals, Totals};
use crate::models::{Crop, Farm, Task, Transaction};
use crate::types::{format_amount, RecordId, UNKNOWN_FARM};

/// Dashboard statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_farms: usize,
    pub active_crops: usize,
    pub pending_tasks: usize,
    pub todays_tasks: Vec<Task>,
    pub this_week_tasks: Vec<Task>,
    pub monthly_income: Decimal,
    /// Positive magnitude of this month's expenses
    pub monthly_expenses: Decimal,
    pub net_income: Decimal,
    /// `net_income` with two fraction digits
    pub net_income_display: String,
}

/// Compute the dashboard figures as of `today`
pub fn compute_dashboard(
    farms: &[Farm],
    crops: &[Crop],
    tasks: &[Task],
    transactions: &[Transaction],
    today: NaiveDate,
    week_start: WeekStart,
) -> DashboardStats {
    let pending = || tasks.iter().filter(|t| !t.completed);

    let todays_tasks: Vec<Task> = pending().filter(|t| t.due_date == today).cloned().collect();
    let this_week_tasks: Vec<Task> = pending()
        .filter(|t| is_same_week(t.due_date, today, week_start))
        .cloned()
        .collect();

    let month = monthly_totals(transactions, today);

    DashboardStats {
        total_farms: farms.len(),
        active_crops: crops.iter().filter(|c| c.is_active()).count(),
        pending_tasks: pending().count(),
        todays_tasks,
        this_week_tasks,
        monthly_income: month.income,
        monthly_expenses: month.expenses,
        net_income: month.net,
        net_income_display: format_amount(month.net),
    }
}

/// Income and expenses for the calendar month containing `today`
pub fn monthly_totals(transactions: &[Transaction], today: NaiveDate) -> Totals {
    totals(
        transactions
            .iter()
            .filter(|t| is_same_month(t.date, today)),
    )
}

/// Crops on one farm that have not been harvested yet
pub fn active_crops_for_farm(crops: &[Crop], farm_id: RecordId) -> usize {
    crops
        .iter()
        .filter(|c| c.farm_id == farm_id && c.is_active())
        .count()
}

/// Display name of a farm; dangling references resolve to [`UNKNOWN_FARM`]
pub fn farm_name(farms: &[Farm], farm_id: RecordId) -> &str {
    farms
        .iter()
        .find(|f| f.id == farm_id)
        .map(|f| f.name.as_str())
        .unwrap_or(UNKNOWN_FARM)
}

/// A farm card on the farms page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FarmOverview {
    #[serde(flatten)]
    pub farm: Farm,
    pub active_crops: usize,
}

pub fn farm_overviews(farms: &[Farm], crops: &[Crop]) -> Vec<FarmOverview> {
    farms
        .iter()
        .map(|farm| FarmOverview {
            farm: farm.clone(),
            active_crops: active_crops_for_farm(crops, farm.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropStatus, Priority, SizeUnit, TaskType, TransactionType};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn farm(id: RecordId, name: &str) -> Farm {
        Farm {
            id,
            name: name.to_string(),
            size: Decimal::from(40),
            size_unit: SizeUnit::Acres,
            location: "North Valley".to_string(),
            soil_type: None,
            farm_type: None,
            notes: None,
            contact_number: None,
            gps_coordinates: None,
            water_resource: None,
            machinery_available: None,
            created_at: None,
        }
    }

    fn crop(id: RecordId, farm_id: RecordId, status: CropStatus) -> Crop {
        Crop {
            id,
            farm_id,
            crop_type: "Corn".to_string(),
            field: "North Field".to_string(),
            planting_date: date(2024, 4, 1),
            expected_harvest: date(2024, 9, 1),
            status,
            season: None,
            crop_variety: None,
            germination_date: None,
            vegetative_date: None,
            flowering_date: None,
            timeline: None,
            yield_history: None,
        }
    }

    fn task(id: RecordId, due: NaiveDate, completed: bool) -> Task {
        Task {
            id,
            farm_id: 1,
            crop_id: None,
            title: format!("Task {}", id),
            task_type: TaskType::Watering,
            due_date: due,
            priority: Priority::Medium,
            completed,
        }
    }

    fn transaction(id: RecordId, amount: i64, on: NaiveDate) -> Transaction {
        Transaction {
            id,
            farm_id: 1,
            kind: if amount > 0 {
                TransactionType::Income
            } else {
                TransactionType::Expense
            },
            category: "Other".to_string(),
            amount: Decimal::from(amount),
            date: on,
            description: None,
        }
    }

    #[test]
    fn test_active_crops_excludes_harvested() {
        let farms = vec![farm(1, "A")];
        let crops = vec![crop(1, 1, CropStatus::Growing), crop(2, 1, CropStatus::Harvested)];
        let stats = compute_dashboard(&farms, &crops, &[], &[], date(2024, 6, 12), WeekStart::Sunday);
        assert_eq!(stats.total_farms, 1);
        assert_eq!(stats.active_crops, 1);
    }

    #[test]
    fn test_monthly_figures_exclude_other_months() {
        let today = date(2024, 6, 12);
        let transactions = vec![
            transaction(1, 100, date(2024, 6, 3)),
            transaction(2, -40, date(2024, 6, 10)),
            transaction(3, -60, date(2024, 5, 28)),
        ];
        let stats = compute_dashboard(&[], &[], &[], &transactions, today, WeekStart::Sunday);
        assert_eq!(stats.monthly_income, Decimal::from(100));
        assert_eq!(stats.monthly_expenses, Decimal::from(40));
        assert_eq!(stats.net_income, Decimal::from(60));
        assert_eq!(stats.net_income_display, "60.00");
    }

    #[test]
    fn test_task_counts() {
        let today = date(2024, 6, 12); // Wednesday
        let tasks = vec![
            task(1, today, false),
            task(2, today, true),
            task(3, date(2024, 6, 15), false),
            task(4, date(2024, 6, 16), false),
            task(5, date(2024, 6, 9), false),
        ];
        let stats = compute_dashboard(&[], &[], &tasks, &[], today, WeekStart::Sunday);
        assert_eq!(stats.pending_tasks, 4);
        let today_ids: Vec<_> = stats.todays_tasks.iter().map(|t| t.id).collect();
        assert_eq!(today_ids, vec![1]);
        let week_ids: Vec<_> = stats.this_week_tasks.iter().map(|t| t.id).collect();
        assert_eq!(week_ids, vec![1, 3, 5]);
    }

    #[test]
    fn test_farm_name_falls_back_for_deleted_farm() {
        let farms = vec![farm(1, "Green Acres")];
        assert_eq!(farm_name(&farms, 1), "Green Acres");
        assert_eq!(farm_name(&farms, 99), UNKNOWN_FARM);
    }

    #[test]
    fn test_farm_overviews_count_active_crops_per_farm() {
        let farms = vec![farm(1, "A"), farm(2, "B")];
        let crops = vec![
            crop(1, 1, CropStatus::Growing),
            crop(2, 1, CropStatus::Ready),
            crop(3, 2, CropStatus::Harvested),
        ];
        let overviews = farm_overviews(&farms, &crops);
        assert_eq!(overviews[0].active_crops, 2);
        assert_eq!(overviews[1].active_crops, 0);
    }
}
