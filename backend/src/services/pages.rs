//! Page-level loads
//!
//! Each page fetches every collection it needs concurrently, fails as a
//! whole if any fetch fails, then hands the slices to the derived-state
//! functions in `shared`.

use chrono::NaiveDate;
use serde::Serialize;
use shared::calendar::WeekStart;
use shared::dashboard::{compute_dashboard, farm_name, farm_overviews, DashboardStats, FarmOverview};
use shared::finance::{finance_overview, FinanceOverview, TransactionFilter};
use shared::tasks::{task_board, TaskBoard, TaskFilter};
use shared::{Crop, Weather};

use crate::error::AppResult;
use crate::services::{CropService, FarmService, TaskService, TransactionService, WeatherService};
use crate::storage::RecordStore;

/// Dashboard figures plus the weather card
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPage {
    #[serde(flatten)]
    pub stats: DashboardStats,
    pub weather: Weather,
}

/// A crop table row with its farm name
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRow {
    #[serde(flatten)]
    pub crop: Crop,
    pub farm_name: String,
}

#[derive(Clone)]
pub struct PageService {
    store: RecordStore,
    weather: WeatherService,
    week_start: WeekStart,
}

impl PageService {
    pub fn new(store: RecordStore, weather: WeatherService) -> Self {
        Self {
            store,
            weather,
            week_start: WeekStart::default(),
        }
    }

    fn farms(&self) -> FarmService {
        FarmService::new(self.store.clone())
    }

    fn crops(&self) -> CropService {
        CropService::new(self.store.clone())
    }

    fn tasks(&self) -> TaskService {
        TaskService::new(self.store.clone())
    }

    fn transactions(&self) -> TransactionService {
        TransactionService::new(self.store.clone())
    }

    pub async fn dashboard(&self, today: NaiveDate) -> AppResult<DashboardPage> {
        let (farm_service, crop_service) = (self.farms(), self.crops());
        let (task_service, transaction_service) = (self.tasks(), self.transactions());
        let (farms, crops, tasks, transactions, weather) = tokio::try_join!(
            farm_service.get_all(),
            crop_service.get_all(),
            task_service.get_all(),
            transaction_service.get_all(),
            self.weather.get_current_weather(),
        )?;

        tracing::debug!(
            "Dashboard load: {} farms, {} crops, {} tasks, {} transactions",
            farms.len(),
            crops.len(),
            tasks.len(),
            transactions.len()
        );

        let stats = compute_dashboard(&farms, &crops, &tasks, &transactions, today, self.week_start);
        Ok(DashboardPage { stats, weather })
    }

    /// Farm cards with their active crop counts
    pub async fn farm_cards(&self) -> AppResult<Vec<FarmOverview>> {
        let (farm_service, crop_service) = (self.farms(), self.crops());
        let (farms, crops) = tokio::try_join!(farm_service.get_all(), crop_service.get_all())?;
        Ok(farm_overviews(&farms, &crops))
    }

    pub async fn crop_rows(&self) -> AppResult<Vec<CropRow>> {
        let (farm_service, crop_service) = (self.farms(), self.crops());
        let (farms, crops) = tokio::try_join!(farm_service.get_all(), crop_service.get_all())?;
        Ok(crops
            .into_iter()
            .map(|crop| {
                let farm_name = farm_name(&farms, crop.farm_id).to_string();
                CropRow { crop, farm_name }
            })
            .collect())
    }

    pub async fn task_board(&self, filter: TaskFilter, today: NaiveDate) -> AppResult<TaskBoard> {
        let tasks = self.tasks().get_all().await?;
        Ok(task_board(&tasks, filter, today, self.week_start))
    }

    pub async fn finances(&self, filter: TransactionFilter) -> AppResult<FinanceOverview> {
        let (farm_service, transaction_service) = (self.farms(), self.transactions());
        let (farms, transactions) =
            tokio::try_join!(farm_service.get_all(), transaction_service.get_all())?;
        Ok(finance_overview(&farms, &transactions, filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::weather::WeatherFixture;
    use crate::storage::{mapping, Latency, MockStore};
    use rust_decimal::Decimal;
    use serde_json::{json, Map, Value};
    use shared::WeatherCondition;

    fn row(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    async fn service() -> PageService {
        let mock = MockStore::instant();
        mock.seed(
            &mapping::FARM,
            vec![row(json!({ "Id": 1, "name": "North", "size": 10, "location": "Davis" }))],
        )
        .await;
        mock.seed(
            &mapping::CROP,
            vec![
                row(json!({
                    "Id": 1, "farmId": 1, "cropType": "Corn", "field": "A",
                    "plantingDate": "2024-04-01", "expectedHarvest": "2024-09-01", "status": "growing"
                })),
                row(json!({
                    "Id": 2, "farmId": 8, "cropType": "Wheat", "field": "B",
                    "plantingDate": "2024-01-01", "expectedHarvest": "2024-06-01", "status": "harvested"
                })),
            ],
        )
        .await;
        mock.seed(
            &mapping::TRANSACTION,
            vec![
                row(json!({
                    "Id": 1, "farmId": 1, "type": "income", "category": "Crop Sales",
                    "amount": 300, "date": "2024-06-03"
                })),
                row(json!({
                    "Id": 2, "farmId": 1, "type": "expense", "category": "Fuel",
                    "amount": -120, "date": "2024-06-05"
                })),
            ],
        )
        .await;

        let weather = WeatherService::new(
            WeatherFixture {
                current: Weather {
                    location: "Davis".to_string(),
                    temperature: Decimal::from(70),
                    condition: WeatherCondition::Sunny,
                    humidity: 40,
                    wind_speed: Decimal::from(5),
                    forecast: vec![],
                },
                forecast: vec![],
            },
            Latency::none(),
        );
        PageService::new(RecordStore::Mock(mock), weather)
    }

    #[tokio::test]
    async fn test_dashboard_joins_every_collection() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let page = service().await.dashboard(today).await.unwrap();
        assert_eq!(page.stats.total_farms, 1);
        assert_eq!(page.stats.active_crops, 1);
        assert_eq!(page.stats.net_income, Decimal::from(180));
        assert_eq!(page.weather.location, "Davis");
    }

    #[tokio::test]
    async fn test_crop_rows_and_farm_cards() {
        let pages = service().await;

        let rows = pages.crop_rows().await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.farm_name.as_str()).collect();
        assert_eq!(names, vec!["Unknown Farm", "North"]);

        let cards = pages.farm_cards().await.unwrap();
        assert_eq!(cards[0].active_crops, 1);
    }

    #[tokio::test]
    async fn test_finances_filter_rows_only() {
        let filter = TransactionFilter {
            farm_id: None,
            kind: Some(shared::TransactionType::Expense),
        };
        let overview = service().await.finances(filter).await.unwrap();
        assert_eq!(overview.transactions.len(), 1);
        assert_eq!(overview.totals.net, Decimal::from(180));
    }
}
