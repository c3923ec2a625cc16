//! Weather service
//!
//! Serves a canned snapshot loaded from `weather.json`. There is no live
//! provider; location lookups reuse the snapshot with a perturbed
//! temperature.

use std::path::Path;
use std::sync::Arc;

use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{weather_tips, DailyForecast, Farm, Weather, WeatherTip};

use crate::error::{AppError, AppResult};
use crate::storage::Latency;

/// Forecast length served when the caller does not ask for one
pub const DEFAULT_FORECAST_DAYS: usize = 5;

/// Location used when a farm cannot be resolved
pub const DEFAULT_LOCATION: &str = "Default Location";

/// Shape of the weather fixture file
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherFixture {
    pub current: Weather,
    #[serde(default)]
    pub forecast: Vec<DailyForecast>,
}

/// A tip with its display text
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TipView {
    pub kind: WeatherTip,
    pub message: &'static str,
}

impl From<WeatherTip> for TipView {
    fn from(kind: WeatherTip) -> Self {
        Self {
            kind,
            message: kind.message(),
        }
    }
}

/// Weather plus the field-work tips it triggers
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    #[serde(flatten)]
    pub weather: Weather,
    pub tips: Vec<TipView>,
}

impl From<Weather> for WeatherReport {
    fn from(weather: Weather) -> Self {
        let tips = weather_tips(&weather).into_iter().map(TipView::from).collect();
        Self { weather, tips }
    }
}

#[derive(Clone)]
pub struct WeatherService {
    fixture: Arc<WeatherFixture>,
    latency: Latency,
}

impl WeatherService {
    pub fn new(fixture: WeatherFixture, latency: Latency) -> Self {
        Self {
            fixture: Arc::new(fixture),
            latency,
        }
    }

    /// Load the canned snapshot from a fixture file
    pub async fn from_fixture(path: impl AsRef<Path>, latency: Latency) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Configuration(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let fixture: WeatherFixture = serde_json::from_str(&raw).map_err(|e| {
            AppError::Configuration(format!("Malformed weather fixture {}: {}", path.display(), e))
        })?;
        tracing::info!(
            "Loaded weather for {} with {} forecast days",
            fixture.current.location,
            fixture.forecast.len()
        );
        Ok(Self::new(fixture, latency))
    }

    fn snapshot(&self) -> Weather {
        Weather {
            forecast: self.fixture.forecast.clone(),
            ..self.fixture.current.clone()
        }
    }

    /// Current conditions with the full forecast
    pub async fn get_current_weather(&self) -> AppResult<Weather> {
        self.latency.wait().await;
        Ok(self.snapshot())
    }

    /// Conditions for another location: same snapshot, temperature shifted
    /// by a random whole number of degrees in `-10..=9`
    pub async fn get_weather_by_location(&self, location: &str) -> AppResult<Weather> {
        self.latency.wait().await;
        let shift: i64 = rand::thread_rng().gen_range(-10..=9);
        Ok(self.relocated(location, shift))
    }

    fn relocated(&self, location: &str, shift: i64) -> Weather {
        let mut weather = self.snapshot();
        weather.location = location.to_string();
        weather.temperature += Decimal::from(shift);
        weather
    }

    /// The first `days` forecast entries
    pub async fn get_forecast(&self, days: usize) -> AppResult<Vec<DailyForecast>> {
        self.latency.wait().await;
        Ok(self.fixture.forecast.iter().take(days).cloned().collect())
    }

    /// Weather at a farm's location, or at the default location when the
    /// farm is unknown
    pub async fn get_weather_for_farm(&self, farm: Option<&Farm>) -> AppResult<WeatherReport> {
        let location = farm
            .map(|f| f.location.as_str())
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(DEFAULT_LOCATION);
        let weather = self.get_weather_by_location(location).await?;
        Ok(WeatherReport::from(weather))
    }
}
