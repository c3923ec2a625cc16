//! HTTP handlers for weather endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::{DailyForecast, Weather};

use crate::error::{AppError, AppResult};
use crate::services::weather::{WeatherReport, DEFAULT_FORECAST_DAYS};
use crate::services::FarmService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub days: Option<usize>,
}

/// Current weather with the full forecast
pub async fn get_current_weather(State(state): State<AppState>) -> AppResult<Json<Weather>> {
    Ok(Json(state.weather.get_current_weather().await?))
}

/// Forecast for the next N days
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<Vec<DailyForecast>>> {
    let days = query.days.unwrap_or(DEFAULT_FORECAST_DAYS);
    Ok(Json(state.weather.get_forecast(days).await?))
}

/// Weather for an arbitrary location
pub async fn get_weather_by_location(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> AppResult<Json<Weather>> {
    Ok(Json(state.weather.get_weather_by_location(&location).await?))
}

/// Weather and field-work tips for a farm. An unknown farm falls back to
/// the default location.
pub async fn get_farm_weather(
    State(state): State<AppState>,
    Path(farm_id): Path<String>,
) -> AppResult<Json<WeatherReport>> {
    let farms = FarmService::new(state.store.clone());
    let farm = match farms.get_by_id(&farm_id).await {
        Ok(farm) => Some(farm),
        Err(AppError::NotFound(_)) => None,
        Err(e) => return Err(e),
    };
    Ok(Json(state.weather.get_weather_for_farm(farm.as_ref()).await?))
}
