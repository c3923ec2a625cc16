//! Weather data models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current conditions plus a short forecast for one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    pub location: String,
    pub temperature: Decimal,
    pub condition: WeatherCondition,
    pub humidity: i32,
    pub wind_speed: Decimal,
    #[serde(default)]
    pub forecast: Vec<DailyForecast>,
}

/// One day of the forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyForecast {
    pub day: String,
    pub condition: WeatherCondition,
    pub high: Decimal,
    pub low: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rainy,
    Stormy,
    Snowy,
    #[serde(rename = "partly cloudy")]
    PartlyCloudy,
}

impl WeatherCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "sunny",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Rainy => "rainy",
            WeatherCondition::Stormy => "stormy",
            WeatherCondition::Snowy => "snowy",
            WeatherCondition::PartlyCloudy => "partly cloudy",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-work advice derived from current conditions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherTip {
    RainExpected,
    HighTemperature,
    StrongWind,
    HighHumidity,
}

impl WeatherTip {
    pub fn message(&self) -> &'static str {
        match self {
            WeatherTip::RainExpected => {
                "Rain expected - consider postponing irrigation and outdoor activities."
            }
            WeatherTip::HighTemperature => {
                "High temperatures - ensure adequate water supply for crops and livestock."
            }
            WeatherTip::StrongWind => "Strong winds - avoid spraying pesticides or fertilizers.",
            WeatherTip::HighHumidity => {
                "High humidity - monitor crops for signs of fungal diseases."
            }
        }
    }
}

/// Temperature above which crops need extra water (°F)
pub const HEAT_THRESHOLD: i64 = 85;
/// Wind speed above which spraying should wait (mph)
pub const WIND_THRESHOLD: i64 = 15;
/// Relative humidity above which fungal disease is a risk (%)
pub const HUMIDITY_THRESHOLD: i32 = 80;

/// Tips that apply to a snapshot, in display order
pub fn weather_tips(weather: &Weather) -> Vec<WeatherTip> {
    let mut tips = Vec::new();
    if weather.condition.as_str().contains("rain") {
        tips.push(WeatherTip::RainExpected);
    }
    if weather.temperature > Decimal::from(HEAT_THRESHOLD) {
        tips.push(WeatherTip::HighTemperature);
    }
    if weather.wind_speed > Decimal::from(WIND_THRESHOLD) {
        tips.push(WeatherTip::StrongWind);
    }
    if weather.humidity > HUMIDITY_THRESHOLD {
        tips.push(WeatherTip::HighHumidity);
    }
    tips
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(condition: WeatherCondition, temperature: i64, wind: i64, humidity: i32) -> Weather {
        Weather {
            location: "Springfield".to_string(),
            temperature: Decimal::from(temperature),
            condition,
            humidity,
            wind_speed: Decimal::from(wind),
            forecast: vec![],
        }
    }

    #[test]
    fn test_calm_day_has_no_tips() {
        let weather = snapshot(WeatherCondition::Sunny, 72, 8, 55);
        assert!(weather_tips(&weather).is_empty());
    }

    #[test]
    fn test_every_tip_fires() {
        let weather = snapshot(WeatherCondition::Rainy, 90, 20, 85);
        assert_eq!(
            weather_tips(&weather),
            vec![
                WeatherTip::RainExpected,
                WeatherTip::HighTemperature,
                WeatherTip::StrongWind,
                WeatherTip::HighHumidity,
            ]
        );
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let weather = snapshot(WeatherCondition::Cloudy, 85, 15, 80);
        assert!(weather_tips(&weather).is_empty());
    }

    #[test]
    fn test_partly_cloudy_wire_name() {
        let json = serde_json::to_string(&WeatherCondition::PartlyCloudy).unwrap();
        assert_eq!(json, "\"partly cloudy\"");
    }
}
