//! Crop planting models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{flexible_date, ParseEnumError, RecordId};
use crate::validation::validate_not_blank;

/// A crop planted in a field of a farm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub farm_id: RecordId,
    pub crop_type: String,
    #[serde(default)]
    pub field: String,
    #[serde(with = "flexible_date")]
    pub planting_date: NaiveDate,
    /// Not checked against `planting_date`
    #[serde(with = "flexible_date")]
    pub expected_harvest: NaiveDate,
    #[serde(default)]
    pub status: CropStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_variety: Option<String>,
    #[serde(
        default,
        with = "flexible_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub germination_date: Option<NaiveDate>,
    #[serde(
        default,
        with = "flexible_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub vegetative_date: Option<NaiveDate>,
    #[serde(
        default,
        with = "flexible_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub flowering_date: Option<NaiveDate>,
    /// Per-stage statuses recorded against the crop, overriding the heuristic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<StoredTimeline>,
    /// Recorded yields; the detail view synthesizes a history when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_history: Option<Vec<YieldRecord>>,
}

impl Crop {
    /// A crop counts as active until it has been harvested
    pub fn is_active(&self) -> bool {
        self.status != CropStatus::Harvested
    }
}

/// Coarse lifecycle status; advances by convention only
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum CropStatus {
    #[default]
    Planted,
    Growing,
    Ready,
    Harvested,
}

impl std::fmt::Display for CropStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropStatus::Planted => write!(f, "Planted"),
            CropStatus::Growing => write!(f, "Growing"),
            CropStatus::Ready => write!(f, "Ready to Harvest"),
            CropStatus::Harvested => write!(f, "Harvested"),
        }
    }
}

impl std::str::FromStr for CropStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planted" => Ok(CropStatus::Planted),
            "growing" => Ok(CropStatus::Growing),
            "ready" => Ok(CropStatus::Ready),
            "harvested" => Ok(CropStatus::Harvested),
            _ => Err(ParseEnumError::new("crop status", s)),
        }
    }
}

/// Status of a single growth stage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Completed,
    Current,
    Pending,
}

/// Explicit stage statuses stored with a crop
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredTimeline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub germination: Option<StageStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vegetative: Option<StageStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flowering: Option<StageStatus>,
}

/// Crop types offered by the crop form
pub const CROP_TYPES: &[&str] = &[
    "Corn", "Wheat", "Soybeans", "Rice", "Barley", "Oats", "Potatoes", "Tomatoes", "Carrots",
    "Lettuce", "Spinach", "Broccoli", "Beans", "Peas",
];

/// Growing seasons offered by the crop form
pub const YIELD_UNIT: &str = "tons/hectare";

/// One season's yield
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YieldRecord {
    pub year: i32,
    #[serde(rename = "yield")]
    pub amount: Decimal,
    #[serde(default = "default_yield_unit")]
    pub unit: String,
    #[serde(default)]
    pub projected: bool,
}

fn default_yield_unit() -> String {
    YIELD_UNIT.to_string()
}

pub const SEASONS: &[&str] = &["Kharif", "Rabi", "Dry"];

/// Input for planting a crop
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCrop {
    pub farm_id: RecordId,
    #[validate(custom = "validate_not_blank")]
    pub crop_type: String,
    #[validate(custom = "validate_not_blank")]
    pub field: String,
    #[serde(with = "flexible_date")]
    pub planting_date: NaiveDate,
    #[serde(with = "flexible_date")]
    pub expected_harvest: NaiveDate,
    #[serde(default)]
    pub status: CropStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_variety: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_history: Option<Vec<YieldRecord>>,
}

/// Partial update for a crop
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CropPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_not_blank")]
    pub crop_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_not_blank")]
    pub field: Option<String>,
    #[serde(
        default,
        with = "flexible_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub planting_date: Option<NaiveDate>,
    #[serde(
        default,
        with = "flexible_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expected_harvest: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CropStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_variety: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_history: Option<Vec<YieldRecord>>,
}
