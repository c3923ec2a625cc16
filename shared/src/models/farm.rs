//! Farm models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::RecordId;
use crate::validation::{validate_not_blank, validate_positive};

/// A farm property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Farm {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub name: String,
    pub size: Decimal,
    #[serde(default)]
    pub size_unit: SizeUnit,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_coordinates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machinery_available: Option<String>,
    /// Stamped once when the farm is created
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Unit the farm size is expressed in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SizeUnit {
    #[default]
    Acres,
    Hectares,
    SquareFeet,
    SquareMeters,
}

impl std::fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizeUnit::Acres => write!(f, "acres"),
            SizeUnit::Hectares => write!(f, "hectares"),
            SizeUnit::SquareFeet => write!(f, "square feet"),
            SizeUnit::SquareMeters => write!(f, "square meters"),
        }
    }
}

/// Soil types offered by the farm form
pub const SOIL_TYPES: &[&str] = &["clay", "sandy", "loamy"];

/// Farm types offered by the farm form
pub const FARM_TYPES: &[&str] = &["crop farm", "dairy", "poultry", "mixed-use"];

/// Input for creating a farm
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewFarm {
    #[validate(custom = "validate_not_blank")]
    pub name: String,
    #[validate(custom = "validate_positive")]
    pub size: Decimal,
    #[serde(default)]
    pub size_unit: SizeUnit,
    #[validate(custom = "validate_not_blank")]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_coordinates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machinery_available: Option<String>,
}

/// Partial update for a farm; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FarmPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_not_blank")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_positive")]
    pub size: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_unit: Option<SizeUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_not_blank")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_coordinates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machinery_available: Option<String>,
}
