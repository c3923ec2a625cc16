//! Farm task models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{flexible_date, ParseEnumError, RecordId};
use crate::validation::validate_not_blank;

/// A scheduled piece of farm work
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub farm_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_id: Option<RecordId>,
    pub title: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// Stored date-only; times of day never participate in comparisons
    #[serde(with = "flexible_date")]
    pub due_date: NaiveDate,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

/// Kind of work a task represents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Watering,
    Fertilizing,
    Harvesting,
    Planting,
    Weeding,
    Spraying,
    Inspection,
    Maintenance,
    Other,
}

impl TaskType {
    pub const ALL: [TaskType; 9] = [
        TaskType::Watering,
        TaskType::Fertilizing,
        TaskType::Harvesting,
        TaskType::Planting,
        TaskType::Weeding,
        TaskType::Spraying,
        TaskType::Inspection,
        TaskType::Maintenance,
        TaskType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Watering => "watering",
            TaskType::Fertilizing => "fertilizing",
            TaskType::Harvesting => "harvesting",
            TaskType::Planting => "planting",
            TaskType::Weeding => "weeding",
            TaskType::Spraying => "spraying",
            TaskType::Inspection => "inspection",
            TaskType::Maintenance => "maintenance",
            TaskType::Other => "other",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        TaskType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| ParseEnumError::new("task type", s))
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// Input for scheduling a task
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub farm_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_id: Option<RecordId>,
    #[validate(custom = "validate_not_blank")]
    pub title: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(with = "flexible_date")]
    pub due_date: NaiveDate,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

/// Partial update for a task
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_not_blank")]
    pub title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<TaskType>,
    #[serde(
        default,
        with = "flexible_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// The patch sent by the "complete" action
    pub fn completion() -> Self {
        Self {
            completed: Some(true),
            ..Self::default()
        }
    }
}
