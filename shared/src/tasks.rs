//! Task filtering and timeframe grouping for the task board

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{is_same_week, WeekStart};
use crate::models::Task;
use crate::types::ParseEnumError;

/// Task board filter modes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    Pending,
    Today,
    Week,
    Upcoming,
    Completed,
}

impl TaskFilter {
    /// Whether a task belongs in this filter as of `today`
    pub fn matches(&self, task: &Task, today: NaiveDate, week_start: WeekStart) -> bool {
        match self {
            TaskFilter::Pending => !task.completed,
            TaskFilter::Today => !task.completed && task.due_date == today,
            TaskFilter::Week => !task.completed && is_same_week(task.due_date, today, week_start),
            TaskFilter::Upcoming => !task.completed && task.due_date > today,
            TaskFilter::Completed => task.completed,
        }
    }

    /// Timed filters are shown split into timeframe buckets
    pub fn is_grouped(&self) -> bool {
        matches!(
            self,
            TaskFilter::Today | TaskFilter::Week | TaskFilter::Upcoming
        )
    }
}

impl std::str::FromStr for TaskFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskFilter::Pending),
            "today" => Ok(TaskFilter::Today),
            "week" => Ok(TaskFilter::Week),
            "upcoming" => Ok(TaskFilter::Upcoming),
            "completed" => Ok(TaskFilter::Completed),
            _ => Err(ParseEnumError::new("task filter", s)),
        }
    }
}

/// Display bucket for timed filters, in display order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Timeframe {
    #[serde(rename = "Today")]
    Today,
    #[serde(rename = "This Week")]
    ThisWeek,
    #[serde(rename = "Upcoming")]
    Upcoming,
}

impl Timeframe {
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Today => "Today",
            Timeframe::ThisWeek => "This Week",
            Timeframe::Upcoming => "Upcoming",
        }
    }

    /// Bucket for a due date; `None` for dates before this week
    pub fn of(due: NaiveDate, today: NaiveDate, week_start: WeekStart) -> Option<Self> {
        if due == today {
            Some(Timeframe::Today)
        } else if is_same_week(due, today, week_start) {
            Some(Timeframe::ThisWeek)
        } else if due > today {
            Some(Timeframe::Upcoming)
        } else {
            None
        }
    }
}

/// A run of tasks under one heading; `timeframe` is `None` for the single
/// unlabeled group of the pending and completed views
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskGroup {
    pub timeframe: Option<Timeframe>,
    pub tasks: Vec<Task>,
}

/// Tasks matching a filter, in input order
pub fn filter_tasks(
    tasks: &[Task],
    filter: TaskFilter,
    today: NaiveDate,
    week_start: WeekStart,
) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| filter.matches(t, today, week_start))
        .cloned()
        .collect()
}

/// Split filtered tasks into display groups.
///
/// Timed filters yield up to three buckets (Today, This Week, Upcoming) in
/// that order, skipping empty ones. Every other filter yields one group, or
/// none when nothing matched.
pub fn group_by_timeframe(
    filtered: Vec<Task>,
    filter: TaskFilter,
    today: NaiveDate,
    week_start: WeekStart,
) -> Vec<TaskGroup> {
    if !filter.is_grouped() {
        if filtered.is_empty() {
            return Vec::new();
        }
        return vec![TaskGroup {
            timeframe: None,
            tasks: filtered,
        }];
    }

    let mut buckets: [Vec<Task>; 3] = Default::default();
    for task in filtered {
        match Timeframe::of(task.due_date, today, week_start) {
            Some(Timeframe::Today) => buckets[0].push(task),
            Some(Timeframe::ThisWeek) => buckets[1].push(task),
            Some(Timeframe::Upcoming) => buckets[2].push(task),
            // Timed filters never admit tasks from before this week
            None => {}
        }
    }

    [Timeframe::Today, Timeframe::ThisWeek, Timeframe::Upcoming]
        .into_iter()
        .zip(buckets)
        .filter(|(_, tasks)| !tasks.is_empty())
        .map(|(timeframe, tasks)| TaskGroup {
            timeframe: Some(timeframe),
            tasks,
        })
        .collect()
}

/// The task board: filtered count plus display groups
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskBoard {
    pub filter: TaskFilter,
    pub total: usize,
    pub groups: Vec<TaskGroup>,
}

pub fn task_board(
    tasks: &[Task],
    filter: TaskFilter,
    today: NaiveDate,
    week_start: WeekStart,
) -> TaskBoard {
    let filtered = filter_tasks(tasks, filter, today, week_start);
    let total = filtered.len();
    TaskBoard {
        filter,
        total,
        groups: group_by_timeframe(filtered, filter, today, week_start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, TaskType};
    use crate::types::RecordId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: RecordId, due: NaiveDate, completed: bool) -> Task {
        Task {
            id,
            farm_id: 1,
            crop_id: None,
            title: format!("Task {}", id),
            task_type: TaskType::Weeding,
            due_date: due,
            priority: Priority::Low,
            completed,
        }
    }

    // Wednesday; the Sunday week runs 2024-06-09 ..= 2024-06-15
    fn today() -> NaiveDate {
        date(2024, 6, 12)
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, date(2024, 6, 12), false),
            task(2, date(2024, 6, 14), false),
            task(3, date(2024, 6, 10), false),
            task(4, date(2024, 6, 20), false),
            task(5, date(2024, 6, 1), false),
            task(6, date(2024, 6, 12), true),
        ]
    }

    fn ids(tasks: &[Task]) -> Vec<RecordId> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_filter_predicates() {
        let tasks = sample();
        let f = |filter| ids(&filter_tasks(&tasks, filter, today(), WeekStart::Sunday));
        assert_eq!(f(TaskFilter::Pending), vec![1, 2, 3, 4, 5]);
        assert_eq!(f(TaskFilter::Today), vec![1]);
        assert_eq!(f(TaskFilter::Week), vec![1, 2, 3]);
        assert_eq!(f(TaskFilter::Upcoming), vec![2, 4]);
        assert_eq!(f(TaskFilter::Completed), vec![6]);
    }

    #[test]
    fn test_week_view_buckets() {
        let board = task_board(&sample(), TaskFilter::Week, today(), WeekStart::Sunday);
        assert_eq!(board.total, 3);
        assert_eq!(board.groups.len(), 2);
        assert_eq!(board.groups[0].timeframe, Some(Timeframe::Today));
        assert_eq!(ids(&board.groups[0].tasks), vec![1]);
        assert_eq!(board.groups[1].timeframe, Some(Timeframe::ThisWeek));
        assert_eq!(ids(&board.groups[1].tasks), vec![2, 3]);
    }

    #[test]
    fn test_upcoming_view_skips_empty_today_bucket() {
        let board = task_board(&sample(), TaskFilter::Upcoming, today(), WeekStart::Sunday);
        let labels: Vec<_> = board.groups.iter().map(|g| g.timeframe).collect();
        assert_eq!(labels, vec![Some(Timeframe::ThisWeek), Some(Timeframe::Upcoming)]);
    }

    #[test]
    fn test_pending_view_is_single_unlabeled_group() {
        let board = task_board(&sample(), TaskFilter::Pending, today(), WeekStart::Sunday);
        assert_eq!(board.groups.len(), 1);
        assert_eq!(board.groups[0].timeframe, None);
        assert_eq!(board.groups[0].tasks.len(), 5);
    }

    #[test]
    fn test_empty_board() {
        let board = task_board(&[], TaskFilter::Completed, today(), WeekStart::Sunday);
        assert_eq!(board.total, 0);
        assert!(board.groups.is_empty());
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("Week".parse::<TaskFilter>(), Ok(TaskFilter::Week));
        assert!("someday".parse::<TaskFilter>().is_err());
    }
}
