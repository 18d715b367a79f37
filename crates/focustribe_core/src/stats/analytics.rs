//! Analytics summary.
//!
//! Priority breakdown and completion rate come from live tasks. The weekly
//! series is a fixed illustrative shape and does not read persisted state.

use crate::model::task::{Priority, Task};
use serde::Serialize;

const WEEKLY_SERIES: [(&str, u32, u32); 7] = [
    ("Mon", 120, 5),
    ("Tue", 95, 3),
    ("Wed", 150, 6),
    ("Thu", 80, 4),
    ("Fri", 135, 7),
    ("Sat", 45, 2),
    ("Sun", 60, 1),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub label: String,
    pub focus_minutes: u32,
    pub tasks_completed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub priority_breakdown: PriorityBreakdown,
    /// Whole percent of tasks completed; 0 when there are no tasks.
    pub completion_rate: u32,
    pub weekly_series: Vec<SeriesPoint>,
}

pub fn compute_analytics(tasks: &[Task]) -> Analytics {
    let mut breakdown = PriorityBreakdown::default();
    for task in tasks {
        match task.priority {
            Priority::High => breakdown.high += 1,
            Priority::Medium => breakdown.medium += 1,
            Priority::Low => breakdown.low += 1,
        }
    }

    let completed = tasks.iter().filter(|task| task.completed).count();
    let completion_rate = if tasks.is_empty() {
        0
    } else {
        ((completed * 100 + tasks.len() / 2) / tasks.len()) as u32
    };

    Analytics {
        priority_breakdown: breakdown,
        completion_rate,
        weekly_series: WEEKLY_SERIES
            .iter()
            .map(|&(label, focus_minutes, tasks_completed)| SeriesPoint {
                label: label.to_string(),
                focus_minutes,
                tasks_completed,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::compute_analytics;
    use crate::model::task::{NewTask, Priority, Task, TaskStatus};
    use chrono::{TimeZone, Utc};

    #[test]
    fn completion_rate_rounds_and_handles_empty() {
        assert_eq!(compute_analytics(&[]).completion_rate, 0);

        let now = Utc.with_ymd_and_hms(2026, 3, 10, 8, 0, 0).unwrap();
        let tasks: Vec<Task> = [
            (Priority::High, TaskStatus::Completed),
            (Priority::High, TaskStatus::Pending),
            (Priority::Low, TaskStatus::InProgress),
        ]
        .into_iter()
        .zip(1_u64..)
        .map(|((priority, status), id)| {
            let input = NewTask {
                priority: Some(priority),
                status: Some(status),
                ..NewTask::titled("t")
            };
            Task::from_input(id, input, now).unwrap()
        })
        .collect();

        let analytics = compute_analytics(&tasks);
        assert_eq!(analytics.completion_rate, 33);
        assert_eq!(analytics.priority_breakdown.high, 2);
        assert_eq!(analytics.priority_breakdown.medium, 0);
        assert_eq!(analytics.priority_breakdown.low, 1);
        assert_eq!(analytics.weekly_series.len(), 7);
    }
}
