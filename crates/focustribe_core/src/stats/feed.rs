//! Dashboard feed: up to ten tasks in three priority bands.
//!
//! 1. Due on today's local calendar day, completed or not.
//! 2. Incomplete and starred.
//! 3. Any other incomplete task.
//!
//! Each band skips identifiers already placed, so no task appears twice.

use crate::model::task::{Task, TaskId};
use chrono::{DateTime, Local};
use std::collections::HashSet;

pub const DASHBOARD_FEED_LIMIT: usize = 10;

pub fn build_dashboard_feed(tasks: &[Task], now: DateTime<Local>) -> Vec<Task> {
    let today = now.date_naive();
    let bands: [&dyn Fn(&Task) -> bool; 3] = [
        &|task: &Task| {
            task.due_date
                .is_some_and(|due| due.with_timezone(&Local).date_naive() == today)
        },
        &|task: &Task| !task.completed && task.starred,
        &|task: &Task| !task.completed,
    ];

    let mut placed: HashSet<TaskId> = HashSet::new();
    let mut feed = Vec::with_capacity(DASHBOARD_FEED_LIMIT);
    for band in bands {
        for task in tasks.iter().filter(|task| band(task)) {
            if feed.len() == DASHBOARD_FEED_LIMIT {
                return feed;
            }
            if placed.insert(task.id) {
                feed.push(task.clone());
            }
        }
    }
    feed
}
