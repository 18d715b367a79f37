//! Dashboard statistics.

use crate::clock::start_of_day;
use crate::model::session::FocusSession;
use crate::model::task::Task;
use crate::model::tribe::Tribe;
use chrono::{DateTime, Duration, Local, Utc};
use serde::Serialize;

pub const DAILY_FOCUS_GOAL_MINUTES: u32 = 180;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskProgress {
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    /// Incomplete tasks due within today's local 24h window.
    pub due_today: usize,
    /// Minutes across sessions dated today or later.
    pub focus_time: u64,
    pub tasks_progress: TaskProgress,
    pub active_tribes: usize,
    pub daily_focus_goal: u32,
    /// Sessions dated today or later, regardless of status.
    pub sessions_completed: usize,
}

pub fn compute_stats(
    tasks: &[Task],
    tribes: &[Tribe],
    sessions: &[FocusSession],
    now: DateTime<Local>,
) -> DerivedStats {
    let today = start_of_day(now).with_timezone(&Utc);
    let tomorrow = today + Duration::hours(24);

    let due_today = tasks
        .iter()
        .filter(|task| !task.completed)
        .filter(|task| {
            task.due_date
                .is_some_and(|due| due >= today && due < tomorrow)
        })
        .count();

    let todays_sessions: Vec<&FocusSession> = sessions
        .iter()
        .filter(|session| session.date >= today)
        .collect();
    let focus_time = todays_sessions
        .iter()
        .map(|session| u64::from(session.duration))
        .sum();

    DerivedStats {
        due_today,
        focus_time,
        tasks_progress: TaskProgress {
            completed: tasks.iter().filter(|task| task.completed).count(),
            total: tasks.len(),
        },
        active_tribes: tribes.len(),
        daily_focus_goal: DAILY_FOCUS_GOAL_MINUTES,
        sessions_completed: todays_sessions.len(),
    }
}
