//! Demo records used on first run when nothing has been persisted.
//!
//! Dates are relative to the moment of first run so the dashboard has
//! something due today.

use crate::clock::start_of_day;
use crate::model::session::{FocusSession, NewSession, SessionStatus};
use crate::model::task::{NewTask, Priority, Task, TaskStatus};
use crate::model::tribe::{NewTribe, Tribe, TribePatch, TribeRole};
use chrono::{DateTime, Duration, Local, Utc};

/// Seed collections in repository list order.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub tasks: Vec<Task>,
    pub tribes: Vec<Tribe>,
    pub sessions: Vec<FocusSession>,
}

impl SeedData {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Demo records dated relative to `now`. Until a collection is first
    /// written, each open rebuilds its demo records from the current time.
    pub fn demo(now: DateTime<Local>) -> Self {
        Self {
            tasks: demo_tasks(now),
            tribes: demo_tribes(now),
            sessions: demo_sessions(now),
        }
    }
}

fn demo_tasks(now: DateTime<Local>) -> Vec<Task> {
    let today = start_of_day(now).with_timezone(&Utc);
    let created = now.with_timezone(&Utc) - Duration::days(2);
    let specs = [
        (
            5,
            NewTask {
                description: Some("Slides and a short live walkthrough".to_string()),
                priority: Some(Priority::High),
                due_date: Some(today + Duration::hours(17)),
                tribe_id: Some(1),
                starred: Some(true),
                tags: vec!["work".to_string()],
                ..NewTask::titled("Prepare sprint demo")
            },
        ),
        (
            4,
            NewTask {
                due_date: Some(today + Duration::days(1) + Duration::hours(12)),
                tribe_id: Some(1),
                tags: vec!["work".to_string(), "review".to_string()],
                ..NewTask::titled("Review pull requests")
            },
        ),
        (
            3,
            NewTask {
                priority: Some(Priority::Low),
                status: Some(TaskStatus::Completed),
                tags: vec!["habit".to_string()],
                ..NewTask::titled("Morning reading")
            },
        ),
        (
            2,
            NewTask {
                priority: Some(Priority::High),
                status: Some(TaskStatus::InProgress),
                starred: Some(true),
                ..NewTask::titled("Plan weekly goals")
            },
        ),
        (
            1,
            NewTask {
                priority: Some(Priority::Low),
                due_date: Some(today + Duration::days(3) + Duration::hours(9)),
                tags: vec!["personal".to_string()],
                ..NewTask::titled("Book dentist appointment")
            },
        ),
    ];

    specs
        .into_iter()
        .filter_map(|(id, input)| Task::from_input(id, input, created).ok())
        .collect()
}

fn demo_tribes(now: DateTime<Local>) -> Vec<Tribe> {
    let created = now.with_timezone(&Utc) - Duration::days(30);
    let specs = [
        (1, "Deep Work Club", TribeRole::Leader, "indigo", 5, 4, 3),
        (2, "Morning Runners", TribeRole::Member, "emerald", 12, 2, 6),
        (3, "Rust Study Group", TribeRole::Member, "amber", 8, 6, 2),
    ];

    specs
        .into_iter()
        .filter_map(|(id, name, role, color, members, active_tasks, active_today)| {
            let input = NewTribe {
                color: Some(color.to_string()),
                role: Some(role),
                ..NewTribe::named(name)
            };
            let mut tribe = Tribe::from_input(id, input, created).ok()?;
            tribe
                .apply_patch(
                    TribePatch {
                        members: Some(members),
                        active_tasks: Some(active_tasks),
                        active_today: Some(active_today),
                        ..TribePatch::default()
                    },
                    created,
                )
                .ok()?;
            Some(tribe)
        })
        .collect()
}

fn demo_sessions(now: DateTime<Local>) -> Vec<FocusSession> {
    let now = now.with_timezone(&Utc);
    let specs = [
        (2, "Sprint demo prep", 45, now - Duration::hours(1), Some(5)),
        (1, "Reading block", 30, now - Duration::days(1), None),
    ];

    specs
        .into_iter()
        .filter_map(|(id, title, duration, date, task_id)| {
            let input = NewSession {
                duration: Some(duration),
                date: Some(date),
                status: Some(SessionStatus::Completed),
                task_id,
                ..NewSession::titled(title)
            };
            FocusSession::from_input(id, input, date).ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::SeedData;
    use chrono::{Local, TimeZone};

    #[test]
    fn demo_seed_is_consistent_and_ordered_newest_first() {
        let seed = SeedData::demo(Local.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap());
        assert_eq!(seed.tasks.len(), 5);
        assert!(seed.tasks.iter().all(|task| task.is_consistent()));
        assert!(seed.tasks.windows(2).all(|pair| pair[0].id > pair[1].id));
        assert_eq!(seed.tribes.len(), 3);
        assert!(seed.tribes.iter().all(|tribe| tribe.members >= 1));
        assert_eq!(seed.sessions.len(), 2);
    }
}
