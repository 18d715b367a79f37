use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use focustribe_core::{
    Backend, BackendConfig, EntityKind, FixedClock, NewTask, Priority, RepoError, TaskFilter,
    TaskPatch, TaskStatus, ValidationError,
};

fn noon() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
}

fn backend() -> (Backend, FixedClock) {
    let clock = FixedClock::new(noon());
    let backend =
        Backend::open_with_clock(BackendConfig::ephemeral(), Box::new(clock.clone())).unwrap();
    (backend, clock)
}

fn today_at(hour: u32) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(2026, 3, 10, hour, 0, 0)
        .unwrap()
        .with_timezone(&Utc)
}

#[test]
fn create_assigns_increasing_ids_and_prepends() {
    let (mut backend, _clock) = backend();

    let first = backend.create_task(NewTask::titled("first")).unwrap();
    let second = backend.create_task(NewTask::titled("second")).unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    let ids: Vec<u64> = backend
        .list_tasks(&TaskFilter::default())
        .iter()
        .map(|task| task.id)
        .collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(first.priority, Priority::Medium);
    assert_eq!(first.created_at, noon().with_timezone(&Utc));
}

#[test]
fn create_without_title_is_rejected_and_burns_no_id() {
    let (mut backend, _clock) = backend();

    let err = backend.create_task(NewTask::titled(" ")).unwrap_err();
    assert_eq!(err, RepoError::Validation(ValidationError::MissingField("title")));

    let task = backend.create_task(NewTask::titled("real")).unwrap();
    assert_eq!(task.id, 1);
}

#[test]
fn missing_ids_report_not_found() {
    let (mut backend, _clock) = backend();

    let expected = RepoError::NotFound {
        kind: EntityKind::Task,
        id: 42,
    };
    assert_eq!(backend.get_task(42).unwrap_err(), expected);
    assert_eq!(
        backend.update_task(42, TaskPatch::default()).unwrap_err(),
        expected
    );
    assert_eq!(backend.delete_task(42).unwrap_err(), expected);
    assert_eq!(backend.toggle_task_completed(42).unwrap_err(), expected);
    assert_eq!(backend.toggle_task_starred(42).unwrap_err(), expected);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let (mut backend, _clock) = backend();

    let first = backend.create_task(NewTask::titled("a")).unwrap();
    let second = backend.create_task(NewTask::titled("b")).unwrap();
    let confirmation = backend.delete_task(second.id).unwrap();
    assert_eq!(confirmation.kind, EntityKind::Task);
    assert_eq!(confirmation.id, second.id);

    let third = backend.create_task(NewTask::titled("c")).unwrap();
    assert!(third.id > second.id);
    assert!(backend.get_task(first.id).is_ok());
}

#[test]
fn update_refreshes_updated_at_and_keeps_triple_consistent() {
    let (mut backend, clock) = backend();
    let task = backend.create_task(NewTask::titled("write")).unwrap();

    clock.advance(Duration::minutes(5));
    let updated = backend
        .update_task(
            task.id,
            TaskPatch {
                completed: Some(true),
                priority: Some(Priority::High),
                ..TaskPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.status, TaskStatus::Completed);
    assert!(updated.completed);
    assert_eq!(updated.completed_at, Some(updated.updated_at));
    assert!(updated.updated_at > task.updated_at);
    assert_eq!(updated.created_at, task.created_at);
    assert!(updated.is_consistent());
}

#[test]
fn conflicting_update_leaves_task_untouched() {
    let (mut backend, _clock) = backend();
    let task = backend.create_task(NewTask::titled("write")).unwrap();

    let err = backend
        .update_task(
            task.id,
            TaskPatch {
                status: Some(TaskStatus::Completed),
                completed: Some(false),
                ..TaskPatch::default()
            },
        )
        .unwrap_err();

    assert_eq!(
        err,
        RepoError::Validation(ValidationError::ConflictingCompletion)
    );
    assert_eq!(backend.get_task(task.id).unwrap(), task);
}

#[test]
fn toggle_completed_twice_restores_prior_state() {
    let (mut backend, clock) = backend();
    let task = backend.create_task(NewTask::titled("toggle me")).unwrap();

    clock.advance(Duration::minutes(1));
    let done = backend.toggle_task_completed(task.id).unwrap();
    assert!(done.completed);
    assert_eq!(done.status, TaskStatus::Completed);
    assert!(done.completed_at.is_some());

    clock.advance(Duration::minutes(1));
    let undone = backend.toggle_task_completed(task.id).unwrap();
    assert_eq!(undone.completed, task.completed);
    assert_eq!(undone.status, task.status);
    assert_eq!(undone.completed_at, task.completed_at);
}

#[test]
fn toggle_starred_does_not_touch_completion_or_stats() {
    let (mut backend, _clock) = backend();
    let task = backend.create_task(NewTask::titled("star")).unwrap();
    let before = backend.stats();

    let starred = backend.toggle_task_starred(task.id).unwrap();
    assert!(starred.starred);
    assert_eq!(starred.status, task.status);
    assert_eq!(starred.completed_at, task.completed_at);
    assert_eq!(backend.stats(), before);
}

#[test]
fn list_filters_match_exactly() {
    let (mut backend, _clock) = backend();
    backend
        .create_task(NewTask {
            tribe_id: Some(7),
            starred: Some(true),
            ..NewTask::titled("tribe starred")
        })
        .unwrap();
    let done = backend
        .create_task(NewTask {
            tribe_id: Some(7),
            ..NewTask::titled("tribe done")
        })
        .unwrap();
    backend.toggle_task_completed(done.id).unwrap();
    backend.create_task(NewTask::titled("loose")).unwrap();

    let in_tribe = backend.list_tasks(&TaskFilter {
        tribe_id: Some(7),
        ..TaskFilter::default()
    });
    assert_eq!(in_tribe.len(), 2);

    let open_in_tribe = backend.list_tasks(&TaskFilter {
        tribe_id: Some(7),
        completed: Some(false),
        ..TaskFilter::default()
    });
    assert_eq!(open_in_tribe.len(), 1);
    assert_eq!(open_in_tribe[0].title, "tribe starred");

    let completed = backend.list_tasks(&TaskFilter {
        status: Some(TaskStatus::Completed),
        ..TaskFilter::default()
    });
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, done.id);

    let starred = backend.list_tasks(&TaskFilter {
        starred: Some(true),
        ..TaskFilter::default()
    });
    assert_eq!(starred.len(), 1);
}

#[test]
fn list_returns_copies() {
    let (mut backend, _clock) = backend();
    let task = backend.create_task(NewTask::titled("original")).unwrap();

    let mut listed = backend.list_tasks(&TaskFilter::default());
    listed[0].title = "mutated outside".to_string();

    assert_eq!(backend.get_task(task.id).unwrap().title, "original");
}

#[test]
fn due_today_scenario_tracks_toggle() {
    let (mut backend, _clock) = backend();
    let before = backend.stats();

    let task = backend
        .create_task(NewTask {
            due_date: Some(today_at(9)),
            ..NewTask::titled("Draft report")
        })
        .unwrap();
    let stats = backend.dashboard_stats().stats;
    assert_eq!(stats.due_today, 1);

    backend.toggle_task_completed(task.id).unwrap();
    let stats = backend.dashboard_stats().stats;
    assert_eq!(stats.due_today, 0);
    assert_eq!(
        stats.tasks_progress.completed,
        before.tasks_progress.completed + 1
    );
    assert_eq!(backend.last_stats(), stats);
}

#[test]
fn progress_always_matches_live_collection() {
    let (mut backend, _clock) = backend();
    let ids: Vec<u64> = (0..6)
        .map(|index| {
            backend
                .create_task(NewTask::titled(format!("task {index}")))
                .unwrap()
                .id
        })
        .collect();
    backend.toggle_task_completed(ids[0]).unwrap();
    backend.toggle_task_completed(ids[1]).unwrap();
    backend.delete_task(ids[1]).unwrap();
    backend.delete_task(ids[2]).unwrap();

    let stats = backend.dashboard_stats().stats;
    let live = backend.list_tasks(&TaskFilter::default());
    assert_eq!(stats.tasks_progress.total, live.len());
    assert_eq!(
        stats.tasks_progress.completed,
        live.iter().filter(|task| task.completed).count()
    );
    assert_eq!(stats.tasks_progress.completed, 1);
    assert_eq!(backend.last_stats(), stats);
}

#[test]
fn dashboard_feed_puts_due_today_first_and_caps_at_ten() {
    let (mut backend, _clock) = backend();
    for index in 0..12 {
        backend
            .create_task(NewTask {
                starred: Some(index % 4 == 0),
                ..NewTask::titled(format!("open {index}"))
            })
            .unwrap();
    }
    let due = backend
        .create_task(NewTask {
            due_date: Some(today_at(18)),
            ..NewTask::titled("due tonight")
        })
        .unwrap();
    backend.toggle_task_completed(due.id).unwrap();

    let feed = backend.dashboard_stats().recent_tasks;
    assert_eq!(feed.len(), 10);
    assert_eq!(feed[0].id, due.id);
    assert!(feed[1..4].iter().all(|task| task.starred));
    let mut ids: Vec<u64> = feed.iter().map(|task| task.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 10);
}

#[test]
fn analytics_reflects_priorities() {
    let (mut backend, _clock) = backend();
    backend
        .create_task(NewTask {
            priority: Some(Priority::High),
            ..NewTask::titled("urgent")
        })
        .unwrap();
    let low = backend
        .create_task(NewTask {
            priority: Some(Priority::Low),
            ..NewTask::titled("someday")
        })
        .unwrap();
    backend.toggle_task_completed(low.id).unwrap();

    let analytics = backend.analytics();
    assert_eq!(analytics.priority_breakdown.high, 1);
    assert_eq!(analytics.priority_breakdown.low, 1);
    assert_eq!(analytics.completion_rate, 50);
}
