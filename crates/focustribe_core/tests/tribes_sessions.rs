use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use focustribe_core::{
    Backend, BackendConfig, EntityKind, FixedClock, NewSession, NewTribe, RepoError,
    SessionFilter, SessionPatch, SessionStatus, TribePatch, TribeRole, ValidationError,
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

fn hours_from_noon(hours: i64) -> DateTime<Utc> {
    (noon() + Duration::hours(hours)).with_timezone(&Utc)
}

#[test]
fn tribes_keep_append_order_and_defaults() {
    let (mut backend, _clock) = backend();
    backend.create_tribe(NewTribe::named("Readers")).unwrap();
    backend
        .create_tribe(NewTribe {
            role: Some(TribeRole::Member),
            color: Some("rose".to_string()),
            ..NewTribe::named("Runners")
        })
        .unwrap();

    let tribes = backend.list_tribes();
    let names: Vec<&str> = tribes.iter().map(|tribe| tribe.name.as_str()).collect();
    assert_eq!(names, vec!["Readers", "Runners"]);
    assert_eq!(tribes[0].members, 1);
    assert_eq!(tribes[0].role, TribeRole::Leader);
    assert_eq!(tribes[1].color, "rose");
}

#[test]
fn tribe_without_name_is_rejected() {
    let (mut backend, _clock) = backend();
    let err = backend.create_tribe(NewTribe::named("")).unwrap_err();
    assert_eq!(err, RepoError::Validation(ValidationError::MissingField("name")));
    assert!(backend.list_tribes().is_empty());
}

#[test]
fn member_count_never_drops_below_one() {
    let (mut backend, _clock) = backend();
    let tribe = backend.create_tribe(NewTribe::named("Crew")).unwrap();

    backend.add_tribe_member(tribe.id).unwrap();
    backend.add_tribe_member(tribe.id).unwrap();
    for _ in 0..10 {
        backend.remove_tribe_member(tribe.id).unwrap();
    }

    assert_eq!(backend.get_tribe(tribe.id).unwrap().members, 1);
    let err = backend
        .update_tribe(
            tribe.id,
            TribePatch {
                members: Some(0),
                ..TribePatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(
        err,
        RepoError::Validation(ValidationError::MemberCountBelowMinimum(0))
    );
}

#[test]
fn update_tribe_merges_fields_and_refreshes_updated_at() {
    let (mut backend, clock) = backend();
    let tribe = backend.create_tribe(NewTribe::named("Crew")).unwrap();

    clock.advance(Duration::minutes(3));
    let updated = backend
        .update_tribe(
            tribe.id,
            TribePatch {
                description: Some("weekly sync".to_string()),
                active_today: Some(2),
                ..TribePatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.name, "Crew");
    assert_eq!(updated.description, "weekly sync");
    assert_eq!(updated.active_today, 2);
    assert!(updated.updated_at > tribe.updated_at);
}

#[test]
fn deleting_tribe_removes_it_and_updates_stats() {
    let (mut backend, _clock) = backend();
    let keep = backend.create_tribe(NewTribe::named("Keep")).unwrap();
    let gone = backend.create_tribe(NewTribe::named("Gone")).unwrap();
    assert_eq!(backend.stats().active_tribes, 2);

    backend.delete_tribe(gone.id).unwrap();

    let ids: Vec<u64> = backend.list_tribes().iter().map(|tribe| tribe.id).collect();
    assert_eq!(ids, vec![keep.id]);
    assert_eq!(backend.dashboard_stats().stats.active_tribes, 1);
    assert_eq!(backend.last_stats().active_tribes, 1);
    assert_eq!(
        backend.get_tribe(gone.id).unwrap_err(),
        RepoError::NotFound {
            kind: EntityKind::Tribe,
            id: gone.id
        }
    );
}

#[test]
fn todays_sessions_sum_focus_time() {
    let (mut backend, _clock) = backend();
    for (minutes, offset) in [(30, -3), (45, -2), (60, -1)] {
        backend
            .create_session(NewSession {
                duration: Some(minutes),
                date: Some(hours_from_noon(offset)),
                ..NewSession::titled("deep work")
            })
            .unwrap();
    }
    backend
        .create_session(NewSession {
            duration: Some(90),
            date: Some(hours_from_noon(-24)),
            ..NewSession::titled("yesterday")
        })
        .unwrap();

    let stats = backend.dashboard_stats().stats;
    assert_eq!(stats.focus_time, 135);
    assert_eq!(stats.sessions_completed, 3);
    assert_eq!(stats.daily_focus_goal, 180);
}

#[test]
fn sessions_are_most_recent_first_and_filterable() {
    let (mut backend, _clock) = backend();
    let first = backend.create_session(NewSession::titled("one")).unwrap();
    let second = backend.create_session(NewSession::titled("two")).unwrap();
    assert_eq!(first.status, SessionStatus::Active);
    assert_eq!(first.duration, 25);

    backend.complete_session(first.id).unwrap();

    let all: Vec<u64> = backend
        .list_sessions(&SessionFilter::default())
        .iter()
        .map(|session| session.id)
        .collect();
    assert_eq!(all, vec![second.id, first.id]);

    let active = backend.list_sessions(&SessionFilter {
        status: Some(SessionStatus::Active),
    });
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, second.id);
}

#[test]
fn complete_session_stamps_once() {
    let (mut backend, clock) = backend();
    let session = backend.create_session(NewSession::titled("focus")).unwrap();
    assert!(session.completed_at.is_none());

    clock.advance(Duration::minutes(25));
    let completed = backend.complete_session(session.id).unwrap();
    assert_eq!(completed.status, SessionStatus::Completed);
    let stamped = completed.completed_at.unwrap();

    clock.advance(Duration::minutes(5));
    let again = backend.complete_session(session.id).unwrap();
    assert_eq!(again.completed_at, Some(stamped));
}

#[test]
fn session_patch_reopens_and_clears_completed_at() {
    let (mut backend, _clock) = backend();
    let session = backend.create_session(NewSession::titled("focus")).unwrap();
    backend.complete_session(session.id).unwrap();

    let reopened = backend
        .update_session(
            session.id,
            SessionPatch {
                status: Some(SessionStatus::Active),
                duration: Some(50),
                ..SessionPatch::default()
            },
        )
        .unwrap();
    assert_eq!(reopened.status, SessionStatus::Active);
    assert!(reopened.completed_at.is_none());
    assert_eq!(reopened.duration, 50);
}

#[test]
fn deleting_session_reduces_focus_time() {
    let (mut backend, _clock) = backend();
    let session = backend
        .create_session(NewSession {
            duration: Some(40),
            ..NewSession::titled("focus")
        })
        .unwrap();
    assert_eq!(backend.last_stats().focus_time, 40);

    backend.delete_session(session.id).unwrap();
    assert_eq!(backend.last_stats().focus_time, 0);
    assert!(matches!(
        backend.delete_session(session.id),
        Err(RepoError::NotFound {
            kind: EntityKind::Session,
            ..
        })
    ));
}
