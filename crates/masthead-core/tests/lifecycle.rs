//! End-to-end lifecycle scenarios against the workflow store.

use chrono::{DateTime, Duration, TimeZone, Utc};
use masthead_core::error::TransitionError;
use masthead_core::model::status::Status;
use masthead_core::sla::{SlaPolicy, Standing};
use masthead_core::store::WorkflowStore;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 12, 10, 30, 0).unwrap()
}

#[test]
fn submission_walks_the_happy_path_to_published() {
    let mut store = WorkflowStore::default();
    store.create("ms-42", "Spectral methods for peer review", t0()).unwrap();

    let mut now = t0();
    for status in [
        Status::UnderReview,
        Status::Revision,
        Status::UnderReview,
        Status::Accepted,
        Status::InProduction,
        Status::Published,
    ] {
        now += Duration::days(2);
        store
            .record_transition("ms-42", status, Some("editor-1"), None, now)
            .unwrap();
    }

    let submission = store.get("ms-42").unwrap();
    assert_eq!(submission.status, Status::Published);
    assert_eq!(submission.deadline, None);

    // Initial entry plus six transitions, in order.
    let history: Vec<Status> = store.history("ms-42").map(|e| e.status).collect();
    assert_eq!(
        history,
        vec![
            Status::New,
            Status::UnderReview,
            Status::Revision,
            Status::UnderReview,
            Status::Accepted,
            Status::InProduction,
            Status::Published,
        ]
    );
}

#[test]
fn deadline_resets_and_standing_follows_the_clock() {
    let policy = SlaPolicy::default();
    let mut store = WorkflowStore::new(policy.clone());
    store.create("ms-7", "Deadline arithmetic", t0()).unwrap();

    // Created in `new`: deadline is t0 + 7 days.
    let submission = store.get("ms-7").unwrap();
    assert_eq!(submission.deadline, Some(t0() + Duration::days(7)));

    // Four days in, three remain: warning badge.
    let four_days_in = t0() + Duration::days(4);
    assert_eq!(
        policy.classify(submission.deadline, four_days_in),
        Standing::Warning
    );

    // Moving to review at t0+4d resets the window to 21 days out.
    store
        .record_transition("ms-7", Status::UnderReview, None, None, four_days_in)
        .unwrap();
    let submission = store.get("ms-7").unwrap();
    assert_eq!(submission.deadline, Some(t0() + Duration::days(25)));
    assert_eq!(submission.reminders_sent, 0);
    assert_eq!(
        policy.classify(submission.deadline, four_days_in),
        Standing::OnTime
    );

    // Long after the deadline the badge goes red.
    assert_eq!(
        policy.classify(submission.deadline, t0() + Duration::days(40)),
        Standing::Overdue
    );
}

#[test]
fn illegal_jump_is_rejected_without_partial_write() {
    let mut store = WorkflowStore::default();
    store.create("ms-9", "No shortcuts", t0()).unwrap();
    let before = store.get("ms-9").cloned().unwrap();

    let err = store
        .record_transition("ms-9", Status::Published, Some("editor-1"), None, t0())
        .unwrap_err();
    assert_eq!(
        err,
        TransitionError::InvalidTransition {
            id: "ms-9".to_string(),
            from: Status::New,
            to: Status::Published,
        }
    );

    // Status, timestamps, and history are all untouched.
    assert_eq!(store.get("ms-9"), Some(&before));
    assert_eq!(store.history("ms-9").count(), 1);
}

#[test]
fn reminder_sweep_drains_buckets_in_order() {
    let mut store = WorkflowStore::default();
    store.create("ms-3", "Cadence", t0()).unwrap();

    // Deadline is t0+7d, so the first sweep at t0 matches the 7-day offset.
    assert_eq!(store.due_for_reminder(t0()).len(), 1);
    store.mark_reminder_sent("ms-3").unwrap();
    assert!(store.due_for_reminder(t0()).is_empty());

    // Second bucket at 3 days out, third at 1 day out.
    let three_out = t0() + Duration::days(4);
    assert_eq!(store.due_for_reminder(three_out).len(), 1);
    store.mark_reminder_sent("ms-3").unwrap();

    let one_out = t0() + Duration::days(6);
    assert_eq!(store.due_for_reminder(one_out).len(), 1);
    store.mark_reminder_sent("ms-3").unwrap();

    // Cap reached: nothing more fires, ever.
    assert!(store.due_for_reminder(one_out).is_empty());
    assert!(store.due_for_reminder(t0() + Duration::days(30)).is_empty());
}

#[test]
fn terminal_submission_stops_accruing_deadlines() {
    let mut store = WorkflowStore::default();
    store.create("ms-5", "Desk pass", t0()).unwrap();
    store
        .record_transition("ms-5", Status::DeskReject, Some("editor-2"), Some("scope"), t0())
        .unwrap();

    let submission = store.get("ms-5").unwrap();
    assert_eq!(submission.deadline, None);
    assert!(store.due_for_reminder(t0() + Duration::days(7)).is_empty());

    // And nothing leads out of the terminal status.
    for status in Status::ALL {
        if status == Status::DeskReject {
            continue;
        }
        assert!(
            store
                .record_transition("ms-5", status, None, None, t0())
                .is_err(),
            "desk_reject -> {status} should be rejected"
        );
    }
}
