//! Integration tests for editor persistence and calendar export.

use chrono::NaiveDate;
use runplan::activities::editor::ActivityDraft;
use runplan::activities::types::{Activity, ActivityType};
use runplan::export::ics::{export_ics, ExportError};
use runplan::storage::store::PlanStore;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
}

#[test]
fn test_editor_saves_round_trip_through_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = PlanStore::open(dir.path());

    let mut draft = ActivityDraft::new(today());
    draft.distance_km = Some(5.0);
    draft.notes = "Easy shakeout".to_string();
    store.add_activity(draft.build()).unwrap();

    let mut draft = ActivityDraft::new(today() + chrono::Duration::days(1));
    draft.set_type(ActivityType::Swim);
    draft.duration_minutes = 45;
    store.add_activity(draft.build()).unwrap();

    let saved = store.sorted_activities();
    let reloaded = PlanStore::open(dir.path());
    assert_eq!(reloaded.sorted_activities(), saved);
}

#[test]
fn test_edit_and_save_replaces_single_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = PlanStore::open(dir.path());

    let original = ActivityDraft::new(today()).build();
    let other = ActivityDraft::new(today() + chrono::Duration::days(2)).build();
    store.add_activity(original.clone()).unwrap();
    store.add_activity(other.clone()).unwrap();

    let mut draft = ActivityDraft::edit(&original);
    draft.duration_minutes = 90;
    store.update_activity(draft.build()).unwrap();

    let reloaded = PlanStore::open(dir.path());
    assert_eq!(reloaded.activities().len(), 2);
    assert_eq!(reloaded.activity(original.id).unwrap().duration_minutes, 90);
    assert_eq!(reloaded.activity(other.id).unwrap().duration_minutes, 30);
}

#[test]
fn test_export_empty_store_produces_notice_not_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = PlanStore::open(dir.path());

    let result = export_ics(store.activities(), today());
    assert!(matches!(result, Err(ExportError::NoData)));
}

#[test]
fn test_export_single_future_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = PlanStore::open(dir.path());

    let run = Activity::new(
        ActivityType::Run,
        NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
        30,
        Some(5.0),
        Some("Easy 5k".to_string()),
    );
    store.add_activity(run).unwrap();

    let ics = export_ics(store.activities(), today()).unwrap();

    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
    assert!(ics.contains("5 km"));
    assert!(ics.contains("30 min"));
    assert!(ics.contains("BEGIN:VCALENDAR"));
    assert!(ics.contains("END:VCALENDAR"));
}

#[test]
fn test_export_skips_past_activities() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = PlanStore::open(dir.path());

    let past = Activity::new(
        ActivityType::Run,
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        60,
        Some(10.0),
        None,
    );
    let future = Activity::new(
        ActivityType::Swim,
        NaiveDate::from_ymd_opt(2024, 7, 22).unwrap(),
        45,
        None,
        None,
    );
    store.add_activity(past).unwrap();
    store.add_activity(future).unwrap();

    let ics = export_ics(store.activities(), today()).unwrap();

    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
    assert!(ics.contains("Swim (45 min)"));
}
