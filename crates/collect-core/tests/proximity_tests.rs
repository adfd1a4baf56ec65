// Host-side tests for the proximity/capture state machine.

use chrono::{NaiveDate, NaiveDateTime};
use collect_core::*;
use glam::Vec3;
use std::time::Duration;

const KEY: &str = "arCollectionSave_v1";

fn local_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(14, 5, 9)
        .unwrap()
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn machine_with(store: MemoryStore, items: usize) -> ProximityMachine<MemoryStore> {
    ProximityMachine::new(ProgressStore::new(store, KEY), items)
}

fn saved(items: &[bool], completed_ever: bool) -> MemoryStore {
    let mut progress = ProgressStore::new(MemoryStore::new(), KEY);
    progress
        .save(&CollectionRecord {
            items: items.to_vec(),
            completed_ever,
        })
        .unwrap();
    progress.into_inner()
}

fn at_distance(d: f32) -> impl Fn(usize) -> Option<Vec3> {
    move |_| Some(Vec3::new(0.0, 0.0, -d))
}

fn no_pose(_: usize) -> Option<Vec3> {
    None
}

fn writes(m: &ProximityMachine<MemoryStore>) -> usize {
    m.progress().store().writes()
}

#[test]
fn band_edges_are_inclusive() {
    let band = DistanceBand::default();
    assert!(band.contains(3000.0));
    assert!(band.contains(6000.0));
    assert!(band.contains(4500.0));
    assert!(!band.contains(2999.999));
    assert!(!band.contains(6000.001));
}

#[test]
fn distance_is_length_from_origin() {
    let d = target_distance(Vec3::new(3000.0, 4000.0, 0.0));
    assert!((d - 5000.0).abs() < 1e-3);
}

#[test]
fn tick_without_active_target_does_nothing() {
    let mut m = machine_with(MemoryStore::new(), 3);
    let mut out = Vec::new();
    m.on_tick(ms(0), &at_distance(4500.0), &mut out);
    assert!(out.is_empty());
    assert_eq!(m.active_target(), None);
}

#[test]
fn in_band_uncaptured_offers_capture_then_captures() {
    let mut m = machine_with(MemoryStore::new(), 3);
    let mut out = Vec::new();
    m.on_target_found(1, ms(0), &mut out);
    m.on_tick(ms(16), &at_distance(4500.0), &mut out);

    assert_eq!(m.active_target(), Some(1));
    assert!(out.contains(&UiCommand::ShowOverlay(1)));
    assert!(out.contains(&UiCommand::ShowCaptureControl(1)));

    out.clear();
    let before = writes(&m);
    let outcome = m.on_capture_requested(ms(20), local_now(), &mut out);
    assert_eq!(
        outcome,
        CaptureOutcome::Captured {
            index: 1,
            captured_count: 1,
            completion: CompletionOutcome::Incomplete,
        }
    );
    assert_eq!(m.record().items, vec![false, true, false]);
    assert_eq!(m.captured_count(), 1);
    assert_eq!(writes(&m), before + 1);
    assert_eq!(m.active_target(), None);
    assert_eq!(
        out,
        vec![
            UiCommand::MarkCollected(1),
            UiCommand::PlayCaptureSound,
            UiCommand::HideCaptureControl,
        ]
    );
}

#[test]
fn capture_persists_before_returning() {
    let mut m = machine_with(MemoryStore::new(), 2);
    let mut out = Vec::new();
    m.on_target_found(0, ms(0), &mut out);
    m.on_tick(ms(0), &at_distance(3000.0), &mut out);
    m.on_capture_requested(ms(1), local_now(), &mut out);

    let raw = m.progress().store().get(KEY).unwrap().unwrap();
    assert_eq!(raw, r#"{"items":[true,false],"completedEver":false}"#);
}

#[test]
fn capture_without_active_target_is_ignored() {
    let mut m = machine_with(MemoryStore::new(), 3);
    let mut out = Vec::new();
    let outcome = m.on_capture_requested(ms(0), local_now(), &mut out);
    assert_eq!(outcome, CaptureOutcome::Ignored);
    assert!(out.is_empty());
    assert_eq!(writes(&m), 0);
    assert_eq!(m.captured_count(), 0);
}

#[test]
fn in_band_captured_item_shows_overlay_without_control() {
    let mut m = machine_with(saved(&[false, true, false], false), 3);
    let writes_after_load = writes(&m);
    let mut out = Vec::new();
    m.on_target_found(1, ms(0), &mut out);
    m.on_tick(ms(0), &at_distance(5000.0), &mut out);

    assert!(out.contains(&UiCommand::ShowOverlay(1)));
    assert!(out.contains(&UiCommand::HideCaptureControl));
    assert_eq!(m.active_target(), None);

    out.clear();
    assert_eq!(
        m.on_capture_requested(ms(1), local_now(), &mut out),
        CaptureOutcome::Ignored
    );
    assert!(out.is_empty());
    assert_eq!(writes(&m), writes_after_load);
}

#[test]
fn out_of_band_hides_everything_even_if_uncaptured() {
    for d in [2999.999_f32, 6000.001, 100.0, 8660.0] {
        let mut m = machine_with(MemoryStore::new(), 3);
        let mut out = Vec::new();
        m.on_target_found(2, ms(0), &mut out);
        m.on_tick(ms(0), &at_distance(4000.0), &mut out);
        assert_eq!(m.active_target(), Some(2));

        out.clear();
        m.on_tick(ms(16), &at_distance(d), &mut out);
        assert_eq!(m.active_target(), None, "distance {d}");
        assert_eq!(
            out,
            vec![UiCommand::HideOverlay(2), UiCommand::HideCaptureControl]
        );
    }
}

#[test]
fn missing_pose_counts_as_out_of_band() {
    let mut m = machine_with(MemoryStore::new(), 2);
    let mut out = Vec::new();
    m.on_target_found(0, ms(0), &mut out);
    m.on_tick(ms(0), &no_pose, &mut out);
    assert_eq!(m.active_target(), None);
    assert!(out.contains(&UiCommand::HideOverlay(0)));
}

#[test]
fn lost_is_debounced_and_found_cancels_it() {
    let mut m = machine_with(MemoryStore::new(), 3);
    let mut out = Vec::new();
    let poses = at_distance(4500.0);
    m.on_target_found(0, ms(0), &mut out);
    m.on_tick(ms(0), &poses, &mut out);

    m.on_target_lost(0, ms(10));
    assert!(m.lost_debounce_pending());
    m.on_tick(ms(50), &poses, &mut out);
    assert_eq!(m.active_entity(), Some(0));

    // flicker: found again inside the window
    m.on_target_found(0, ms(60), &mut out);
    assert!(!m.lost_debounce_pending());
    out.clear();
    m.on_tick(ms(500), &poses, &mut out);
    assert_eq!(m.active_entity(), Some(0));
    assert_eq!(m.active_target(), Some(0));
}

#[test]
fn lost_expiry_clears_active_target_and_hides() {
    let mut m = machine_with(MemoryStore::new(), 3);
    let mut out = Vec::new();
    m.on_target_found(1, ms(0), &mut out);
    m.on_tick(ms(0), &at_distance(4500.0), &mut out);
    m.on_target_lost(1, ms(20));

    out.clear();
    m.on_tick(ms(119), &at_distance(4500.0), &mut out);
    assert_eq!(m.active_entity(), Some(1));

    out.clear();
    m.on_tick(ms(120), &at_distance(4500.0), &mut out);
    assert_eq!(m.active_entity(), None);
    assert_eq!(m.active_target(), None);
    assert_eq!(m.target(1).map(|t| t.tracked), Some(false));
    assert_eq!(
        out,
        vec![UiCommand::HideOverlay(1), UiCommand::HideCaptureControl]
    );
}

#[test]
fn capture_after_lost_deadline_is_ignored() {
    let mut m = machine_with(MemoryStore::new(), 3);
    let mut out = Vec::new();
    m.on_target_found(1, ms(0), &mut out);
    m.on_tick(ms(0), &at_distance(4500.0), &mut out);
    assert_eq!(m.active_target(), Some(1));
    m.on_target_lost(1, ms(10));

    // no frame ran between the deadline and the tap
    out.clear();
    let outcome = m.on_capture_requested(ms(200), local_now(), &mut out);
    assert_eq!(outcome, CaptureOutcome::Ignored);
    assert_eq!(m.record().items, vec![false, false, false]);
    assert_eq!(writes(&m), 0);
    assert_eq!(m.active_entity(), None);
    assert_eq!(
        out,
        vec![UiCommand::HideOverlay(1), UiCommand::HideCaptureControl]
    );
}

#[test]
fn found_after_lost_deadline_retires_stale_target_first() {
    let mut m = machine_with(MemoryStore::new(), 3);
    let mut out = Vec::new();
    m.on_target_found(0, ms(0), &mut out);
    m.on_tick(ms(0), &at_distance(4500.0), &mut out);
    m.on_target_lost(0, ms(10));

    out.clear();
    m.on_target_found(2, ms(300), &mut out);
    assert_eq!(
        out,
        vec![UiCommand::HideOverlay(0), UiCommand::HideCaptureControl]
    );
    assert_eq!(m.target(0).map(|t| t.tracked), Some(false));
    assert_eq!(m.active_entity(), Some(2));
    assert_eq!(m.active_target(), None);
}

#[test]
fn lost_for_inactive_target_only_untracks_it() {
    let mut m = machine_with(MemoryStore::new(), 3);
    let mut out = Vec::new();
    m.on_target_found(0, ms(0), &mut out);
    m.on_target_lost(2, ms(0));
    assert!(!m.lost_debounce_pending());
    assert_eq!(m.active_entity(), Some(0));
}

#[test]
fn switching_targets_hides_previous_overlay() {
    let mut m = machine_with(MemoryStore::new(), 3);
    let mut out = Vec::new();
    m.on_target_found(0, ms(0), &mut out);
    m.on_tick(ms(0), &at_distance(4500.0), &mut out);
    m.on_target_lost(0, ms(5));

    out.clear();
    m.on_target_found(2, ms(50), &mut out);
    assert!(!m.lost_debounce_pending());
    assert_eq!(m.active_entity(), Some(2));
    assert_eq!(m.active_target(), None);
    assert_eq!(m.target(0).map(|t| t.tracked), Some(false));
    assert!(out.contains(&UiCommand::HideOverlay(0)));
}

#[test]
fn unknown_target_events_are_ignored() {
    let mut m = machine_with(MemoryStore::new(), 2);
    let mut out = Vec::new();
    m.on_target_found(7, ms(0), &mut out);
    m.on_target_lost(7, ms(0));
    assert_eq!(m.active_entity(), None);
    assert!(out.is_empty());
}

#[test]
fn final_capture_celebrates_once_and_persists_completion() {
    let mut m = machine_with(saved(&[true, false, true], false), 3);
    let mut out = Vec::new();
    m.start(ms(0), local_now(), &mut out);
    let base_writes = writes(&m);

    out.clear();
    m.on_target_found(1, ms(0), &mut out);
    m.on_tick(ms(0), &at_distance(4500.0), &mut out);
    out.clear();
    let outcome = m.on_capture_requested(ms(100), local_now(), &mut out);

    assert_eq!(
        outcome,
        CaptureOutcome::Captured {
            index: 1,
            captured_count: 3,
            completion: CompletionOutcome::FirstCompletion {
                code: "20261019140509".to_string()
            },
        }
    );
    assert!(m.record().completed_ever);
    assert_eq!(writes(&m), base_writes + 2);
    let celebrations = out
        .iter()
        .filter(|c| **c == UiCommand::ShowCelebration)
        .count();
    assert_eq!(celebrations, 1);
    assert!(out.contains(&UiCommand::ShowCompletionCode("20261019140509".to_string())));

    let raw = m.progress().store().get(KEY).unwrap().unwrap();
    assert_eq!(raw, r#"{"items":[true,true,true],"completedEver":true}"#);
}

#[test]
fn celebration_dismisses_after_five_seconds() {
    let mut m = machine_with(MemoryStore::new(), 1);
    let mut out = Vec::new();
    m.on_target_found(0, ms(0), &mut out);
    m.on_tick(ms(0), &at_distance(4500.0), &mut out);
    m.on_capture_requested(ms(1000), local_now(), &mut out);
    assert!(m.celebration_pending());

    out.clear();
    m.on_tick(ms(5999), &no_pose, &mut out);
    assert!(!out.contains(&UiCommand::HideCelebration));

    out.clear();
    m.on_tick(ms(6000), &no_pose, &mut out);
    assert!(out.contains(&UiCommand::HideCelebration));
    assert!(!m.celebration_pending());
}

#[test]
fn reload_after_completion_shows_marked_code_without_celebration() {
    let mut m = machine_with(saved(&[true, true, true], true), 3);
    let writes_after_load = writes(&m);
    let mut out = Vec::new();
    let outcome = m.start(ms(0), local_now(), &mut out);

    assert_eq!(
        outcome,
        CompletionOutcome::AlreadyCompleted {
            code: "20261019140509-DONE".to_string()
        }
    );
    assert!(!out.contains(&UiCommand::ShowCelebration));
    assert!(out.contains(&UiCommand::ShowCompletionCode(
        "20261019140509-DONE".to_string()
    )));
    for i in 0..3 {
        assert!(out.contains(&UiCommand::MarkCollected(i)));
    }
    assert_eq!(writes(&m), writes_after_load);
    assert!(!m.celebration_pending());
}

#[test]
fn complete_legacy_record_celebrates_on_load() {
    let mut store = MemoryStore::new();
    store.set(KEY, "[true,true,true]").unwrap();
    let mut m = machine_with(store, 3);
    let writes_after_load = writes(&m);
    let mut out = Vec::new();
    let outcome = m.start(ms(0), local_now(), &mut out);

    assert_eq!(
        outcome,
        CompletionOutcome::FirstCompletion {
            code: "20261019140509".to_string()
        }
    );
    assert!(out.contains(&UiCommand::ShowCelebration));
    assert!(out.contains(&UiCommand::ShowCompletionCode("20261019140509".to_string())));
    assert!(m.record().completed_ever);
    assert!(m.celebration_pending());
    assert_eq!(writes(&m), writes_after_load + 1);

    let raw = m.progress().store().get(KEY).unwrap().unwrap();
    assert_eq!(raw, r#"{"items":[true,true,true],"completedEver":true}"#);
}

#[test]
fn start_with_partial_progress_marks_thumbnails_only() {
    let mut m = machine_with(saved(&[false, true, false], false), 3);
    let mut out = Vec::new();
    assert_eq!(
        m.start(ms(0), local_now(), &mut out),
        CompletionOutcome::Incomplete
    );
    assert_eq!(out, vec![UiCommand::MarkCollected(1)]);
    assert_eq!(m.captured_count(), 1);
}

#[test]
fn reset_removes_saved_progress() {
    let mut m = machine_with(saved(&[true, false], false), 2);
    m.reset_progress().unwrap();
    assert!(!m.progress().store().contains(KEY));
    // in-memory state untouched until the session restarts
    assert_eq!(m.captured_count(), 1);
}

