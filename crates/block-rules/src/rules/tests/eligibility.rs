use super::common::*;
use crate::rules::{CorridorType, DateWindow, ForcingRule};

#[test]
fn today_is_always_forced_urgent() {
    for (day, hour) in [(13, 0), (15, 12), (16, 23), (18, 23), (19, 6)] {
        let engine = engine_at(instant(day, hour, 0));
        let verdict = engine.eligibility(january(day));
        assert!(verdict.forced_urgent, "day {day} hour {hour}");
        assert_eq!(verdict.forced_by, Some(ForcingRule::UrgentWindow));
    }
}

#[test]
fn thursday_night_locks_next_week() {
    let engine = engine_at(instant(16, 22, 0));
    for day in 20..=26 {
        let verdict = engine.eligibility(january(day));
        assert!(verdict.forced_urgent, "2025-01-{day}");
        assert!(verdict.urgent_allowed);
    }
    assert!(!engine.eligibility(january(27)).forced_urgent);
}

#[test]
fn thursday_evening_before_cutoff_leaves_next_week_open() {
    let engine = engine_at(instant(16, 21, 59));
    let verdict = engine.eligibility(january(22));
    assert!(!verdict.forced_urgent);
    assert!(verdict.disallowed_reason.is_none());
    assert_eq!(engine.window(january(22)), DateWindow::NextWeek);
}

#[test]
fn weekend_keeps_next_week_locked_until_sunday() {
    assert!(engine_at(instant(18, 8, 0)).eligibility(january(23)).forced_urgent);
    assert!(!engine_at(instant(19, 8, 0)).eligibility(january(23)).forced_urgent);
}

#[test]
fn unreadable_dates_impose_no_restriction() {
    let engine = engine_at(monday_morning());
    for raw in ["", "13-01-2025", "not a date"] {
        let verdict = engine.eligibility_for_raw(raw);
        assert!(!verdict.forced_urgent, "{raw}");
        assert!(!verdict.urgent_allowed, "{raw}");
    }
    assert!(engine.eligibility_for_raw("2025-01-14").forced_urgent);
}

#[test]
fn reconcile_follows_date_edits() {
    let engine = engine_at(monday_morning());

    let chosen = engine.reconcile(Some(CorridorType::Corridor), Some(january(24)));
    assert_eq!(chosen.selection, Some(CorridorType::Corridor));

    let forced = engine.reconcile(chosen.selection, Some(january(14)));
    assert_eq!(forced.selection, Some(CorridorType::UrgentBlock));
    assert!(forced.locked);

    let cleared = engine.reconcile(forced.selection, None);
    assert_eq!(cleared.selection, None);
    assert!(!cleared.locked);
}

#[test]
fn assessment_uses_a_single_instant() {
    let now = instant(16, 23, 59);
    let engine = engine_at(now);

    let assessment = engine.assess(Some(CorridorType::OutsideCorridor), Some(january(21)));
    assert_eq!(assessment.evaluated_at, now);
    assert_eq!(assessment.window, Some(DateWindow::NextWeek));
    assert_eq!(assessment.selection.selection, Some(CorridorType::UrgentBlock));
    assert_eq!(
        assessment.selection.verdict.forced_by,
        Some(ForcingRule::WeeklyCutoffPassed)
    );

    let cleared = engine.assess(Some(CorridorType::Corridor), None);
    assert_eq!(cleared.window, None);
    assert_eq!(cleared.selection.selection, None);
}
