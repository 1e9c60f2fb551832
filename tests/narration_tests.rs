//! Narration sequencer tests
//!
//! Tests for:
//! - advance(): beat order and terminal completion
//! - update(): start delay, beat timing, completion reported once
//! - skip() and opacity()

use diorama::narration::{
    Beat, NarrationEvent, NarrationPhase, NarrationSequencer, NarrationSettings, NarrationStep, default_beats,
};

fn four_beats() -> NarrationSequencer {
    NarrationSequencer::default()
}

#[test]
fn default_intro_has_four_beats() {
    let beats = default_beats();
    assert_eq!(beats.len(), 4);
    assert!(beats[0].text.starts_with("Marrakech"));
    assert!(beats.iter().all(|b| (b.duration - 4.5).abs() < f32::EPSILON));
}

#[test]
fn advance_walks_beats_in_order_then_completes() {
    let mut narration = four_beats();
    for expected in 0..4 {
        match narration.advance() {
            NarrationStep::Beat(i, beat) => {
                assert_eq!(i, expected);
                assert_eq!(beat, &default_beats()[expected]);
            }
            NarrationStep::Completed => panic!("completed early at {expected}"),
        }
    }
    assert_eq!(narration.advance(), NarrationStep::Completed);
    assert_eq!(narration.advance(), NarrationStep::Completed);
    assert_eq!(narration.phase(), NarrationPhase::Completed);
}

#[test]
fn update_follows_the_timeline() {
    let mut narration = four_beats();
    let mut events = Vec::new();
    // 0.8 s delay, then 4 × (4.5 s hold + 1 s fade-out) = 22.8 s in total.
    for _ in 0..(23 * 10) {
        if let Some(event) = narration.update(0.1) {
            events.push(event);
        }
    }
    assert_eq!(
        events,
        [
            NarrationEvent::BeatStarted(0),
            NarrationEvent::BeatStarted(1),
            NarrationEvent::BeatStarted(2),
            NarrationEvent::BeatStarted(3),
            NarrationEvent::Completed,
        ]
    );
    assert_eq!(narration.update(10.0), None);
}

#[test]
fn one_huge_step_still_reports_completion() {
    let mut narration = four_beats();
    assert_eq!(narration.update(1000.0), Some(NarrationEvent::Completed));
    assert!(narration.is_completed());
}

#[test]
fn skip_completes_and_is_idempotent() {
    let mut narration = four_beats();
    narration.update(2.0);
    assert!(narration.current().is_some());
    assert!(narration.skip());
    assert!(!narration.skip());
    assert!(narration.current().is_none());
    assert_eq!(narration.update(1.0), None);
    assert_eq!(narration.opacity(), 0.0);
}

#[test]
fn empty_intro_completes_after_the_delay() {
    let mut narration = NarrationSequencer::new(NarrationSettings {
        beats: Vec::new(),
        ..NarrationSettings::default()
    });
    assert_eq!(narration.update(0.5), None);
    assert_eq!(narration.update(0.5), Some(NarrationEvent::Completed));
}

#[test]
fn opacity_is_zero_outside_beats() {
    let mut narration = NarrationSequencer::new(NarrationSettings {
        start_delay: 1.0,
        fade_in: 0.5,
        fade_out: 0.5,
        beats: vec![Beat::new("only", 2.0)],
    });
    assert_eq!(narration.opacity(), 0.0);
    narration.update(1.25);
    assert!((narration.opacity() - 0.5).abs() < 1e-5);
    narration.update(1.0);
    assert!((narration.opacity() - 1.0).abs() < 1e-5);
}
