// End-to-end session scenarios driven through the public API.
// Time is simulated: the test hands frame timestamps to `tick` and timer
// timestamps to `pump_timers`, exactly as the browser host does.

use glam::Vec2;
use honey_smash::Tuning;
use honey_smash::sim::{
    DismissReason, GameEvent, Layout, ObjectKind, RafaPhase, Session, SessionState, TickStatus,
    tick,
};

const SEED: u64 = 7;

/// 500x800 canvas: tray spans x 200..300, top edge at y 750
fn layout() -> Layout {
    Layout::from_canvas(500.0, 800.0)
}

/// One spawn on the first frame, then nothing; Rafa never shows up
fn quiet_tuning() -> Tuning {
    Tuning {
        spawn_interval_min: 1.0e6,
        spawn_interval_max: 1.0e6,
        rafa_max_appearances: 0,
        ..Tuning::default()
    }
}

/// Start a session, run the first frame and park its single object just
/// above the tray as `kind`
fn session_with_object_over_tray(kind: ObjectKind) -> (Session, Layout) {
    let layout = layout();
    let mut session = Session::new(SessionState::normal(), SEED, quiet_tuning());
    session.start(0.0);
    assert_eq!(tick(&mut session, 0.0, &layout), TickStatus::Running);
    assert_eq!(session.state.objects.len(), 1, "first frame spawns once");

    let object = &mut session.state.objects[0];
    object.kind = kind;
    object.size = layout.object_size;
    object.pos = Vec2::new(230.0, 740.0);
    session.drain_events();
    (session, layout)
}

fn caught(events: &[GameEvent]) -> Vec<(ObjectKind, i32)> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Caught { kind, points, .. } => Some((*kind, *points)),
            _ => None,
        })
        .collect()
}

/// Pump until Rafa is on screen; returns the time he appeared
fn rafa_appears(session: &mut Session) -> f64 {
    let due = session.next_timer_due().expect("Rafa should be armed");
    assert_eq!(session.pump_timers(due), 1);
    assert_eq!(session.rafa().phase(), RafaPhase::Active);
    due
}

#[test]
fn honey_in_tray_scores_twenty() {
    let (mut session, layout) = session_with_object_over_tray(ObjectKind::Honey);

    assert_eq!(tick(&mut session, 16.0, &layout), TickStatus::Running);

    assert_eq!(session.score(), 20);
    assert!(session.state.objects.is_empty());
    assert_eq!(caught(&session.drain_events()), vec![(ObjectKind::Honey, 20)]);
}

#[test]
fn shoe_in_tray_costs_five() {
    let (mut session, layout) = session_with_object_over_tray(ObjectKind::Zapato);

    tick(&mut session, 16.0, &layout);

    assert_eq!(session.score(), -5);
    assert_eq!(caught(&session.drain_events()), vec![(ObjectKind::Zapato, -5)]);
}

#[test]
fn swatting_rafa_after_four_ticks_costs_four() {
    let mut session = Session::new(SessionState::normal(), SEED, Tuning::default());
    session.start(0.0);
    let appeared = rafa_appears(&mut session);

    for k in 1..=4 {
        assert_eq!(session.pump_timers(appeared + 1000.0 * k as f64), 1);
    }
    assert_eq!(session.rafa().penalty_counter(), 4);
    assert_eq!(session.score(), 0, "nothing deducted until he leaves");

    assert_eq!(session.swat_rafa(appeared + 4500.0), Some(4));
    assert_eq!(session.score(), -4);

    let dismissed = session.drain_events().into_iter().find_map(|e| match e {
        GameEvent::RafaDismissed {
            penalty,
            reason,
            phrase,
        } => Some((penalty, reason, phrase)),
        _ => None,
    });
    let (penalty, reason, phrase) = dismissed.expect("dismissal event");
    assert_eq!(penalty, 4);
    assert_eq!(reason, DismissReason::Swatted);
    assert!(phrase.is_some());

    // Second swat finds nobody there
    assert_eq!(session.swat_rafa(appeared + 4600.0), None);
    assert_eq!(session.score(), -4);
}

#[test]
fn unswatted_rafa_expires_at_cap_and_rearms() {
    let mut session = Session::new(SessionState::normal(), SEED, Tuning::default());
    session.start(0.0);
    let appeared = rafa_appears(&mut session);

    for k in 1..=15 {
        session.pump_timers(appeared + 1000.0 * k as f64);
    }
    assert_eq!(session.rafa().penalty_counter(), 15);
    assert_eq!(session.score(), 0);

    let expired_at = appeared + 16_000.0;
    assert_eq!(session.pump_timers(expired_at), 1);
    assert_eq!(session.score(), -15);
    assert!(session.drain_events().iter().any(|e| matches!(
        e,
        GameEvent::RafaDismissed {
            penalty: 15,
            reason: DismissReason::Expired,
            phrase: None,
        }
    )));

    // Re-armed for the next appearance within the re-arm window
    assert_eq!(session.rafa().phase(), RafaPhase::Armed);
    let next = session.next_timer_due().expect("re-armed");
    assert!((expired_at + 5000.0..=expired_at + 10_000.0).contains(&next));
}

#[test]
fn time_running_out_mid_rafa_freezes_the_session() {
    let layout = layout();
    let tuning = Tuning {
        spawn_interval_min: 1.0e6,
        spawn_interval_max: 1.0e6,
        max_frame_delta: None,
        ..Tuning::default()
    };
    let mut session = Session::new(SessionState::normal(), SEED, tuning);
    session.start(0.0);
    tick(&mut session, 0.0, &layout);
    session.state.objects.clear();

    let appeared = rafa_appears(&mut session);
    assert_eq!(session.pump_timers(appeared + 2000.0), 2);
    assert_eq!(session.rafa().penalty_counter(), 2);
    session.drain_events();

    // One long frame runs the clock out
    let status = tick(&mut session, 61_000.0, &layout);
    assert_eq!(status, TickStatus::Ended { score: 0 });
    assert!(session.is_over());
    assert_eq!(session.pending_timers(), 0);

    let ended: Vec<_> = session
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::SessionEnded { .. }))
        .collect();
    assert_eq!(ended.len(), 1);

    // Nothing can touch the score any more
    assert_eq!(session.pump_timers(1.0e9), 0);
    assert_eq!(session.swat_rafa(1.0e9), None);
    assert_eq!(tick(&mut session, 62_000.0, &layout), TickStatus::Inactive);
    assert_eq!(session.score(), 0);
    assert!(session.drain_events().is_empty());
}
