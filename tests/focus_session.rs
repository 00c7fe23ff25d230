use std::time::{Duration, Instant};

use chrono::Utc;
use focusmode::{
    ReportError,
    focus::{
        Cadence, FocusSession, IntervalCadence, NullReporter, Phase, PomodoroSettings,
        SessionReporter, SessionSnapshot, TickOutcome, TimerStatus, Transition,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Start,
    FocusSecond,
    Pomodoro,
    End,
}

#[derive(Debug, Default)]
struct Recorder {
    events: Vec<Event>,
}

impl Recorder {
    fn count(&self, event: Event) -> usize {
        self.events.iter().filter(|&&e| e == event).count()
    }
}

impl SessionReporter for Recorder {
    fn report_session_start(&mut self) -> Result<(), ReportError> {
        self.events.push(Event::Start);
        Ok(())
    }

    fn report_focus_second(&mut self) -> Result<(), ReportError> {
        self.events.push(Event::FocusSecond);
        Ok(())
    }

    fn report_pomodoro_completed(&mut self) -> Result<(), ReportError> {
        self.events.push(Event::Pomodoro);
        Ok(())
    }

    fn report_session_end(&mut self) -> Result<(), ReportError> {
        self.events.push(Event::End);
        Ok(())
    }
}

/// Reporter whose backing store is always unreachable.
struct Unreachable;

impl SessionReporter for Unreachable {
    fn report_session_start(&mut self) -> Result<(), ReportError> {
        Err(ReportError::Unavailable("store offline".into()))
    }

    fn report_focus_second(&mut self) -> Result<(), ReportError> {
        Err(ReportError::Unavailable("store offline".into()))
    }

    fn report_pomodoro_completed(&mut self) -> Result<(), ReportError> {
        Err(ReportError::Unavailable("store offline".into()))
    }

    fn report_session_end(&mut self) -> Result<(), ReportError> {
        Err(ReportError::Unavailable("store offline".into()))
    }
}

/// Cadence that hands out a fixed number of ticks per poll.
struct Burst(u32);

impl Cadence for Burst {
    fn due_ticks(&mut self, running: bool) -> u32 {
        if running { self.0 } else { 0 }
    }
}

fn settings(focus: u32, short: u32, long: u32, interval: u32) -> PomodoroSettings {
    PomodoroSettings::new(focus, short, long, interval).unwrap()
}

fn finish_phase<R: SessionReporter>(session: &mut FocusSession<R>) -> Transition {
    let remaining = session.timer().remaining_secs();
    for _ in 1..remaining {
        assert!(matches!(session.tick(), TickOutcome::Counted { .. }));
    }
    match session.tick() {
        TickOutcome::Transitioned(t) => t,
        other => panic!("expected a transition, got {other:?}"),
    }
}

#[test]
fn focus_ticks_reach_zero_exactly() {
    let settings = settings(25, 5, 15, 4);
    let mut session = FocusSession::new(settings, NullReporter);
    session.start();

    let total = Phase::Focus.duration_secs(&settings);
    for _ in 0..total - 1 {
        session.tick();
    }
    assert_eq!(session.timer().remaining_secs(), 1);
    assert_eq!(session.phase(), Phase::Focus);

    let outcome = session.tick();
    assert!(matches!(
        outcome,
        TickOutcome::Transitioned(Transition {
            finished: Phase::Focus,
            ..
        })
    ));
}

#[test]
fn long_break_follows_every_interval_multiple() {
    for interval in 1..=6 {
        let mut session = FocusSession::new(settings(1, 1, 1, interval), NullReporter);
        session.start();
        for n in 1..=20u32 {
            let after_focus = finish_phase(&mut session);
            assert_eq!(after_focus.finished, Phase::Focus);
            assert_eq!(after_focus.focus_completed, n);
            let expected = if n % interval == 0 {
                Phase::LongBreak
            } else {
                Phase::ShortBreak
            };
            assert_eq!(after_focus.next, expected, "interval {interval}, pomodoro {n}");

            let after_break = finish_phase(&mut session);
            assert_eq!(after_break.next, Phase::Focus);
            assert_eq!(session.focus_completed(), n, "breaks never count");
        }
    }
}

#[test]
fn history_tracks_every_completed_phase_in_order() {
    let mut session = FocusSession::new(settings(1, 1, 2, 2), NullReporter);
    session.start();
    let mut finished = Vec::new();
    for _ in 0..7 {
        finished.push(finish_phase(&mut session).finished);
    }

    let history = session.history();
    assert_eq!(history.len(), 7);
    let logged: Vec<Phase> = history.iter().map(|e| e.phase).collect();
    assert_eq!(logged, finished);
    assert_eq!(
        logged,
        vec![
            Phase::Focus,
            Phase::ShortBreak,
            Phase::Focus,
            Phase::LongBreak,
            Phase::Focus,
            Phase::ShortBreak,
            Phase::Focus,
        ]
    );
    assert!(
        history
            .iter()
            .zip(history.iter().skip(1))
            .all(|(a, b)| a.completed_at <= b.completed_at)
    );
    let durations: Vec<u32> = history.iter().map(|e| e.duration_secs).collect();
    assert_eq!(durations, vec![60, 60, 60, 120, 60, 60, 60]);

    let newest: Vec<Phase> = history.recent_first().map(|e| e.phase).collect();
    let mut reversed = logged.clone();
    reversed.reverse();
    assert_eq!(newest, reversed);
}

#[test]
fn history_entry_is_logged_before_the_next_phase_starts() {
    let mut session = FocusSession::new(settings(1, 1, 1, 4), NullReporter);
    session.start();
    let transition = finish_phase(&mut session);
    let last = session.history().last().unwrap();
    assert_eq!(last.phase, transition.finished);
    assert_eq!(session.phase(), transition.next);
    assert_eq!(session.timer().remaining_secs(), 60);
    assert!(session.is_running());
}

#[test]
fn pause_resume_neither_gains_nor_loses_time() {
    let mut session = FocusSession::new(settings(25, 5, 15, 4), NullReporter);
    session.start();
    for _ in 0..100 {
        session.tick();
    }
    session.pause();
    let at_pause = session.timer().remaining_secs();
    for _ in 0..50 {
        assert_eq!(session.tick(), TickOutcome::Idle);
    }
    session.start();
    assert_eq!(session.timer().remaining_secs(), at_pause);
    session.tick();
    assert_eq!(session.timer().remaining_secs(), at_pause - 1);
}

#[test]
fn reset_always_restores_full_duration() {
    let settings = settings(25, 5, 15, 4);
    let mut session = FocusSession::new(settings, NullReporter);
    for phase in Phase::ALL {
        session.select_phase(phase);
        session.start();
        for _ in 0..30 {
            session.tick();
        }
        session.reset();
        assert_eq!(session.timer().remaining_secs(), phase.duration_secs(&settings));
        assert_eq!(session.timer().status(), TimerStatus::Idle);
    }
}

#[test]
fn fourth_pomodoro_earns_long_break_then_fifth_a_short_one() {
    let snapshot = SessionSnapshot {
        phase: Phase::Focus,
        remaining_secs: 25 * 60,
        focus_completed: 3,
        saved_at: Utc::now(),
    };
    let mut session = FocusSession::resume(settings(25, 5, 15, 4), NullReporter, &snapshot);
    assert_eq!(session.focus_completed(), 3);
    assert_eq!(session.timer().status(), TimerStatus::Idle);
    session.start();

    let fourth = finish_phase(&mut session);
    assert_eq!(fourth.next, Phase::LongBreak);
    assert_eq!(session.timer().remaining_secs(), 15 * 60);

    let long_break = finish_phase(&mut session);
    assert_eq!(long_break.next, Phase::Focus);

    let fifth = finish_phase(&mut session);
    assert_eq!(fifth.focus_completed, 5);
    assert_eq!(fifth.next, Phase::ShortBreak);
}

#[test]
fn interval_of_one_always_takes_long_breaks() {
    let mut session = FocusSession::new(settings(1, 1, 1, 1), NullReporter);
    session.start();
    for _ in 0..5 {
        assert_eq!(finish_phase(&mut session).next, Phase::LongBreak);
        assert_eq!(finish_phase(&mut session).next, Phase::Focus);
    }
}

#[test]
fn teardown_while_running_reports_end_once() {
    let mut recorder = Recorder::default();
    {
        let mut session = FocusSession::new(settings(25, 5, 15, 4), &mut recorder);
        session.start();
        let mut cadence = IntervalCadence::default();
        let t0 = Instant::now();
        cadence.due_ticks_at(t0, true);
        for _ in 0..cadence.due_ticks_at(t0 + Duration::from_millis(3400), true) {
            session.tick();
        }
        assert!(session.is_running());
        // Dropped here, 0.4 s into the fourth second.
    }
    assert_eq!(recorder.count(Event::Start), 1);
    assert_eq!(recorder.count(Event::FocusSecond), 3);
    assert_eq!(recorder.count(Event::End), 1);
    assert_eq!(recorder.events.last(), Some(&Event::End));
}

#[test]
fn explicit_end_then_drop_reports_once() {
    let mut recorder = Recorder::default();
    {
        let mut session = FocusSession::new(settings(25, 5, 15, 4), &mut recorder);
        session.start();
        session.tick();
        session.end();
    }
    assert_eq!(recorder.count(Event::End), 1);
}

#[test]
fn session_started_on_a_break_reports_once_focus_begins() {
    let mut recorder = Recorder::default();
    {
        let mut session = FocusSession::new(settings(25, 5, 15, 4), &mut recorder);
        session.select_phase(Phase::ShortBreak);
        session.start();
        assert!(!session.is_reporting());
        assert_eq!(finish_phase(&mut session).next, Phase::Focus);
        for _ in 0..10 {
            session.tick();
        }
        assert!(session.is_running());
    }
    assert_eq!(recorder.count(Event::Start), 1);
    assert_eq!(recorder.count(Event::FocusSecond), 10);
    assert_eq!(recorder.count(Event::End), 1);
    assert_eq!(recorder.events.first(), Some(&Event::Start));
    assert_eq!(recorder.events.last(), Some(&Event::End));
}

#[test]
fn teardown_without_focus_start_reports_nothing() {
    let mut recorder = Recorder::default();
    {
        let _session = FocusSession::new(settings(25, 5, 15, 4), &mut recorder);
    }
    assert!(recorder.events.is_empty());
}

#[test]
fn reporter_sees_events_in_order() {
    let mut recorder = Recorder::default();
    {
        let mut session = FocusSession::new(settings(1, 1, 1, 4), &mut recorder);
        session.start();
        finish_phase(&mut session);
        finish_phase(&mut session);
    }
    let events = &recorder.events;
    assert_eq!(events.first(), Some(&Event::Start));
    assert_eq!(recorder.count(Event::FocusSecond), 60);
    assert_eq!(recorder.count(Event::Pomodoro), 1);
    // The pomodoro is reported right after the last focus second.
    let pomodoro_at = events.iter().position(|&e| e == Event::Pomodoro).unwrap();
    assert_eq!(pomodoro_at, 61);
    assert_eq!(events.last(), Some(&Event::End));
}

#[test]
fn failing_reporter_never_stalls_transitions() {
    let mut session = FocusSession::new(settings(1, 1, 1, 2), Unreachable);
    session.start();
    let first = finish_phase(&mut session);
    assert_eq!(first.next, Phase::ShortBreak);
    finish_phase(&mut session);
    let second = finish_phase(&mut session);
    assert_eq!(second.next, Phase::LongBreak);
    assert_eq!(session.focus_completed(), 2);
    assert_eq!(session.history().len(), 3);
    session.end();
    assert!(!session.is_reporting());
}

#[test]
fn pump_delivers_due_ticks_across_phase_boundaries() {
    let mut session = FocusSession::new(settings(1, 1, 1, 4), NullReporter);
    assert!(session.pump(&mut Burst(90)).is_empty(), "stopped timer gets no ticks");

    session.start();
    let transitions = session.pump(&mut Burst(90));
    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0].next, Phase::ShortBreak);
    assert_eq!(session.timer().remaining_secs(), 30);

    let transitions = session.pump(&mut Burst(30));
    assert_eq!(transitions[0].next, Phase::Focus);
    assert_eq!(session.phase(), Phase::Focus);
}

#[test]
fn zero_interval_never_reaches_the_timer() {
    assert!(matches!(
        PomodoroSettings::new(25, 5, 15, 0),
        Err(focusmode::SettingsError::ZeroInterval)
    ));
}
