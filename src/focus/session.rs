use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ReportError;

use super::{
    cadence::Cadence,
    history::{HistoryEntry, SessionHistory},
    phase::Phase,
    reporter::SessionReporter,
    settings::PomodoroSettings,
    timer::{PhaseTimer, Tick, TimerStatus},
};

/// A finished phase and the phase that was started in its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub finished: Phase,
    pub next: Phase,
    /// Focus phases completed so far, including `finished` when it was one.
    pub focus_completed: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running.
    Idle,
    Counted { remaining: u32 },
    Transitioned(Transition),
}

/// Timer position saved between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub remaining_secs: u32,
    pub focus_completed: u32,
    pub saved_at: DateTime<Utc>,
}

/// One activation of focus mode.
///
/// Owns the phase timer, the completed-focus counter and the history log,
/// and chains phases automatically when a countdown reaches zero. The
/// reporter sees a session end exactly once, either from [`FocusSession::end`]
/// or when the session is dropped.
pub struct FocusSession<R: SessionReporter> {
    settings: PomodoroSettings,
    timer: PhaseTimer,
    focus_completed: u32,
    history: SessionHistory,
    reporter: R,
    reporting: bool,
}

impl<R: SessionReporter> FocusSession<R> {
    pub fn new(settings: PomodoroSettings, reporter: R) -> Self {
        Self {
            timer: PhaseTimer::new(Phase::Focus, &settings),
            settings,
            focus_completed: 0,
            history: SessionHistory::new(),
            reporter,
            reporting: false,
        }
    }

    /// Continue from a saved snapshot. The timer comes back stopped; a
    /// partly elapsed phase is restored as paused.
    pub fn resume(settings: PomodoroSettings, reporter: R, snapshot: &SessionSnapshot) -> Self {
        let total = snapshot.phase.duration_secs(&settings);
        let status = if snapshot.remaining_secs < total {
            TimerStatus::Paused
        } else {
            TimerStatus::Idle
        };
        let mut session = Self::new(settings, reporter);
        session.timer = PhaseTimer::restore(snapshot.phase, &settings, snapshot.remaining_secs, status);
        session.focus_completed = snapshot.focus_completed;
        if session.timer.status() == TimerStatus::Completed {
            session.timer.reset(snapshot.phase, &settings);
        }
        debug!(
            phase = snapshot.phase.as_str(),
            remaining = session.timer.remaining_secs(),
            focus_completed = snapshot.focus_completed,
            "resumed focus session"
        );
        session
    }

    pub fn start(&mut self) -> bool {
        if !self.timer.start() {
            return false;
        }
        self.open_if_focus();
        true
    }

    /// Open the reporter session when a focus phase begins and none is open.
    fn open_if_focus(&mut self) {
        if self.timer.phase() != Phase::Focus || self.reporting {
            return;
        }
        self.reporting = true;
        info!("focus session started");
        self.notify("session start", R::report_session_start);
    }

    pub fn pause(&mut self) -> bool {
        self.timer.pause()
    }

    /// Start when stopped, pause when running.
    pub fn toggle(&mut self) -> bool {
        if self.timer.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Rewind the current phase to its full length and stop.
    pub fn reset(&mut self) {
        self.timer.reset(self.timer.phase(), &self.settings);
    }

    /// Switch to `phase` by hand. The timer is reset and left stopped.
    pub fn select_phase(&mut self, phase: Phase) {
        self.timer.reset(phase, &self.settings);
    }

    /// Swap in new settings. A timer that has not started yet picks up the
    /// new length immediately; otherwise the change applies from the next
    /// phase.
    pub fn set_settings(&mut self, settings: PomodoroSettings) {
        self.settings = settings;
        if self.timer.status() == TimerStatus::Idle {
            self.timer.reset(self.timer.phase(), &self.settings);
        }
    }

    /// Count one second off the active phase.
    pub fn tick(&mut self) -> TickOutcome {
        let phase = self.timer.phase();
        let tick = self.timer.tick();
        if tick != Tick::Ignored && phase == Phase::Focus {
            self.notify("focus second", R::report_focus_second);
        }

        match tick {
            Tick::Ignored => TickOutcome::Idle,
            Tick::Counted { remaining } => TickOutcome::Counted { remaining },
            Tick::Completed => TickOutcome::Transitioned(self.advance()),
        }
    }

    /// Deliver every tick the cadence says is due.
    pub fn pump(&mut self, cadence: &mut impl Cadence) -> Vec<Transition> {
        let due = cadence.due_ticks(self.timer.is_running());
        (0..due)
            .filter_map(|_| match self.tick() {
                TickOutcome::Transitioned(transition) => Some(transition),
                _ => None,
            })
            .collect()
    }

    fn advance(&mut self) -> Transition {
        let finished = self.timer.phase();
        self.history.push(HistoryEntry {
            phase: finished,
            duration_secs: self.timer.total_secs(),
            completed_at: Utc::now(),
        });

        let next = match finished {
            Phase::Focus => {
                self.focus_completed += 1;
                self.notify("pomodoro", R::report_pomodoro_completed);
                if self.focus_completed % self.settings.long_break_interval().get() == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Focus,
        };

        self.timer.reset(next, &self.settings);
        self.timer.start();
        self.open_if_focus();

        info!(
            finished = finished.as_str(),
            next = next.as_str(),
            focus_completed = self.focus_completed,
            "phase completed"
        );

        Transition {
            finished,
            next,
            focus_completed: self.focus_completed,
        }
    }

    /// Close the reporter session if one is open. Safe to call repeatedly.
    pub fn end(&mut self) {
        if !self.reporting {
            return;
        }
        self.reporting = false;
        info!(
            focus_completed = self.focus_completed,
            phases = self.history.len(),
            "focus session ended"
        );
        self.notify("session end", R::report_session_end);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.timer.phase(),
            remaining_secs: self.timer.remaining_secs(),
            focus_completed: self.focus_completed,
            saved_at: Utc::now(),
        }
    }

    pub fn settings(&self) -> &PomodoroSettings {
        &self.settings
    }

    pub fn timer(&self) -> &PhaseTimer {
        &self.timer
    }

    pub fn phase(&self) -> Phase {
        self.timer.phase()
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn focus_completed(&self) -> u32 {
        self.focus_completed
    }

    /// Position within the current long-break cycle, 1-based.
    pub fn cycle_position(&self) -> u32 {
        let interval = self.settings.long_break_interval().get();
        (self.focus_completed % interval) + 1
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn is_reporting(&self) -> bool {
        self.reporting
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    fn notify(&mut self, what: &str, call: fn(&mut R) -> Result<(), ReportError>) {
        if let Err(err) = call(&mut self.reporter) {
            warn!(error = %err, "session reporter failed to record {what}");
        }
    }
}

impl<R: SessionReporter> Drop for FocusSession<R> {
    fn drop(&mut self) {
        self.end();
    }
}
