use serde::{Deserialize, Serialize};

use super::{phase::Phase, settings::PomodoroSettings};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

/// What a single tick did to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The timer was not running; nothing changed.
    Ignored,
    Counted { remaining: u32 },
    /// The countdown hit zero on this tick.
    Completed,
}

/// Countdown clock for the active phase.
///
/// The timer never schedules itself. Each call to [`PhaseTimer::tick`]
/// stands for one elapsed second delivered by the caller's cadence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTimer {
    phase: Phase,
    total_secs: u32,
    remaining_secs: u32,
    status: TimerStatus,
}

impl PhaseTimer {
    pub fn new(phase: Phase, settings: &PomodoroSettings) -> Self {
        let total_secs = phase.duration_secs(settings);
        Self {
            phase,
            total_secs,
            remaining_secs: total_secs,
            status: TimerStatus::Idle,
        }
    }

    /// Rebuild a timer partway through a phase. `remaining_secs` is clamped
    /// to the phase length; a zero value yields a completed timer.
    pub fn restore(
        phase: Phase,
        settings: &PomodoroSettings,
        remaining_secs: u32,
        status: TimerStatus,
    ) -> Self {
        let total_secs = phase.duration_secs(settings);
        let remaining_secs = remaining_secs.min(total_secs);
        let status = if remaining_secs == 0 {
            TimerStatus::Completed
        } else {
            status
        };
        Self {
            phase,
            total_secs,
            remaining_secs,
            status,
        }
    }

    pub fn start(&mut self) -> bool {
        match self.status {
            TimerStatus::Idle | TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                true
            }
            TimerStatus::Running | TimerStatus::Completed => false,
        }
    }

    pub fn pause(&mut self) -> bool {
        if self.status == TimerStatus::Running {
            self.status = TimerStatus::Paused;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self, phase: Phase, settings: &PomodoroSettings) {
        *self = Self::new(phase, settings);
    }

    pub fn tick(&mut self) -> Tick {
        if self.status != TimerStatus::Running {
            return Tick::Ignored;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.status = TimerStatus::Completed;
            Tick::Completed
        } else {
            Tick::Counted {
                remaining: self.remaining_secs,
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.total_secs - self.remaining_secs
    }

    /// Fraction of the phase already elapsed, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 1.0;
        }
        (self.elapsed_secs() as f64 / self.total_secs as f64).clamp(0.0, 1.0)
    }

    pub fn format_remaining(&self) -> String {
        format_clock(self.remaining_secs)
    }
}

/// Format seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
