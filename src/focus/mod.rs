//! Pomodoro focus-session core
//!
//! A single-threaded state machine: the phase timer counts down once per
//! delivered tick, the session chains focus and break phases, logs every
//! completed phase, and tells a [`SessionReporter`] about progress.

pub mod cadence;
pub mod history;
pub mod phase;
pub mod reporter;
pub mod session;
pub mod settings;
pub mod timer;

pub use cadence::{Cadence, IntervalCadence, TICK_INTERVAL};
pub use history::{HistoryEntry, SessionHistory};
pub use phase::Phase;
pub use reporter::{NullReporter, SessionReporter};
pub use session::{FocusSession, SessionSnapshot, TickOutcome, Transition};
pub use settings::PomodoroSettings;
pub use timer::{format_clock, PhaseTimer, Tick, TimerStatus};
