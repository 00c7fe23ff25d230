use std::num::NonZeroU32;

use crate::error::SettingsError;

pub const MAX_FOCUS_MINUTES: u32 = 240;
pub const MAX_SHORT_BREAK_MINUTES: u32 = 60;
pub const MAX_LONG_BREAK_MINUTES: u32 = 120;
pub const MAX_LONG_BREAK_INTERVAL: u32 = 12;

const DEFAULT_FOCUS: NonZeroU32 = nz(25);
const DEFAULT_SHORT_BREAK: NonZeroU32 = nz(5);
const DEFAULT_LONG_BREAK: NonZeroU32 = nz(15);
const DEFAULT_INTERVAL: NonZeroU32 = nz(4);

/// Validated pomodoro settings.
///
/// Every field is non-zero, so the long-break rule can take a modulo
/// without guarding against an empty interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PomodoroSettings {
    focus_minutes: NonZeroU32,
    short_break_minutes: NonZeroU32,
    long_break_minutes: NonZeroU32,
    long_break_interval: NonZeroU32,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            focus_minutes: DEFAULT_FOCUS,
            short_break_minutes: DEFAULT_SHORT_BREAK,
            long_break_minutes: DEFAULT_LONG_BREAK,
            long_break_interval: DEFAULT_INTERVAL,
        }
    }
}

impl PomodoroSettings {
    pub fn new(
        focus_minutes: u32,
        short_break_minutes: u32,
        long_break_minutes: u32,
        long_break_interval: u32,
    ) -> Result<Self, SettingsError> {
        Ok(Self {
            focus_minutes: minutes("focus duration", focus_minutes, MAX_FOCUS_MINUTES)?,
            short_break_minutes: minutes(
                "short break duration",
                short_break_minutes,
                MAX_SHORT_BREAK_MINUTES,
            )?,
            long_break_minutes: minutes(
                "long break duration",
                long_break_minutes,
                MAX_LONG_BREAK_MINUTES,
            )?,
            long_break_interval: interval(long_break_interval)?,
        })
    }

    pub fn focus_minutes(&self) -> u32 {
        self.focus_minutes.get()
    }

    pub fn short_break_minutes(&self) -> u32 {
        self.short_break_minutes.get()
    }

    pub fn long_break_minutes(&self) -> u32 {
        self.long_break_minutes.get()
    }

    pub fn long_break_interval(&self) -> NonZeroU32 {
        self.long_break_interval
    }
}

fn minutes(field: &'static str, value: u32, max: u32) -> Result<NonZeroU32, SettingsError> {
    let value = NonZeroU32::new(value).ok_or(SettingsError::ZeroDuration { field })?;
    if value.get() > max {
        return Err(SettingsError::DurationTooLong {
            field,
            value: value.get(),
            max,
        });
    }
    Ok(value)
}

fn interval(value: u32) -> Result<NonZeroU32, SettingsError> {
    let value = NonZeroU32::new(value).ok_or(SettingsError::ZeroInterval)?;
    if value.get() > MAX_LONG_BREAK_INTERVAL {
        return Err(SettingsError::IntervalTooLarge {
            value: value.get(),
            max: MAX_LONG_BREAK_INTERVAL,
        });
    }
    Ok(value)
}

const fn nz(value: u32) -> NonZeroU32 {
    match NonZeroU32::new(value) {
        Some(v) => v,
        None => panic!("zero default"),
    }
}
