use serde::{Deserialize, Serialize};

use super::settings::PomodoroSettings;

/// One countdown segment of the pomodoro cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Focus,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Focus, Phase::ShortBreak, Phase::LongBreak];

    /// Configured length of this phase in seconds.
    pub fn duration_secs(self, settings: &PomodoroSettings) -> u32 {
        let minutes = match self {
            Phase::Focus => settings.focus_minutes(),
            Phase::ShortBreak => settings.short_break_minutes(),
            Phase::LongBreak => settings.long_break_minutes(),
        };
        minutes * 60
    }

    pub fn is_break(self) -> bool {
        !matches!(self, Phase::Focus)
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Focus => "Focus Session",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Focus => "focus",
            Phase::ShortBreak => "shortBreak",
            Phase::LongBreak => "longBreak",
        }
    }
}
