use ratatui::style::Color;

use crate::focus::Phase;

pub const THEMES: &[&str] = &["default", "nord", "dracula", "gruvbox", "solarized"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub focus: Color,
    pub short_break: Color,
    pub long_break: Color,
    pub border: Color,
    pub accent: Color,
}

impl Theme {
    pub fn named(name: &str) -> Self {
        match name {
            "nord" => Theme {
                focus: Color::Rgb(136, 192, 208),
                short_break: Color::Rgb(163, 190, 140),
                long_break: Color::Rgb(180, 142, 173),
                border: Color::Rgb(94, 129, 172),
                accent: Color::Rgb(235, 203, 139),
            },
            "dracula" => Theme {
                focus: Color::Rgb(189, 147, 249),
                short_break: Color::Rgb(139, 233, 253),
                long_break: Color::Rgb(80, 250, 123),
                border: Color::Rgb(98, 114, 164),
                accent: Color::Rgb(255, 121, 198),
            },
            "gruvbox" => Theme {
                focus: Color::Rgb(254, 128, 25),
                short_break: Color::Rgb(142, 192, 124),
                long_break: Color::Rgb(211, 134, 155),
                border: Color::Rgb(213, 196, 161),
                accent: Color::Rgb(250, 189, 47),
            },
            "solarized" => Theme {
                focus: Color::Rgb(38, 139, 210),
                short_break: Color::Rgb(42, 161, 152),
                long_break: Color::Rgb(108, 113, 196),
                border: Color::Rgb(147, 161, 161),
                accent: Color::Rgb(181, 137, 0),
            },
            _ => Theme {
                focus: Color::Rgb(100, 181, 246),
                short_break: Color::Rgb(0, 200, 220),
                long_break: Color::Rgb(170, 110, 255),
                border: Color::Rgb(0, 200, 255),
                accent: Color::Rgb(255, 100, 0),
            },
        }
    }

    pub fn phase_color(&self, phase: Phase) -> Color {
        match phase {
            Phase::Focus => self.focus,
            Phase::ShortBreak => self.short_break,
            Phase::LongBreak => self.long_break,
        }
    }
}

/// Next or previous theme name, wrapping around. Unknown names start over.
pub fn cycle(current: &str, forward: bool) -> &'static str {
    let idx = THEMES.iter().position(|&t| t == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % THEMES.len()
    } else {
        (idx + THEMES.len() - 1) % THEMES.len()
    };
    THEMES[next]
}
