use chrono::Local;
use ratatui::{prelude::*, widgets::*};

use crate::focus::{Phase, TimerStatus, format_clock};

use super::app::{App, SettingsField, View};

const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const HISTORY_ROWS: usize = 15;

pub fn render(f: &mut Frame, app: &App) {
    match app.view {
        View::Timer => render_timer(f, app),
        View::History => render_history(f, app),
        View::Stats => render_stats(f, app),
        View::Settings => render_settings(f, app),
        View::Help => render_help(f, app),
    }
}

fn phase_title(phase: Phase) -> &'static str {
    match phase {
        Phase::Focus => "FOCUS TIME",
        Phase::ShortBreak => "SHORT BREAK",
        Phase::LongBreak => "LONG BREAK",
    }
}

fn phase_hint(phase: Phase) -> &'static str {
    if phase.is_break() {
        "Take a break and relax"
    } else {
        "Stay focused on your task"
    }
}

fn render_timer(f: &mut Frame, app: &App) {
    let session = &app.session;
    let timer = session.timer();
    let color = app.theme.phase_color(timer.phase());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)])
        .split(f.size());

    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(app.theme.border))
            .title(Span::styled(
                " FOCUS MODE ",
                Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD),
            )),
        chunks[0],
    );

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Length(1), // tabs
            Constraint::Length(1),
            Constraint::Length(2), // phase + hint
            Constraint::Length(1),
            Constraint::Length(1), // clock
            Constraint::Length(1),
            Constraint::Length(1), // status
            Constraint::Length(1),
            Constraint::Length(3), // gauge
            Constraint::Length(1),
            Constraint::Length(2), // counters
            Constraint::Percentage(10),
        ])
        .split(chunks[1]);

    let tabs = Phase::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, &phase)| {
            let style = if phase == timer.phase() {
                Style::default()
                    .fg(app.theme.phase_color(phase))
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            [
                Span::styled(format!("{} {}", i + 1, phase.label()), style),
                Span::raw("   "),
            ]
        })
        .collect::<Vec<_>>();
    f.render_widget(
        Paragraph::new(Line::from(tabs)).alignment(Alignment::Center),
        sections[1],
    );

    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                phase_title(timer.phase()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                phase_hint(timer.phase()),
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Center),
        sections[3],
    );

    f.render_widget(
        Paragraph::new(timer.format_remaining())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[5],
    );

    let status = match timer.status() {
        TimerStatus::Running => {
            let dot = if app.animation_frame < 10 { "●" } else { "○" };
            (format!("{dot} RUNNING"), Color::Green)
        }
        TimerStatus::Paused => ("⏸  PAUSED".to_string(), Color::Yellow),
        TimerStatus::Idle => ("READY - press Space".to_string(), Color::Gray),
        TimerStatus::Completed => ("DONE".to_string(), Color::Green),
    };
    f.render_widget(
        Paragraph::new(status.0)
            .style(Style::default().fg(status.1).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[7],
    );

    f.render_widget(
        Gauge::default()
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .ratio(timer.progress()),
        sections[9],
    );

    let interval = session.settings().long_break_interval().get();
    let stats = session.reporter().stats();
    let counters = vec![
        Line::from(format!(
            "Pomodoro {} of {}  •  {} completed this session",
            session.cycle_position(),
            interval,
            session.focus_completed()
        )),
        Line::from(format!("{} pomodoros completed today", stats.pomodoros_today)),
    ];
    f.render_widget(
        Paragraph::new(counters)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        sections[11],
    );

    let controls = vec![
        Line::from(vec![
            span_key("Space", app),
            Span::raw(" Start/Pause  •  "),
            span_key("R", app),
            Span::raw(" Reset  •  "),
            span_key("1-3", app),
            Span::raw(" Phase"),
        ]),
        Line::from(vec![
            span_key("H", app),
            Span::raw(" History  •  "),
            span_key("S", app),
            Span::raw(" Stats  •  "),
            span_key("D", app),
            Span::raw(" Settings  •  "),
            span_key("?", app),
            Span::raw(" Help  •  "),
            span_key("Q", app),
            Span::raw(" Quit"),
        ]),
    ];
    f.render_widget(
        Paragraph::new(controls)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

fn span_key<'a>(text: &'a str, app: &App) -> Span<'a> {
    Span::styled(
        text,
        Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD),
    )
}

fn panel<'a>(title: &'a str, app: &App) -> Block<'a> {
    Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.border))
}

fn heading<'a>(text: &'a str, app: &App) -> Line<'a> {
    Line::from(Span::styled(
        text,
        Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD),
    ))
}

fn hint(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    ))
}

fn render_history(f: &mut Frame, app: &App) {
    let area = centered_rect(75, 85, f.size());
    let history = app.session.history();

    let mut lines = vec![
        Line::from(""),
        heading("TODAY'S SESSIONS", app),
        Line::from(""),
        hint("  Completed phases, newest first"),
        Line::from(""),
    ];

    if history.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Nothing completed yet in this session.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for entry in history.recent_first().take(HISTORY_ROWS) {
            let at = entry
                .completed_at
                .with_timezone(&Local)
                .format("%H:%M:%S")
                .to_string();
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("■ ", Style::default().fg(app.theme.phase_color(entry.phase))),
                Span::styled(entry.phase.label(), Style::default().fg(Color::White)),
                Span::raw("  •  "),
                Span::styled(at, Style::default().fg(Color::Gray)),
                Span::raw("  •  "),
                Span::styled(format_clock(entry.duration_secs), Style::default().fg(Color::Cyan)),
            ]));
        }
        if history.len() > HISTORY_ROWS {
            lines.push(Line::from(""));
            lines.push(hint("  ..."));
        }
    }

    f.render_widget(Paragraph::new(lines).block(panel(" History ", app)), area);
}

fn render_stats(f: &mut Frame, app: &App) {
    let area = centered_rect(70, 85, f.size());
    let stats = app.session.reporter().stats();
    let history = app.session.history();

    let mut lines = vec![
        Line::from(""),
        heading("STATISTICS", app),
        Line::from(""),
        hint("  E to export CSV  •  Esc to go back"),
        Line::from(""),
        Line::from(Span::styled(
            "  This session:",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        stat_line("Pomodoros", app.session.focus_completed().to_string()),
        stat_line(
            "Focus time",
            format_clock(history.total_secs_for(Phase::Focus) as u32),
        ),
        Line::from(""),
        Line::from(Span::styled(
            "  Today:",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        stat_line("Pomodoros", stats.pomodoros_today.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "  All time:",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        stat_line("Sessions", stats.total_sessions.to_string()),
        stat_line("Pomodoros", stats.total_pomodoros.to_string()),
        stat_line("Focus time", format!("{:.1} hours", stats.total_focus_hours())),
        Line::from(""),
        Line::from(Span::styled(
            "  This week:",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
    ];

    let max = stats.weekly_pomodoros.iter().copied().max().unwrap_or(0).max(1);
    for (day, &count) in DAYS.iter().zip(stats.weekly_pomodoros.iter()) {
        let width = (count as f64 / max as f64 * 30.0) as usize;
        lines.push(Line::from(vec![
            Span::styled(format!("     {day} "), Style::default().fg(Color::Gray)),
            Span::styled("█".repeat(width), Style::default().fg(app.theme.accent)),
            Span::raw(format!(" {count}")),
        ]));
    }

    if let Some(status) = &app.status {
        lines.push(Line::from(""));
        lines.push(hint(status));
    }

    f.render_widget(Paragraph::new(lines).block(panel(" Statistics ", app)), area);
}

fn stat_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("     {label}: ")),
        Span::styled(value, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    ])
}

fn render_settings(f: &mut Frame, app: &App) {
    let area = centered_rect(70, 85, f.size());

    let mut lines = vec![
        Line::from(""),
        heading("SETTINGS", app),
        Line::from(""),
        hint("  ↑↓/jk: Navigate  •  Enter: Edit  •  Space: Toggle  •  ←→/hl: Theme"),
        Line::from(""),
    ];

    for field in SettingsField::ALL {
        let label = match field {
            SettingsField::FocusDuration => "Focus Duration",
            SettingsField::ShortBreakDuration => "Short Break",
            SettingsField::LongBreakDuration => "Long Break",
            SettingsField::LongBreakInterval => "Long Break Interval",
            SettingsField::Theme => "Theme",
            SettingsField::Sound => "Sound",
            SettingsField::Notifications => "Notifications",
        };
        let selected = app.settings_field == field;
        let editing = selected && app.settings_editing;

        lines.push(Line::from(""));
        if editing {
            lines.push(Line::from(Span::styled(
                format!("  > {label}"),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(
                    app.settings_input.as_str(),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::styled("█", Style::default().fg(Color::Green)),
            ]));
        } else {
            let (prefix, label_style, value_style) = if selected {
                (
                    "  > ",
                    Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )
            } else {
                ("    ", Style::default().fg(Color::Gray), Style::default().fg(Color::DarkGray))
            };
            lines.push(Line::from(Span::styled(format!("{prefix}{label}"), label_style)));
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(app.setting_value(field), value_style),
            ]));
        }
    }

    if let Some(status) = &app.status {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {status}"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )));
    }

    f.render_widget(Paragraph::new(lines).block(panel(" Settings ", app)), area);
}

fn render_help(f: &mut Frame, app: &App) {
    let area = centered_rect(70, 85, f.size());

    let help_text = vec![
        Line::from(""),
        heading("KEYBOARD SHORTCUTS", app),
        Line::from(""),
        Line::from("  Timer:"),
        help_line("Space", "Start / pause"),
        help_line("R", "Reset the current phase"),
        help_line("1 / 2 / 3", "Switch to focus / short break / long break"),
        Line::from(""),
        Line::from("  Views:"),
        help_line("H", "Session history"),
        help_line("S", "Statistics (E exports CSV)"),
        help_line("D", "Settings"),
        help_line("?", "Toggle help"),
        Line::from(""),
        Line::from("  General:"),
        help_line("Q / Esc", "Back / quit"),
        help_line("Ctrl+C", "Quit"),
        Line::from(""),
        hint("  Phases chain automatically: every few pomodoros earn a long break."),
    ];

    f.render_widget(
        Paragraph::new(help_text)
            .alignment(Alignment::Left)
            .block(panel(" Help ", app)),
        area,
    );
}

fn help_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw("    "),
        Span::styled(key, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!("  {desc}")),
    ])
}

fn centered_rect(w: u16, h: u16, r: Rect) -> Rect {
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - h) / 2),
            Constraint::Percentage(h),
            Constraint::Percentage((100 - h) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - w) / 2),
            Constraint::Percentage(w),
            Constraint::Percentage((100 - w) / 2),
        ])
        .split(v[1])[1]
}
