use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::{
    config::{Config, DataDir, EXPORT_FILE},
    focus::{FocusSession, IntervalCadence, Phase, PomodoroSettings, SessionSnapshot, Transition},
    stats::{AUTO_SAVE_INTERVAL, StatsTracker},
};

use super::{notify, theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Timer,
    History,
    Stats,
    Settings,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    FocusDuration,
    ShortBreakDuration,
    LongBreakDuration,
    LongBreakInterval,
    Theme,
    Sound,
    Notifications,
}

impl SettingsField {
    pub const ALL: [SettingsField; 7] = [
        SettingsField::FocusDuration,
        SettingsField::ShortBreakDuration,
        SettingsField::LongBreakDuration,
        SettingsField::LongBreakInterval,
        SettingsField::Theme,
        SettingsField::Sound,
        SettingsField::Notifications,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|&f| f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn is_numeric(self) -> bool {
        matches!(
            self,
            SettingsField::FocusDuration
                | SettingsField::ShortBreakDuration
                | SettingsField::LongBreakDuration
                | SettingsField::LongBreakInterval
        )
    }
}

/// State of the focus-mode view. Its lifetime is the focus session's.
pub struct App {
    pub session: FocusSession<StatsTracker>,
    pub config: Config,
    pub theme: theme::Theme,
    pub view: View,
    pub settings_field: SettingsField,
    pub settings_editing: bool,
    pub settings_input: String,
    pub status: Option<String>,
    pub animation_frame: u8,
    cadence: IntervalCadence,
    data: DataDir,
}

impl App {
    pub fn new(
        config: Config,
        settings: PomodoroSettings,
        data: DataDir,
        tracker: StatsTracker,
        snapshot: Option<SessionSnapshot>,
    ) -> Self {
        let session = match snapshot {
            Some(snapshot) => FocusSession::resume(settings, tracker, &snapshot),
            None => FocusSession::new(settings, tracker),
        };
        Self {
            session,
            theme: theme::Theme::named(&config.theme),
            config,
            view: View::Timer,
            settings_field: SettingsField::FocusDuration,
            settings_editing: false,
            settings_input: String::new(),
            status: None,
            animation_frame: 0,
            cadence: IntervalCadence::default(),
            data,
        }
    }

    /// Deliver due ticks, announce transitions and autosave statistics.
    pub fn update(&mut self) -> Vec<Transition> {
        let transitions = self.session.pump(&mut self.cadence);
        for transition in &transitions {
            notify::phase_changed(
                transition,
                self.config.notifications_enabled,
                self.config.sound_enabled,
            );
        }

        let tracker = self.session.reporter_mut();
        tracker.roll_day(Local::now().date_naive());
        if let Err(err) = tracker.flush_if_due(AUTO_SAVE_INTERVAL) {
            warn!(error = %err, "autosave failed");
        }

        self.animation_frame = self.animation_frame.wrapping_add(1) % 20;
        transitions
    }

    /// Time until the next tick is owed, if the timer is running.
    pub fn until_next_tick(&self) -> Option<std::time::Duration> {
        self.cadence.until_next(std::time::Instant::now())
    }

    /// Returns `true` when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.settings_editing {
            match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => self.settings_input.push(c),
                KeyCode::Backspace => {
                    self.settings_input.pop();
                }
                KeyCode::Enter => self.apply_setting(),
                KeyCode::Esc => {
                    self.settings_editing = false;
                    self.settings_input.clear();
                }
                _ => {}
            }
            return false;
        }

        match self.view {
            View::Settings => self.handle_settings_key(key),
            View::Timer => self.handle_timer_key(key),
            View::History | View::Stats | View::Help => self.handle_overlay_key(key),
        }
    }

    fn handle_timer_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char(' ') => {
                self.session.toggle();
            }
            KeyCode::Char('r') => self.session.reset(),
            KeyCode::Char('1') => self.session.select_phase(Phase::Focus),
            KeyCode::Char('2') => self.session.select_phase(Phase::ShortBreak),
            KeyCode::Char('3') => self.session.select_phase(Phase::LongBreak),
            KeyCode::Char('h') => self.view = View::History,
            KeyCode::Char('s') => self.view = View::Stats,
            KeyCode::Char('d') => self.view = View::Settings,
            KeyCode::Char('?') => self.view = View::Help,
            _ => {}
        }
        false
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.view = View::Timer,
            KeyCode::Char(' ') => {
                self.session.toggle();
            }
            KeyCode::Char('h') if self.view == View::History => self.view = View::Timer,
            KeyCode::Char('s') if self.view == View::Stats => self.view = View::Timer,
            KeyCode::Char('?') if self.view == View::Help => self.view = View::Timer,
            KeyCode::Char('h') => self.view = View::History,
            KeyCode::Char('s') => self.view = View::Stats,
            KeyCode::Char('e') if self.view == View::Stats => self.export_csv(),
            _ => {}
        }
        false
    }

    fn handle_settings_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('d') => {
                self.view = View::Timer;
                self.status = None;
            }
            KeyCode::Down | KeyCode::Char('j') => self.settings_field = self.settings_field.next(),
            KeyCode::Up | KeyCode::Char('k') => self.settings_field = self.settings_field.prev(),
            KeyCode::Enter | KeyCode::Char('e') => self.start_editing(),
            KeyCode::Char(' ') => match self.settings_field {
                SettingsField::Sound => {
                    self.config.sound_enabled = !self.config.sound_enabled;
                    self.save_config();
                }
                SettingsField::Notifications => {
                    self.config.notifications_enabled = !self.config.notifications_enabled;
                    self.save_config();
                }
                _ => {}
            },
            KeyCode::Left | KeyCode::Char('h') if self.settings_field == SettingsField::Theme => {
                self.set_theme(theme::cycle(&self.config.theme, false));
            }
            KeyCode::Right | KeyCode::Char('l') if self.settings_field == SettingsField::Theme => {
                self.set_theme(theme::cycle(&self.config.theme, true));
            }
            _ => {}
        }
        false
    }

    pub fn setting_value(&self, field: SettingsField) -> String {
        match field {
            SettingsField::FocusDuration => format!("{} min", self.config.focus_minutes),
            SettingsField::ShortBreakDuration => format!("{} min", self.config.short_break_minutes),
            SettingsField::LongBreakDuration => format!("{} min", self.config.long_break_minutes),
            SettingsField::LongBreakInterval => {
                format!("every {} pomodoros", self.config.long_break_interval)
            }
            SettingsField::Theme => format!("< {} >", self.config.theme),
            SettingsField::Sound => on_off(self.config.sound_enabled).into(),
            SettingsField::Notifications => on_off(self.config.notifications_enabled).into(),
        }
    }

    fn start_editing(&mut self) {
        let current = match self.settings_field {
            SettingsField::FocusDuration => self.config.focus_minutes,
            SettingsField::ShortBreakDuration => self.config.short_break_minutes,
            SettingsField::LongBreakDuration => self.config.long_break_minutes,
            SettingsField::LongBreakInterval => self.config.long_break_interval,
            _ => return,
        };
        self.settings_input = current.to_string();
        self.settings_editing = true;
        self.status = None;
    }

    fn apply_setting(&mut self) {
        let input = std::mem::take(&mut self.settings_input);
        self.settings_editing = false;
        if !self.settings_field.is_numeric() {
            return;
        }

        let Ok(value) = input.parse::<u32>() else {
            self.status = Some(format!("Not a number: {input:?}"));
            return;
        };

        let mut candidate = self.config.clone();
        match self.settings_field {
            SettingsField::FocusDuration => candidate.focus_minutes = value,
            SettingsField::ShortBreakDuration => candidate.short_break_minutes = value,
            SettingsField::LongBreakDuration => candidate.long_break_minutes = value,
            SettingsField::LongBreakInterval => candidate.long_break_interval = value,
            _ => {}
        }

        match candidate.pomodoro_settings() {
            Ok(settings) => {
                self.config = candidate;
                self.session.set_settings(settings);
                self.save_config();
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    fn set_theme(&mut self, name: &str) {
        self.config.theme = name.to_string();
        self.theme = theme::Theme::named(name);
        self.save_config();
    }

    fn save_config(&mut self) {
        match self.data.save_config(&self.config) {
            Ok(()) => self.status = Some("Saved".into()),
            Err(err) => {
                warn!(error = %err, "failed to save config");
                self.status = Some(format!("Save failed: {err}"));
            }
        }
    }

    fn export_csv(&mut self) {
        let path = self.data.file(EXPORT_FILE);
        match self.session.reporter().export_csv(&path) {
            Ok(()) => {
                info!(path = %path.display(), "statistics exported");
                self.status = Some(format!("Exported to {}", path.display()));
            }
            Err(err) => self.status = Some(format!("Export failed: {err}")),
        }
    }

    /// End the focus session, persist statistics and the timer position.
    pub fn shutdown(&mut self) {
        self.session.end();
        if let Err(err) = self.session.reporter_mut().save() {
            warn!(error = %err, "failed to save statistics on quit");
        }
        if let Err(err) = self.data.save_snapshot(&self.session.snapshot()) {
            warn!(error = %err, "failed to save timer state");
        }
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "ON" } else { "OFF" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Statistics;
    use crossterm::event::KeyEventKind;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(dir: &TempDir) -> App {
        let data = DataDir::new(dir.path());
        let tracker = StatsTracker::new(data.file("stats.json"), Statistics::default());
        let config = Config::default();
        let settings = config.pomodoro_settings().unwrap();
        App::new(config, settings, data, tracker, None)
    }

    #[test]
    fn test_space_toggles_timer() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        assert!(!app.handle_key(key(KeyCode::Char(' '))));
        assert!(app.session.is_running());
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(!app.session.is_running());
    }

    #[test]
    fn test_phase_keys_select_and_stop() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(app.session.phase(), Phase::LongBreak);
        assert!(!app.session.is_running());
    }

    #[test]
    fn test_quit_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        assert!(app.handle_key(key(KeyCode::Char('q'))));
        let ctrl_c = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        };
        assert!(app.handle_key(ctrl_c));
    }

    #[test]
    fn test_settings_edit_rejects_zero_interval() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(app.view, View::Settings);
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Down));
        }
        assert_eq!(app.settings_field, SettingsField::LongBreakInterval);

        app.handle_key(key(KeyCode::Enter));
        assert!(app.settings_editing);
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Char('0')));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.config.long_break_interval, 4);
        assert_eq!(app.session.settings().long_break_interval().get(), 4);
        assert!(app.status.as_deref().unwrap().contains("interval"));
    }

    #[test]
    fn test_settings_edit_updates_idle_timer_and_saves() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Char('5')));
        app.handle_key(key(KeyCode::Char('0')));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.config.focus_minutes, 50);
        assert_eq!(app.session.timer().remaining_secs(), 3000);
        assert_eq!(DataDir::new(dir.path()).load_config().focus_minutes, 50);
    }

    #[test]
    fn test_theme_cycles_in_settings() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.view = View::Settings;
        app.settings_field = SettingsField::Theme;
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.config.theme, "nord");
        assert_eq!(app.theme, theme::Theme::named("nord"));
    }

    #[test]
    fn test_shutdown_records_session_and_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.handle_key(key(KeyCode::Char(' ')));
        for _ in 0..30 {
            app.session.tick();
        }
        app.shutdown();

        let stats = app.session.reporter().stats();
        assert_eq!(stats.total_sessions, 1);
        assert_eq!(stats.total_focus_secs, 30);
        assert!(stats.current.is_none());

        let data = DataDir::new(dir.path());
        let snapshot = data.load_snapshot().unwrap();
        assert_eq!(snapshot.remaining_secs, 1500 - 30);
        assert!(dir.path().join("stats.json").exists());
    }

    #[test]
    fn test_update_rolls_stale_daily_count() {
        let dir = TempDir::new().unwrap();
        let data = DataDir::new(dir.path());
        let stats = Statistics {
            pomodoros_today: 6,
            last_active_date: "2000-01-01".into(),
            ..Statistics::default()
        };
        let tracker = StatsTracker::new(data.file("stats.json"), stats);
        let config = Config::default();
        let settings = config.pomodoro_settings().unwrap();
        let mut app = App::new(config, settings, data, tracker, None);

        app.update();
        let stats = app.session.reporter().stats();
        assert_eq!(stats.pomodoros_today, 0);
        assert_eq!(
            stats.last_active_date,
            Local::now().date_naive().format("%Y-%m-%d").to_string()
        );
    }

    #[test]
    fn test_export_from_stats_view() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.view, View::Stats);
        app.handle_key(key(KeyCode::Char('e')));
        assert!(dir.path().join(EXPORT_FILE).exists());
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.view, View::Timer);
    }
}
