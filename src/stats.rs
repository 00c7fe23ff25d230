//! Persistent study statistics
//!
//! [`StatsTracker`] is the session reporter used by the terminal app. It keeps
//! running totals in memory and writes them to `stats.json`.

use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::{load_json_or_default, save_json},
    error::{Error, ReportError, Result},
    focus::SessionReporter,
};

pub const MAX_SESSIONS: usize = 100;
pub const AUTO_SAVE_INTERVAL: Duration = Duration::from_secs(5);
const DAILY_FMT: &str = "%Y-%m-%d";

/// One focus-mode activation as seen by the statistics store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub focus_secs: u64,
    pub pomodoros: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub total_sessions: u32,
    pub total_pomodoros: u32,
    pub total_focus_secs: u64,
    pub pomodoros_today: u32,
    pub last_active_date: String,
    /// Pomodoros per weekday, Monday first.
    pub weekly_pomodoros: [u32; 7],
    pub sessions: Vec<SessionRecord>,
    pub current: Option<SessionRecord>,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            total_sessions: 0,
            total_pomodoros: 0,
            total_focus_secs: 0,
            pomodoros_today: 0,
            last_active_date: Local::now().format(DAILY_FMT).to_string(),
            weekly_pomodoros: [0; 7],
            sessions: Vec::new(),
            current: None,
        }
    }
}

impl Statistics {
    /// Reset the daily counter when `today` differs from the last active day.
    /// A new ISO week clears the weekly bars. Returns whether anything changed.
    pub fn roll_day(&mut self, today: NaiveDate) -> bool {
        let today_str = today.format(DAILY_FMT).to_string();
        if self.last_active_date == today_str {
            return false;
        }
        let new_week = NaiveDate::parse_from_str(&self.last_active_date, DAILY_FMT)
            .map(|last| last.iso_week() != today.iso_week())
            .unwrap_or(true);
        if new_week {
            self.weekly_pomodoros = [0; 7];
        }
        self.pomodoros_today = 0;
        self.last_active_date = today_str;
        true
    }

    fn begin_session(&mut self, now: DateTime<Utc>) {
        if let Some(open) = self.current.take() {
            self.close(open, now);
        }
        self.total_sessions += 1;
        self.current = Some(SessionRecord {
            started_at: now,
            ended_at: None,
            focus_secs: 0,
            pomodoros: 0,
        });
    }

    fn add_focus_second(&mut self) {
        self.total_focus_secs += 1;
        if let Some(current) = self.current.as_mut() {
            current.focus_secs += 1;
        }
    }

    fn add_pomodoro(&mut self, today: NaiveDate) {
        self.roll_day(today);
        self.total_pomodoros += 1;
        self.pomodoros_today += 1;
        self.weekly_pomodoros[today.weekday().num_days_from_monday() as usize] += 1;
        if let Some(current) = self.current.as_mut() {
            current.pomodoros += 1;
        }
    }

    fn end_session(&mut self, now: DateTime<Utc>) {
        if let Some(open) = self.current.take() {
            self.close(open, now);
        }
    }

    fn close(&mut self, mut record: SessionRecord, now: DateTime<Utc>) {
        record.ended_at = Some(now);
        self.sessions.push(record);
        if self.sessions.len() > MAX_SESSIONS {
            let excess = self.sessions.len() - MAX_SESSIONS;
            self.sessions.drain(..excess);
        }
    }

    pub fn total_focus_hours(&self) -> f64 {
        self.total_focus_secs as f64 / 3600.0
    }

    /// Summary plus the most recent sessions as CSV.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(
            "Date,Total Sessions,Total Pomodoros,Pomodoros Today,Focus Time (h)\n",
        );
        let _ = writeln!(
            csv,
            "{},{},{},{},{:.2}\n",
            self.last_active_date,
            self.total_sessions,
            self.total_pomodoros,
            self.pomodoros_today,
            self.total_focus_hours()
        );

        csv.push_str("Sessions\nStarted,Ended,Focus (min),Pomodoros\n");
        for s in self.sessions.iter().rev() {
            let ended = s.ended_at.map(|t| t.to_rfc3339()).unwrap_or_default();
            let _ = writeln!(
                csv,
                "{},{},{},{}",
                s.started_at.to_rfc3339(),
                ended,
                s.focus_secs / 60,
                s.pomodoros
            );
        }
        csv
    }
}

/// Session reporter backed by a JSON statistics file.
#[derive(Debug)]
pub struct StatsTracker {
    path: PathBuf,
    stats: Statistics,
    dirty: bool,
    last_save: Instant,
}

impl StatsTracker {
    pub fn new(path: impl Into<PathBuf>, stats: Statistics) -> Self {
        Self {
            path: path.into(),
            stats,
            dirty: false,
            last_save: Instant::now(),
        }
    }

    /// Load from `path`, rolling the day counters forward. A session left
    /// open by a crash is closed at its start time.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut stats: Statistics = load_json_or_default(&path);
        stats.roll_day(Local::now().date_naive());
        if let Some(open) = stats.current.take() {
            let started = open.started_at;
            stats.close(open, started);
        }
        Self::new(path, stats)
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move the daily counters to `today`, marking the store dirty on change.
    pub fn roll_day(&mut self, today: NaiveDate) {
        if self.stats.roll_day(today) {
            debug!(date = %today, "statistics rolled to a new day");
            self.dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn save(&mut self) -> Result<()> {
        save_json(&self.path, &self.stats)?;
        self.dirty = false;
        self.last_save = Instant::now();
        debug!(path = %self.path.display(), "statistics saved");
        Ok(())
    }

    /// Save if there are unsaved changes and the last save is older than `every`.
    pub fn flush_if_due(&mut self, every: Duration) -> Result<bool> {
        if !self.dirty || self.last_save.elapsed() < every {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn export_csv(&self, path: &Path) -> Result<()> {
        fs::write(path, self.stats.to_csv()).map_err(|e| Error::io(path, e))
    }

    fn persist_now(&mut self) -> std::result::Result<(), ReportError> {
        self.save().map_err(|source| ReportError::Persist {
            path: self.path.clone(),
            source: Box::new(source),
        })
    }
}

impl SessionReporter for StatsTracker {
    fn report_session_start(&mut self) -> std::result::Result<(), ReportError> {
        self.stats.begin_session(Utc::now());
        self.dirty = true;
        Ok(())
    }

    fn report_focus_second(&mut self) -> std::result::Result<(), ReportError> {
        self.stats.add_focus_second();
        self.dirty = true;
        Ok(())
    }

    fn report_pomodoro_completed(&mut self) -> std::result::Result<(), ReportError> {
        self.stats.add_pomodoro(Local::now().date_naive());
        self.dirty = true;
        Ok(())
    }

    fn report_session_end(&mut self) -> std::result::Result<(), ReportError> {
        self.stats.end_session(Utc::now());
        self.dirty = true;
        self.persist_now()
    }
}
