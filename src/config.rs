//! Configuration and data-directory layout

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::{
    cli::Args,
    error::{Error, Result, SettingsError},
    focus::{PomodoroSettings, SessionSnapshot},
};

pub const CONFIG_FILE: &str = "config.json";
pub const STATS_FILE: &str = "stats.json";
pub const SNAPSHOT_FILE: &str = "timer_state.json";
pub const EXPORT_FILE: &str = "stats_export.csv";
const LOGS_DIR: &str = "logs";
const APP_DIR: &str = "focusmode";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub focus_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    pub long_break_interval: u32,
    pub sound_enabled: bool,
    pub notifications_enabled: bool,
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        let settings = PomodoroSettings::default();
        Self {
            focus_minutes: settings.focus_minutes(),
            short_break_minutes: settings.short_break_minutes(),
            long_break_minutes: settings.long_break_minutes(),
            long_break_interval: settings.long_break_interval().get(),
            sound_enabled: true,
            notifications_enabled: true,
            theme: "default".into(),
        }
    }
}

impl Config {
    /// Validate the timer fields. This is the only place raw numbers from
    /// disk or the command line turn into settings the timer will accept.
    pub fn pomodoro_settings(&self) -> std::result::Result<PomodoroSettings, SettingsError> {
        PomodoroSettings::new(
            self.focus_minutes,
            self.short_break_minutes,
            self.long_break_minutes,
            self.long_break_interval,
        )
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(m) = args.focus {
            self.focus_minutes = m;
        }
        if let Some(m) = args.short_break {
            self.short_break_minutes = m;
        }
        if let Some(m) = args.long_break {
            self.long_break_minutes = m;
        }
        if let Some(n) = args.interval {
            self.long_break_interval = n;
        }
        if let Some(theme) = &args.theme {
            self.theme = theme.clone();
        }
        if args.no_sound {
            self.sound_enabled = false;
        }
        if args.no_notify {
            self.notifications_enabled = false;
        }
    }
}

/// Where every file of the app lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `--data-dir` if given, else the platform data directory, else `./focusmode`.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        let root = match explicit {
            Some(path) => path.to_path_buf(),
            None => dirs::data_dir()
                .map(|d| d.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR)),
        };
        Self { root }
    }

    pub fn ensure(&self) -> Result<()> {
        let logs = self.logs_dir();
        fs::create_dir_all(&logs).map_err(|e| Error::io(logs, e))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join(LOGS_DIR)
    }

    pub fn load_config(&self) -> Config {
        load_json_or_default(&self.file(CONFIG_FILE))
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        save_json(&self.file(CONFIG_FILE), config)
    }

    pub fn load_snapshot(&self) -> Option<SessionSnapshot> {
        load_json_or_default(&self.file(SNAPSHOT_FILE))
    }

    pub fn save_snapshot(&self, snapshot: &SessionSnapshot) -> Result<()> {
        save_json(&self.file(SNAPSHOT_FILE), snapshot)
    }
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io(path, e)),
    };
    if contents.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| Error::json(path, e))
}

/// Load a file, falling back to the default when it is missing or unreadable.
pub fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(err) => {
            warn!(error = %err, "using defaults");
            T::default()
        }
    }
}

pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let serialized = serde_json::to_string_pretty(data).map_err(|e| Error::json(path, e))?;
    fs::write(path, serialized).map_err(|e| Error::io(path, e))
}
