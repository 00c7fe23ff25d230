//! File logging
//!
//! The terminal belongs to the UI, so tracing output goes to a timestamped
//! file under the data directory's `logs/` folder.

use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use chrono::Local;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Error, Result};

const DEFAULT_FILTER: &str = "focusmode=info";
const KEEP_LOG_FILES: usize = 10;

/// Keeps the log file open for as long as logging is needed.
pub struct LoggingGuard {
    pub path: PathBuf,
    _file: Arc<Mutex<File>>,
}

pub fn log_file_path(logs_dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    logs_dir.join(format!("focusmode-{timestamp}.log"))
}

pub fn init_file_logging(logs_dir: &Path) -> Result<LoggingGuard> {
    fs::create_dir_all(logs_dir).map_err(|e| Error::io(logs_dir, e))?;

    let path = log_file_path(logs_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| Error::io(&path, e))?;
    let file = Arc::new(Mutex::new(file));

    let writer = Arc::clone(&file);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(move || FileWriter(Arc::clone(&writer)))
        .with_ansi(false)
        .with_target(true);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init();

    Ok(LoggingGuard { path, _file: file })
}

/// Delete all but the newest `KEEP_LOG_FILES` logs. Returns how many went.
pub fn cleanup_old_logs(logs_dir: &Path) -> Result<usize> {
    let mut logs: Vec<PathBuf> = fs::read_dir(logs_dir)
        .map_err(|e| Error::io(logs_dir, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("focusmode-") && n.ends_with(".log"))
        })
        .collect();

    if logs.len() <= KEEP_LOG_FILES {
        return Ok(0);
    }

    // Timestamped names sort chronologically.
    logs.sort();
    let excess = logs.len() - KEEP_LOG_FILES;
    let mut removed = 0;
    for path in logs.into_iter().take(excess) {
        if fs::remove_file(&path).is_ok() {
            removed += 1;
        }
    }
    Ok(removed)
}

struct FileWriter(Arc<Mutex<File>>);

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.0.lock() {
            Ok(mut file) => file.write(buf),
            Err(_) => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0.lock() {
            Ok(mut file) => file.flush(),
            Err(_) => Ok(()),
        }
    }
}
