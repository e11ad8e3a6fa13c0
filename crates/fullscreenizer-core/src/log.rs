//! File logging for the daemon.
//!
//! Disabled by default. When enabled, log lines go to
//! `~/.config/fullscreenizer/logs/fullscreenizer.log`; once the file
//! passes the configured size it is rotated to `fullscreenizer.log.1`
//! (one backup kept). Volume is low (poll deltas and hotkey outcomes),
//! so the file is opened per write rather than held open.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

use crate::bridge::WindowHandle;
use crate::transform::{Outcome, Skip};

static SINK: OnceLock<Mutex<Sink>> = OnceLock::new();

const LOG_FILE_NAME: &str = "fullscreenizer.log";

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    /// Minimum log level: "debug", "info", "warn", or "error".
    pub level: String,
    /// Maximum log file size in megabytes before rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "warn" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

struct Sink {
    path: PathBuf,
    min_level: Level,
    max_bytes: u64,
}

/// Initialises the global log sink. Call once at daemon startup.
///
/// Does nothing if `config.enabled` is `false`.
pub fn init(config: &LogConfig) {
    if !config.enabled {
        return;
    }
    let Some(dir) = crate::config::config_dir() else {
        return;
    };
    let log_dir = dir.join("logs");
    if fs::create_dir_all(&log_dir).is_err() {
        return;
    }

    let sink = Sink {
        path: log_dir.join(LOG_FILE_NAME),
        min_level: Level::parse(&config.level),
        max_bytes: config.max_file_mb * 1024 * 1024,
    };
    let _ = SINK.set(Mutex::new(sink));
}

/// Writes a log line if the level is at or above the configured minimum.
pub fn write(level: Level, args: fmt::Arguments<'_>) {
    let Some(mutex) = SINK.get() else {
        return;
    };
    let Ok(sink) = mutex.lock() else {
        return;
    };
    if level < sink.min_level {
        return;
    }
    sink.append(level, args);
}

/// Logs a transform outcome for a window at its appropriate level.
pub fn outcome(handle: WindowHandle, outcome: &Outcome) {
    match outcome {
        Outcome::Applied(transition) => write(
            Level::Info,
            format_args!("0x{:X}: {transition:?}", handle.0),
        ),
        Outcome::Skipped(skip) => write(
            skip_level(*skip),
            format_args!("0x{:X}: skipped ({skip})", handle.0),
        ),
    }
}

/// The level a skip reason is logged at.
///
/// Rate-limit and untracked chatter happens on every hotkey press
/// against the wrong window and stays at debug; the remaining skips
/// point at a window in an unexpected state and warrant a warning.
pub fn skip_level(skip: Skip) -> Level {
    match skip {
        Skip::RateLimited | Skip::Untracked => Level::Debug,
        Skip::NativeFullscreen | Skip::InvalidSnapshot | Skip::QueryFailed => Level::Warn,
    }
}

impl Sink {
    fn append(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.over_limit() {
            let _ = fs::rename(&self.path, self.path.with_extension("log.1"));
        }
        let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&self.path) else {
            return;
        };
        let _ = writeln!(file, "{} [{}] {args}", timestamp(), level.as_str());
    }

    fn over_limit(&self) -> bool {
        self.max_bytes > 0
            && fs::metadata(&self.path)
                .map(|m| m.len() >= self.max_bytes)
                .unwrap_or(false)
    }
}

fn timestamp() -> String {
    // Plain UTC wall-clock time from std; no chrono dependency.
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = dur.as_secs();
    let (h, m, s) = (secs / 3600 % 24, secs / 60 % 60, secs % 60);
    format!("{h:02}:{m:02}:{s:02}")
}

/// Logs at DEBUG level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Debug, format_args!($($arg)*)) };
}

/// Logs at INFO level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Info, format_args!($($arg)*)) };
}

/// Logs at WARN level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Warn, format_args!($($arg)*)) };
}

/// Logs at ERROR level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Error, format_args!($($arg)*)) };
}
