//! Diagnostics for the Galaxy3D BVH
//!
//! The BVH reports through a process-wide `Logger` owned by `Engine`:
//! build summaries at `Debug`, `clear` at `Trace`, ignored updates/removes at
//! `Warn` and rejected configurations at `Error` (with file:line).
//! `DefaultLogger` prints colored lines; warnings and errors go to stderr.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Sink for BVH diagnostics.
///
/// Install one with `Engine::set_logger` to route entries into an in-game
/// console, a file or a test buffer.
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_bvh::galaxy3d::log::{Logger, LogEntry, LogSeverity};
///
/// /// Keeps only contract misses reported by the BVH
/// struct MissCounter(std::sync::atomic::AtomicUsize);
///
/// impl Logger for MissCounter {
///     fn log(&self, entry: &LogEntry) {
///         if entry.severity == LogSeverity::Warn && entry.source == "galaxy3d::Bvh" {
///             self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
///         }
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, entry: &LogEntry);
}

/// One diagnostic record
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,

    /// Wall-clock time the entry was emitted
    pub timestamp: SystemTime,

    /// Emitting component: "galaxy3d::Bvh" or "galaxy3d::BvhConfig"
    pub source: String,

    pub message: String,

    /// Source file, set by `engine_error!` only
    pub file: Option<&'static str>,

    /// Source line, set by `engine_error!` only
    pub line: Option<u32>,
}

impl LogEntry {
    /// `(file, line)` when the entry carries a source location
    pub fn location(&self) -> Option<(&'static str, u32)> {
        self.file.zip(self.line)
    }
}

/// Severity, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-call chatter (`clear`)
    Trace,
    /// Build summaries and statistics
    Debug,
    Info,
    /// Ignored update/remove requests
    Warn,
    /// Rejected configuration
    Error,
}

impl LogSeverity {
    /// Fixed-width tag used in formatted lines
    pub fn label(self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }

    /// Inverse of `severity as u8`; out-of-range values saturate to `Error`
    pub(crate) fn from_level(level: u8) -> Self {
        match level {
            0 => LogSeverity::Trace,
            1 => LogSeverity::Debug,
            2 => LogSeverity::Info,
            3 => LogSeverity::Warn,
            _ => LogSeverity::Error,
        }
    }

    fn colored_label(self) -> ColoredString {
        let label = self.label();
        match self {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        }
    }
}

/// Console logger installed until `Engine::set_logger` replaces it.
///
/// Line format: `[timestamp] [SEVERITY] [source] message (file:line)`,
/// the location only when the entry has one.
pub struct DefaultLogger;

impl DefaultLogger {
    /// The line `DefaultLogger` prints, without colors
    pub fn format_plain(entry: &LogEntry) -> String {
        compose(entry, entry.severity.label(), &entry.source)
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let line = compose(
            entry,
            entry.severity.colored_label(),
            entry.source.bright_blue(),
        );
        if entry.severity >= LogSeverity::Warn {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

fn compose(entry: &LogEntry, severity: impl std::fmt::Display, source: impl std::fmt::Display) -> String {
    let datetime: DateTime<Local> = entry.timestamp.into();
    let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f");

    match entry.location() {
        Some((file, line)) => format!(
            "[{}] [{}] [{}] {} ({}:{})",
            timestamp, severity, source, entry.message, file, line
        ),
        None => format!("[{}] [{}] [{}] {}", timestamp, severity, source, entry.message),
    }
}

// ===== LOGGING MACROS =====

/// Forward a formatted message to `Engine::log` at the given severity
#[doc(hidden)]
#[macro_export]
macro_rules! engine_log {
    ($severity:ident, $source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Engine::log(
            $crate::galaxy3d::log::LogSeverity::$severity,
            $source,
            format!($($arg)*)
        )
    };
}

#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => { $crate::engine_log!(Trace, $source, $($arg)*) };
}

/// ```ignore
/// engine_debug!("galaxy3d::Bvh", "Built {} nodes", node_count);
/// ```
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => { $crate::engine_log!(Debug, $source, $($arg)*) };
}

#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => { $crate::engine_log!(Info, $source, $($arg)*) };
}

/// ```ignore
/// engine_warn!("galaxy3d::Bvh", "Remove ignored: instance {} not found", id);
/// ```
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => { $crate::engine_log!(Warn, $source, $($arg)*) };
}

/// Error entry carrying the caller's file:line
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Engine::log_detailed(
            $crate::galaxy3d::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
