/// Galaxy3D Engine - global services shared by every BVH instance
///
/// The BVH itself holds no global state. The only process-wide service is the
/// logger: a thread-safe, replaceable `Logger` behind a RwLock, plus a
/// severity threshold below which entries are dropped before reaching it.

use std::sync::{OnceLock, RwLock};
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::SystemTime;
use crate::error::Error;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Minimum severity forwarded to the logger (stored as `LogSeverity as u8`)
static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogSeverity::Info as u8);

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

// ===== PUBLIC API =====

/// Entry point for crate-wide services (logging).
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_bvh::galaxy3d::Engine;
/// use galaxy_3d_bvh::galaxy3d::log::LogSeverity;
///
/// // Show BVH build statistics on the console
/// Engine::set_log_level(LogSeverity::Debug);
/// ```
pub struct Engine;

impl Engine {
    /// Log an error before handing it back to the caller (internal use)
    ///
    /// Keeps every setup failure visible in the log with its source and location.
    pub(crate) fn log_and_return_error(source: &str, error: Error) -> Error {
        crate::engine_error!(source, "{}", error);
        error
    }

    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation (file logger, in-game console, etc.)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use galaxy_3d_bvh::galaxy3d::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct FileLogger;
    /// impl Logger for FileLogger {
    ///     fn log(&self, entry: &LogEntry) {
    ///         // Write to file...
    ///     }
    /// }
    ///
    /// Engine::set_logger(FileLogger);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Set the minimum severity forwarded to the logger (default: Info)
    pub fn set_log_level(severity: LogSeverity) {
        LOG_LEVEL.store(severity as u8, Ordering::Relaxed);
    }

    /// Current minimum severity
    pub fn log_level() -> LogSeverity {
        LogSeverity::from_level(LOG_LEVEL.load(Ordering::Relaxed))
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    ///
    /// # Arguments
    ///
    /// * `severity` - Log severity level
    /// * `source` - Source module (e.g., "galaxy3d::Bvh")
    /// * `message` - Log message
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if severity < Self::log_level() {
            return;
        }
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error! macro to include source location.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if severity < Self::log_level() {
            return;
        }
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
