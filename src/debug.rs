//! Logging bridge for diagram-export.
//!
//! Routes every `log::*!` call to `diagram_export_debug.log` in the system
//! temp directory. When `RUST_LOG` is set the same lines are mirrored to
//! stderr, which keeps stdout reserved for progress output.
//!
//! Level precedence: `--log-level`, then `RUST_LOG`, then `info`.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

/// Log level selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DebugLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl DebugLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            DebugLevel::Off => LevelFilter::Off,
            DebugLevel::Error => LevelFilter::Error,
            DebugLevel::Warn => LevelFilter::Warn,
            DebugLevel::Info => LevelFilter::Info,
            DebugLevel::Debug => LevelFilter::Debug,
            DebugLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Resolve the effective level from the CLI flag and the `RUST_LOG` value.
///
/// Only a bare level (`debug`, `warn`, ...) is understood in `RUST_LOG`;
/// anything else falls back to `info`.
pub fn resolve_level(cli_level: Option<DebugLevel>, rust_log: Option<&str>) -> LevelFilter {
    if let Some(level) = cli_level {
        return level.to_level_filter();
    }
    rust_log
        .and_then(|value| value.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("diagram_export_debug.log")
}

struct DebugLogger {
    level: LevelFilter,
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl DebugLogger {
    fn new(level: LevelFilter, mirror_stderr: bool) -> Self {
        let file = if level == LevelFilter::Off {
            None
        } else {
            // Silently continue without a file if it cannot be opened.
            OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(log_path())
                .ok()
        };

        let logger = DebugLogger {
            level,
            file: Mutex::new(file),
            mirror_stderr,
        };
        logger.write_line(&format!(
            "{}\ndiagram-export session started at {} (level={})\n{}",
            "=".repeat(80),
            get_timestamp(),
            level,
            "=".repeat(80)
        ));
        logger
    }

    fn write_line(&self, line: &str) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = writeln!(file, "{line}");
        }
    }
}

impl Log for DebugLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        self.write_line(&line);
        if self.mirror_stderr {
            eprintln!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Install the logger. Safe to call more than once; later calls are ignored.
pub fn init_log_bridge(cli_level: Option<DebugLevel>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = resolve_level(cli_level, rust_log.as_deref());
    let logger = DebugLogger::new(level, rust_log.is_some());

    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
}

// Convenience macros for category-tagged logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        ::log::error!(target: $category, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        ::log::info!(target: $category, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        ::log::debug!(target: $category, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_level_wins() {
        assert_eq!(
            resolve_level(Some(DebugLevel::Trace), Some("error")),
            LevelFilter::Trace
        );
    }

    #[test]
    fn test_rust_log_bare_level() {
        assert_eq!(resolve_level(None, Some("debug")), LevelFilter::Debug);
        assert_eq!(resolve_level(None, Some(" WARN ")), LevelFilter::Warn);
    }

    #[test]
    fn test_unparseable_rust_log_falls_back_to_info() {
        assert_eq!(
            resolve_level(None, Some("diagram_export=debug")),
            LevelFilter::Info
        );
        assert_eq!(resolve_level(None, None), LevelFilter::Info);
    }
}
