//! File logger for the `log` facade
//!
//! Writes every record to a log file and echoes it to the console.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Level, Metadata};

/// Logger writing records to a file
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level written
    level: Level,
}

impl Logger {
    /// Creates a new logger writing to `log_file`
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file, truncated if it exists
    /// * `level` - Most verbose level to record
    pub fn new(log_file: &str, level: Level) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level,
        })
    }

    /// Logs a message to the log file
    pub fn write_line(&self, message: &str) -> io::Result<()> {
        let mut guard = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Install a file logger as the global `log` backend
    pub fn init_global_logger(log_file: &str, level: Level) -> io::Result<()> {
        let global_logger = Logger::new(log_file, level)?;

        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(level.to_level_filter());
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = self.write_line(&message);

            // Also print to console
            println!("{}", message);
        }
    }

    fn flush(&self) {
        // Already flushing in write_line
    }
}
