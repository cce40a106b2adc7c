//! Centralized game logger
//!
//! Messages are filtered by verbosity and either printed, captured in an
//! in-memory buffer, or both. Tests capture to memory and inspect the lines.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;

/// Verbosity level for game output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only match outcome
    Minimal = 1,
    /// Normal - turns, phases, and executed moves (default)
    #[default]
    Normal = 2,
    /// Verbose - rejected moves and ledger details as well
    Verbose = 3,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log line
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
}

/// Read-only view of the captured entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> LogGuard<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Game logger owned by the game state
///
/// Logging takes `&self` so it can be called while other parts of the state
/// are borrowed; the capture buffer sits behind a `RefCell`.
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Capture to memory only
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Access captured entries without copying them
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    #[inline]
    fn log_to_stdout(level: VerbosityLevel, message: &str) {
        if level == VerbosityLevel::Minimal {
            println!("{message}");
        } else {
            println!("  {message}");
        }
    }

    fn log(&self, level: VerbosityLevel, message: &str) {
        let should_capture = self.is_capturing();
        let should_output = matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both);

        if level > self.verbosity && !should_capture {
            return;
        }

        if should_capture {
            self.log_buffer.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
            });
        }

        if should_output && level <= self.verbosity {
            Self::log_to_stdout(level, message);
        }
    }

    #[inline]
    pub fn minimal(&self, message: &str) {
        self.log(VerbosityLevel::Minimal, message);
    }

    #[inline]
    pub fn normal(&self, message: &str) {
        self.log(VerbosityLevel::Normal, message);
    }

    #[inline]
    pub fn verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, message);
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}

// Clones and deserialized copies start with an empty buffer.
impl Clone for GameLogger {
    fn clone(&self) -> Self {
        GameLogger {
            verbosity: self.verbosity,
            output_mode: self.output_mode,
            log_buffer: RefCell::new(Vec::new()),
        }
    }
}

impl Serialize for GameLogger {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("GameLogger", 2)?;
        state.serialize_field("verbosity", &self.verbosity)?;
        state.serialize_field("output_mode", &self.output_mode)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for GameLogger {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct GameLoggerData {
            verbosity: VerbosityLevel,
            output_mode: OutputMode,
        }

        let data = GameLoggerData::deserialize(deserializer)?;
        let mut logger = GameLogger::with_verbosity(data.verbosity);
        logger.set_output_mode(data.output_mode);
        Ok(logger)
    }
}

// Loggers never affect game equality.
impl PartialEq for GameLogger {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for GameLogger {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = GameLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert!(!logger.is_capturing());
    }

    #[test]
    fn test_log_capture() {
        let mut logger = GameLogger::new();
        logger.enable_capture();

        logger.normal("test message");
        logger.minimal("minimal message");

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "test message");
        assert_eq!(logs[1].level, VerbosityLevel::Minimal);
    }

    #[test]
    fn test_capture_keeps_lines_above_verbosity() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Minimal);
        logger.enable_capture();

        logger.verbose("detail");
        assert_eq!(logger.logs().len(), 1);
        assert_eq!(logger.logs()[0].level, VerbosityLevel::Verbose);
    }

    #[test]
    fn test_clone_starts_empty() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Verbose);
        logger.enable_capture();
        logger.normal("kept");

        let copy = logger.clone();
        assert_eq!(copy.verbosity(), VerbosityLevel::Verbose);
        assert!(copy.is_capturing());
        assert!(copy.logs().is_empty());
    }
}
