//! Notification sink for user-facing messages
//!
//! Core components never print. They report through a [`Notifier`] that is
//! handed to them at construction, and the binary decides how to render.

use std::sync::{Mutex, PoisonError};

use crate::error_stack::{ErrorEntry, ErrorStack, Severity};

/// Level of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl From<Severity> for Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => Level::Warn,
            Severity::Error => Level::Error,
        }
    }
}

/// Sink for user-facing messages.
///
/// Implementations must record every warning and error in an
/// [`ErrorStack`] in addition to displaying it.
pub trait Notifier: Send + Sync {
    /// Display an informational message.
    fn log(&self, message: &str);

    /// Display and record a warning or error.
    fn record(&self, entry: ErrorEntry);

    fn warn(&self, message: &str) {
        self.record(ErrorEntry::new(Severity::Warning, message));
    }

    fn error(&self, message: &str) {
        self.record(ErrorEntry::new(Severity::Error, message));
    }
}

/// Notifier that keeps every message in memory.
///
/// Used for embedding the core without a terminal, and in tests.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<(Level, String)>>,
    stack: ErrorStack,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stack warnings and errors are recorded in.
    pub fn stack(&self) -> &ErrorStack {
        &self.stack
    }

    /// All messages at `level`, rendered, in the order they were reported.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Level::Warn)
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(Level::Error)
    }

    fn push(&self, level: Level, message: String) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message));
    }
}

impl Notifier for MemoryNotifier {
    fn log(&self, message: &str) {
        self.push(Level::Info, message.to_string());
    }

    fn record(&self, entry: ErrorEntry) {
        self.push(entry.severity.into(), entry.render());
        self.stack.push(entry);
    }
}
