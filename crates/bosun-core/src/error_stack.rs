//! Run-scoped accumulator of warnings and errors
//!
//! Long commands produce a lot of output. Everything reported at warning or
//! error level is kept here so it can be replayed once at the end of the run.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Severity of a recorded entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A recorded message with optional named arguments.
///
/// `{name}` placeholders in the message are filled from `args` when the
/// entry is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub severity: Severity,
    pub message: String,
    pub args: BTreeMap<String, String>,
}

impl ErrorEntry {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            args: BTreeMap::new(),
        }
    }

    /// Attach a named argument.
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }

    /// The message with placeholders substituted.
    pub fn render(&self) -> String {
        self.args
            .iter()
            .fold(self.message.clone(), |acc, (name, value)| {
                acc.replace(&format!("{{{name}}}"), value)
            })
    }
}

/// Append-only list of entries, shared by handle.
///
/// Cloning yields another handle to the same list, so the background
/// version check can record into the stack owned by the run.
#[derive(Debug, Clone, Default)]
pub struct ErrorStack {
    entries: Arc<Mutex<Vec<ErrorEntry>>>,
}

impl ErrorStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: ErrorEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take every entry in insertion order. A second drain only returns
    /// what was pushed after the first.
    pub fn drain(&self) -> Vec<ErrorEntry> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
}
