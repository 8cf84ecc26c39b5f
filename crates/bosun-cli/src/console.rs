//! Terminal notifier

use bosun_core::{ErrorEntry, ErrorStack, Notifier, Severity};
use colored::{ColoredString, Colorize};

/// Prints `[HH:MM:SS] bosun: message` lines and keeps every warning and
/// error for the end-of-run summary.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    quiet: bool,
    stack: ErrorStack,
}

impl ConsoleNotifier {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            stack: ErrorStack::new(),
        }
    }

    /// Print everything recorded during the run. Nothing is printed for a
    /// clean run.
    pub fn print_summary(&self) {
        let entries = self.stack.drain();
        if entries.is_empty() {
            return;
        }
        eprintln!();
        eprintln!("These are all the errors that you may have missed:");
        for entry in &entries {
            eprintln!("{} {}", label(entry.severity), entry.render());
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn log(&self, message: &str) {
        if !self.quiet {
            println!("{} {}: {message}", timestamp(), "bosun".cyan());
        }
    }

    fn record(&self, entry: ErrorEntry) {
        if !self.quiet {
            let name = match entry.severity {
                Severity::Warning => "bosun".yellow(),
                Severity::Error => "bosun".red(),
            };
            eprintln!("{} {name}: {}", timestamp(), entry.render());
        }
        self.stack.push(entry);
    }
}

fn timestamp() -> ColoredString {
    format!("[{}]", chrono::Local::now().format("%H:%M:%S")).dimmed()
}

fn label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Warning => "warning:".yellow().bold(),
        Severity::Error => "error:".red().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_still_records() {
        let console = ConsoleNotifier::new(true);

        console.warn("careful");
        console.error("broken");
        console.log("not recorded");

        assert_eq!(console.stack.len(), 2);
        console.print_summary();
        assert!(console.stack.is_empty());
    }
}
