//! Compile-status indicator.
//!
//! A single owned spinner with three states: idle, spinning, or persisted.
//! Compile events arrive strictly sequentially, so no locking is needed;
//! every operation is safe to call in any state.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Color of a persisted status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Red,
    Yellow,
}

/// Observable reporter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReporterState {
    /// No indicator shown yet
    Idle,
    /// Spinner running with a label
    Spinning,
    /// A final status line has been printed
    Persisted,
}

/// Terminal progress indicator for compile passes.
///
/// Owned by the build session; exactly one exists per session, which keeps
/// the "one live indicator" invariant without global state.
pub struct Reporter {
    pb: Option<ProgressBar>,
    state: ReporterState,
}

impl Reporter {
    /// Create an idle reporter.
    pub fn new() -> Self {
        Self {
            pb: None,
            state: ReporterState::Idle,
        }
    }

    /// Start spinning with the given label.
    ///
    /// Safe to call while already spinning; the label is overwritten and the
    /// existing spinner keeps running.
    pub fn start(&mut self, label: &str) {
        if let Some(pb) = &self.pb {
            pb.set_message(label.to_string());
            return;
        }

        // No animation in CI logs; persisted lines still print.
        let pb = if crate::ui::is_ci() {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("valid template")
                .tick_strings(&["◐", "◓", "◑", "◒"]),
        );
        pb.set_message(label.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        self.pb = Some(pb);
        self.state = ReporterState::Spinning;
    }

    /// Update the label while spinning; no effect otherwise.
    pub fn set_text(&mut self, label: &str) {
        if let Some(pb) = &self.pb {
            pb.set_message(label.to_string());
        }
    }

    /// Stop spinning and print a final, non-overwritable status line.
    ///
    /// The line combines a status symbol and a colorized text, followed by a
    /// blank line. Never fails, regardless of current state; a subsequent
    /// [`start`](Self::start) begins a fresh spinning cycle independent of
    /// any prior persisted line.
    pub fn persist(&mut self, symbol: &str, text: &str, color: StatusColor) {
        if let Some(pb) = self.pb.take() {
            pb.finish_and_clear();
        }

        let colored = match color {
            StatusColor::Green => text.green().to_string(),
            StatusColor::Red => text.red().to_string(),
            StatusColor::Yellow => text.yellow().to_string(),
        };
        eprintln!("{} {}", symbol, colored);
        eprintln!();

        self.state = ReporterState::Persisted;
    }

    /// Current state.
    pub fn state(&self) -> ReporterState {
        self.state
    }

    /// True while the spinner is running.
    pub fn is_spinning(&self) -> bool {
        self.pb.is_some()
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_transitions_to_spinning() {
        let mut reporter = Reporter::new();
        assert_eq!(reporter.state(), ReporterState::Idle);

        reporter.start("Compiling...");
        assert_eq!(reporter.state(), ReporterState::Spinning);
        assert!(reporter.is_spinning());
    }

    #[test]
    fn test_start_twice_is_label_overwrite() {
        let mut reporter = Reporter::new();
        reporter.start("Compiling...");
        reporter.start("Still compiling...");
        assert_eq!(reporter.state(), ReporterState::Spinning);
    }

    #[test]
    fn test_set_text_when_idle_is_noop() {
        let mut reporter = Reporter::new();
        reporter.set_text("ignored");
        assert_eq!(reporter.state(), ReporterState::Idle);
    }

    #[test]
    fn test_persist_from_any_state() {
        let mut reporter = Reporter::new();

        // Idle → persist is fine
        reporter.persist("✅", "Compile successfully!", StatusColor::Green);
        assert_eq!(reporter.state(), ReporterState::Persisted);

        // Persist twice in a row produces two independent blocks, no panic
        reporter.persist("🙅", "Compile failed!", StatusColor::Red);
        assert_eq!(reporter.state(), ReporterState::Persisted);
        assert!(!reporter.is_spinning());
    }

    #[test]
    fn test_restart_after_persist() {
        let mut reporter = Reporter::new();
        reporter.start("Compiling...");
        reporter.persist("⚠️", "Compile completes with warnings.", StatusColor::Yellow);
        reporter.start("Compiling...");
        assert_eq!(reporter.state(), ReporterState::Spinning);
    }
}
