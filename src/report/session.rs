//! Build session: one outcome per compile pass.
//!
//! Ties classifier output and reporter state together. Each compile pass
//! moves through `Pending` (spinner running) → `Evaluating` (classify) →
//! `Reported` (persisted line plus body). Watch mode returns to `Pending` on
//! the next compile-start; one-shot mode stops after the first report.

use crate::engine::{CompileEvent, RawCompileResult};
use crate::report::classify::{self, Diagnostic};
use crate::report::reporter::{Reporter, StatusColor};
use owo_colors::OwoColorize;

/// Separator between diagnostic entries in a report body (two blank lines).
const ENTRY_SEPARATOR: &str = "\n\n\n";

/// Whether the session reports a single build or a watch stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Production build that runs once
    OneShot,
    /// Watch/dev-server mode with repeated compile passes
    Watch,
}

/// Per-pass state machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Pending,
    Evaluating,
    Reported,
}

/// Outcome of one compile pass.
///
/// Exclusive: a pass is exactly one of these. Success is exactly "no errors
/// and no warnings"; errors take precedence over warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Success,
    Failure(Vec<Diagnostic>),
    WarningsOnly(Vec<Diagnostic>),
}

impl BuildOutcome {
    /// Compute the outcome from classified diagnostic sequences.
    pub fn from_diagnostics(errors: Vec<Diagnostic>, warnings: Vec<Diagnostic>) -> Self {
        if !errors.is_empty() {
            BuildOutcome::Failure(errors)
        } else if !warnings.is_empty() {
            BuildOutcome::WarningsOnly(warnings)
        } else {
            BuildOutcome::Success
        }
    }

    /// True for the failure variant.
    pub fn is_failure(&self) -> bool {
        matches!(self, BuildOutcome::Failure(_))
    }
}

/// URLs announced once the dev server is listening.
#[derive(Debug, Clone)]
pub struct ListenBanner {
    /// Localhost URL
    pub local_url: String,
    /// Host-addressed URL for other devices
    pub network_url: String,
}

/// Reporting state machine for a build session.
///
/// Owns its [`Reporter`]; constructing one per session preserves the
/// one-live-indicator invariant without a global.
pub struct BuildSession {
    reporter: Reporter,
    mode: SessionMode,
    phase: Phase,
    banner: Option<ListenBanner>,
    banner_pending: bool,
}

impl BuildSession {
    /// Create a session in the given mode.
    pub fn new(reporter: Reporter, mode: SessionMode) -> Self {
        Self {
            reporter,
            mode,
            phase: Phase::Pending,
            banner: None,
            banner_pending: false,
        }
    }

    /// Arm the one-shot listening banner (watch mode).
    ///
    /// The banner prints after the first compile-done event and never again.
    pub fn announce_listening(&mut self, banner: ListenBanner) {
        self.banner = Some(banner);
        self.banner_pending = true;
    }

    /// Dispatch a compile-lifecycle event.
    ///
    /// Returns the outcome for done events, `None` for start events.
    pub fn handle_event(&mut self, event: CompileEvent) -> Option<BuildOutcome> {
        match event {
            CompileEvent::Started => {
                self.compile_started();
                None
            }
            CompileEvent::Done(result) => Some(self.compile_done(&result)),
        }
    }

    /// A compile pass has started: spin.
    ///
    /// In one-shot mode a session that has already reported stays reported;
    /// later start events are ignored.
    pub fn compile_started(&mut self) {
        if self.mode == SessionMode::OneShot && self.phase == Phase::Reported {
            return;
        }
        self.phase = Phase::Pending;
        self.reporter.start("Compiling...");
    }

    /// A compile pass has finished: classify, render, report the outcome.
    pub fn compile_done(&mut self, result: &RawCompileResult) -> BuildOutcome {
        self.phase = Phase::Evaluating;

        let (errors, warnings) = classify::classify(result);
        let outcome = BuildOutcome::from_diagnostics(errors, warnings);
        self.render(&outcome, result.stats.as_deref());

        self.phase = Phase::Reported;
        outcome
    }

    /// The engine itself failed to run (distinct from compile errors).
    ///
    /// Rendered as a failure through the minifier-aware fallback printer;
    /// the caller still owns what happens to the process afterwards.
    pub fn engine_failed(&mut self, detail: &str) -> BuildOutcome {
        let outcome = BuildOutcome::Failure(vec![Diagnostic::from_failure_text(detail)]);
        self.render(&outcome, None);
        self.phase = Phase::Reported;
        outcome
    }

    fn render(&mut self, outcome: &BuildOutcome, stats: Option<&str>) {
        match outcome {
            BuildOutcome::Success => {
                self.reporter
                    .persist("✅", "Compile successfully!", StatusColor::Green);
                if self.mode == SessionMode::OneShot {
                    if let Some(stats) = stats {
                        eprintln!("{}", stats);
                        eprintln!();
                    }
                }
            }
            BuildOutcome::Failure(errors) => {
                self.reporter
                    .persist("🙅", "Compile failed!", StatusColor::Red);
                eprintln!("{}", failure_body(errors));
                eprintln!();
            }
            BuildOutcome::WarningsOnly(warnings) => {
                self.reporter.persist(
                    "⚠️",
                    "Compile completes with warnings.",
                    StatusColor::Yellow,
                );
                eprintln!("{}", warning_body(warnings));
                eprintln!();
                if self.mode == SessionMode::OneShot {
                    eprintln!(
                        "{}",
                        "Search for the keywords to learn more about each warning.".cyan()
                    );
                    eprintln!(
                        "{}",
                        "To ignore, add // eslint-disable-next-line to the line before.".dimmed()
                    );
                    eprintln!();
                }
            }
        }

        self.print_banner_once();
    }

    fn print_banner_once(&mut self) {
        if !self.banner_pending {
            return;
        }
        self.banner_pending = false;

        if let Some(banner) = &self.banner {
            eprintln!("{}", format!("Listening at {}", banner.local_url).cyan());
            eprintln!("{}", format!("Listening at {}", banner.network_url).cyan());
            eprintln!("{}", "Watching for file changes...".dimmed());
            eprintln!();
        }
    }
}

/// How many diagnostics a report body shows; the rest are dropped so the
/// output stays short.
const DISPLAY_LIMIT: usize = 1;

/// Body text for a failure report: the first error only.
pub fn failure_body(errors: &[Diagnostic]) -> String {
    join_entries(errors, DISPLAY_LIMIT)
}

/// Body text for a warnings-only report; same truncation as failures.
pub fn warning_body(warnings: &[Diagnostic]) -> String {
    join_entries(warnings, DISPLAY_LIMIT)
}

/// Join up to `limit` diagnostics, two blank lines between entries.
fn join_entries(diagnostics: &[Diagnostic], limit: usize) -> String {
    diagnostics
        .iter()
        .take(limit)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(ENTRY_SEPARATOR)
}
