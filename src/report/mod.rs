//! The build-event reporting pipeline.
//!
//! Turns the engine's raw compile-result stream into a classified,
//! human-readable status report: a spinner while compiling, then one
//! persisted line per pass (success, failure, or warnings) with a truncated
//! diagnostic body.

pub mod classify;
pub mod reporter;
pub mod session;

pub use classify::{classify, parse_bracketed_location, Diagnostic, StackLocation};
pub use reporter::{Reporter, ReporterState, StatusColor};
pub use session::{BuildOutcome, BuildSession, ListenBanner, SessionMode};
