//! Logging facilities for Identifiable Window.
//!
//! Identifiable Window uses the `tracing` crate for instrumentation. To see
//! logs, install a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("identifiable_window=debug")
//!         .init();
//! }
//! ```
//!
//! Policy decisions (a close or open request being issued) are logged at
//! `debug`. Misses, such as a tracked window that no longer exists, are logged
//! at `trace`; they are expected and never surface as warnings or errors.

/// Span names used throughout Identifiable Window for tracing.
pub mod span_names {
    /// Focus-change policy evaluation span.
    pub const FOCUS: &str = "identifiable_window::focus";
    /// Close-cascade policy evaluation span.
    pub const CASCADE: &str = "identifiable_window::cascade";
    /// Main-window exclusion span.
    pub const EXCLUSION: &str = "identifiable_window::exclusion";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "identifiable_window_core";
    /// Scheduler target.
    pub const SCHEDULER: &str = "identifiable_window_core::scheduler";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "identifiable_window_core::signal";
    /// Focus-change policy target.
    pub const FOCUS: &str = "identifiable_window::focus";
    /// Close-cascade policy target.
    pub const CASCADE: &str = "identifiable_window::cascade";
    /// Main-window exclusion target.
    pub const EXCLUSION: &str = "identifiable_window::exclusion";
    /// Window identity registry target.
    pub const REGISTRY: &str = "identifiable_window::registry";
    /// Host adapters target.
    pub const HOST: &str = "identifiable_window::host";
}

/// A guard that keeps a policy evaluation span entered until dropped.
///
/// Every log line emitted while the guard is alive carries the policy name,
/// which makes interleaved policy decisions for one event easy to follow.
#[derive(Debug)]
pub struct EvaluationSpan {
    _span: tracing::span::EnteredSpan,
}

impl EvaluationSpan {
    /// Enter a new evaluation span for `policy`.
    pub fn new(policy: &'static str) -> Self {
        let span = tracing::trace_span!(target: "identifiable_window::policy", "evaluate", policy);
        Self {
            _span: span.entered(),
        }
    }
}
