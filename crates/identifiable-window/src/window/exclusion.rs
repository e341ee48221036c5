//! Close every window except the main one.

use identifiable_window_core::logging::{span_names, targets};
use identifiable_window_core::EvaluationSpan;

use super::host::{CloseOutcome, WindowHost};
use super::window_set_debug::WindowSetDebug;

/// Politely close every live window that is not the main window.
///
/// Best-effort: declined requests are ignored. Returns the number of windows
/// that received a close request, accepted or declined. A window that is
/// already gone when its turn comes (closed re-entrantly by an earlier
/// request) is not counted.
///
/// # Example
///
/// ```
/// use identifiable_window::window::{close_all_but_main, HeadlessHost, WindowHost, WindowKind};
///
/// let host = HeadlessHost::new();
/// let main = host.add_window(WindowKind::Normal, None);
/// host.add_window(WindowKind::Normal, None);
/// host.add_window(WindowKind::Panel, None);
/// host.activate(main);
///
/// assert_eq!(close_all_but_main(&host), 2);
/// assert_eq!(host.windows().len(), 1);
/// ```
pub fn close_all_but_main(host: &dyn WindowHost) -> usize {
    let _span = EvaluationSpan::new(span_names::EXCLUSION);
    tracing::trace!(target: targets::EXCLUSION, windows = %WindowSetDebug::new(host), "closing all but main");

    let mut requested = 0;
    for window in host.windows() {
        if window.is_main() {
            continue;
        }
        let outcome = host.close_window(window.number());
        tracing::debug!(target: targets::EXCLUSION, window = %window.number(), ?outcome, "close requested");
        if outcome != CloseOutcome::NotFound {
            requested += 1;
        }
    }

    requested
}
