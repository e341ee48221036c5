//! Close an auxiliary window once it stops being the main window.
//!
//! A [`ClosesWhenNoLongerMain`] policy governs exactly one window. It learns
//! which window that is through a single [`bind`](ClosesWhenNoLongerMain::bind)
//! call, then closes the window politely as soon as some other, non-exempt
//! window becomes main.
//!
//! ```text
//!   Unbound ──bind──▶ Bound ──other window became main──▶ Closing
//!                       ▲                                    │
//!                       └──────────── close declined ────────┘
//! ```
//!
//! A second rule runs once, a grace period after the policy is attached:
//! unless the tracked window is by then the only visible window, it is
//! closed. Both rules re-resolve the window from the host every time and
//! treat a missing window as "nothing to do".

use std::sync::Arc;

use parking_lot::Mutex;

use identifiable_window_core::logging::{span_names, targets};
use identifiable_window_core::EvaluationSpan;

use super::handle::{WindowHandle, WindowNumber};
use super::host::{CloseOutcome, WindowHost};
use super::identity::resolve_number;

/// Binding state of a focus policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPolicyState {
    /// No window has been reported yet.
    #[default]
    Unbound,
    /// The policy governs this window.
    Bound(WindowNumber),
    /// A close request for this window was accepted by the host.
    Closing(WindowNumber),
}

impl FocusPolicyState {
    /// The governed window, if any.
    pub fn window(&self) -> Option<WindowNumber> {
        match self {
            FocusPolicyState::Unbound => None,
            FocusPolicyState::Bound(number) | FocusPolicyState::Closing(number) => Some(*number),
        }
    }
}

/// Focus-change policy for a single tracked window.
pub struct ClosesWhenNoLongerMain {
    state: Mutex<FocusPolicyState>,
    host: Arc<dyn WindowHost>,
}

impl ClosesWhenNoLongerMain {
    pub fn new(host: Arc<dyn WindowHost>) -> Self {
        Self {
            state: Mutex::new(FocusPolicyState::Unbound),
            host,
        }
    }

    pub fn state(&self) -> FocusPolicyState {
        *self.state.lock()
    }

    /// Record the window this policy governs.
    ///
    /// Only the first call binds; the binding is never reassigned. Returns
    /// whether this call bound the policy.
    pub fn bind(&self, number: WindowNumber) -> bool {
        let mut state = self.state.lock();
        match *state {
            FocusPolicyState::Unbound => {
                *state = FocusPolicyState::Bound(number);
                tracing::debug!(target: targets::FOCUS, window = %number, "focus policy bound");
                true
            }
            current => {
                tracing::trace!(
                    target: targets::FOCUS,
                    window = %number,
                    ?current,
                    "focus policy already bound, ignoring"
                );
                false
            }
        }
    }

    /// The tracked window as the host currently sees it.
    pub fn tracked_window(&self) -> Option<WindowHandle> {
        let number = self.state().window()?;
        resolve_number(self.host.as_ref(), number)
    }

    /// React to `activated` becoming the main window.
    ///
    /// Returns `true` if a close request was issued and accepted.
    #[tracing::instrument(
        skip_all,
        target = "identifiable_window::focus",
        level = "trace",
        fields(activated = %activated.number())
    )]
    pub fn handle_became_main(&self, activated: &WindowHandle) -> bool {
        let _span = EvaluationSpan::new(span_names::FOCUS);

        let FocusPolicyState::Bound(number) = self.state() else {
            return false;
        };
        let Some(tracked) = resolve_number(self.host.as_ref(), number) else {
            return false;
        };

        if activated.number() == tracked.number() {
            return false;
        }
        if activated.is_exempt() {
            tracing::trace!(
                target: targets::FOCUS,
                window = %tracked.number(),
                activated_kind = %activated.kind(),
                "exempt window became main, keeping tracked window"
            );
            return false;
        }

        self.request_close(tracked.number(), "another window became main")
    }

    /// The debounced startup check.
    ///
    /// Closes the tracked window unless it is the sole visible window.
    /// Returns `true` if a close request was issued and accepted.
    pub fn run_startup_check(&self) -> bool {
        let _span = EvaluationSpan::new(span_names::FOCUS);

        let FocusPolicyState::Bound(number) = self.state() else {
            return false;
        };
        let Some(tracked) = resolve_number(self.host.as_ref(), number) else {
            return false;
        };

        let visible = self.host.visible_windows();
        let sole_visible = matches!(visible.as_slice(), [only] if only.number() == tracked.number());
        if sole_visible {
            tracing::trace!(target: targets::FOCUS, window = %number, "tracked window is the sole visible window");
            return false;
        }

        self.request_close(number, "not the sole visible window after startup")
    }

    fn request_close(&self, number: WindowNumber, reason: &'static str) -> bool {
        // Mark first so events raised while the host closes see `Closing`.
        {
            let mut state = self.state.lock();
            if *state != FocusPolicyState::Bound(number) {
                return false;
            }
            *state = FocusPolicyState::Closing(number);
        }

        tracing::debug!(target: targets::FOCUS, window = %number, reason, "requesting close");
        let outcome = self.host.close_window(number);

        if outcome == CloseOutcome::Declined {
            let mut state = self.state.lock();
            if *state == FocusPolicyState::Closing(number) {
                *state = FocusPolicyState::Bound(number);
            }
            tracing::debug!(target: targets::FOCUS, window = %number, "close declined");
        }

        outcome.is_requested()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{HeadlessHost, WindowKind};

    fn setup() -> (Arc<HeadlessHost>, ClosesWhenNoLongerMain) {
        let host = Arc::new(HeadlessHost::new());
        let policy = ClosesWhenNoLongerMain::new(host.clone());
        (host, policy)
    }

    #[test]
    fn test_bind_once() {
        let (host, policy) = setup();
        let first = host.add_window(WindowKind::Normal, None);
        let second = host.add_window(WindowKind::Normal, None);

        assert_eq!(policy.state(), FocusPolicyState::Unbound);
        assert!(policy.bind(first));
        assert!(!policy.bind(second));
        assert_eq!(policy.state(), FocusPolicyState::Bound(first));
    }

    #[test]
    fn test_unbound_ignores_events() {
        let (host, policy) = setup();
        let other = host.add_window(WindowKind::Normal, None);
        let activated = host.window(other).unwrap();

        assert!(!policy.handle_became_main(&activated));
        assert!(!policy.run_startup_check());
        assert!(host.close_requests().is_empty());
    }

    #[test]
    fn test_self_activation_keeps_window() {
        let (host, policy) = setup();
        let tracked = host.add_window(WindowKind::Normal, None);
        policy.bind(tracked);

        let activated = host.window(tracked).unwrap();
        assert!(!policy.handle_became_main(&activated));
        assert!(host.window(tracked).is_some());
    }

    #[test]
    fn test_other_activation_closes_window() {
        let (host, policy) = setup();
        let tracked = host.add_window(WindowKind::Normal, None);
        let other = host.add_window(WindowKind::Dialog, None);
        policy.bind(tracked);

        let activated = host.window(other).unwrap();
        assert!(policy.handle_became_main(&activated));
        assert_eq!(policy.state(), FocusPolicyState::Closing(tracked));
        assert!(host.window(tracked).is_none());
        assert_eq!(host.close_requests(), vec![tracked]);
    }

    #[test]
    fn test_exempt_activation_keeps_window() {
        let (host, policy) = setup();
        let tracked = host.add_window(WindowKind::Normal, None);
        let panel = host.add_window(WindowKind::Panel, None);
        policy.bind(tracked);

        let activated = host.window(panel).unwrap();
        assert!(!policy.handle_became_main(&activated));
        assert_eq!(policy.state(), FocusPolicyState::Bound(tracked));
        assert!(host.close_requests().is_empty());
    }

    #[test]
    fn test_declined_close_returns_to_bound() {
        let (host, policy) = setup();
        let tracked = host.add_window(WindowKind::Normal, None);
        let other = host.add_window(WindowKind::Normal, None);
        host.set_refuses_close(tracked, true);
        policy.bind(tracked);

        let activated = host.window(other).unwrap();
        assert!(!policy.handle_became_main(&activated));
        assert_eq!(policy.state(), FocusPolicyState::Bound(tracked));
        assert_eq!(host.close_requests().len(), 1);
    }

    #[test]
    fn test_closed_window_is_a_miss() {
        let (host, policy) = setup();
        let tracked = host.add_window(WindowKind::Normal, None);
        let other = host.add_window(WindowKind::Normal, None);
        policy.bind(tracked);
        host.close_window(tracked);
        host.clear_requests();

        let activated = host.window(other).unwrap();
        assert!(!policy.handle_became_main(&activated));
        assert!(policy.tracked_window().is_none());
        assert!(host.close_requests().is_empty());
    }

    #[test]
    fn test_startup_check() {
        let (host, policy) = setup();
        let tracked = host.add_window(WindowKind::Normal, None);
        policy.bind(tracked);
        assert!(!policy.run_startup_check());

        let _other = host.add_window(WindowKind::Normal, None);
        assert!(policy.run_startup_check());
        assert!(host.window(tracked).is_none());
    }

    #[test]
    fn test_startup_check_closes_hidden_tracked_window() {
        let (host, policy) = setup();
        let tracked = host.add_window(WindowKind::Normal, None);
        host.set_visible(tracked, false);
        policy.bind(tracked);

        assert!(policy.run_startup_check());
    }
}
