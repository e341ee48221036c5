//! Reopen a default window when the last visible window closes.

use std::sync::Arc;

use identifiable_window_core::logging::{span_names, targets};
use identifiable_window_core::EvaluationSpan;

use super::handle::{WindowHandle, WindowNumber};
use super::host::WindowHost;
use super::identity::WindowIdentifier;

/// Close-cascade policy.
///
/// On every "will close" event the policy looks at the visible windows other
/// than the one closing. If none are left, it asks the host to open the
/// window for its target identifier. Nothing is remembered between events.
pub struct OpensDefaultOnClose {
    target: WindowIdentifier,
    host: Arc<dyn WindowHost>,
}

impl OpensDefaultOnClose {
    pub fn new(target: impl Into<WindowIdentifier>, host: Arc<dyn WindowHost>) -> Self {
        Self {
            target: target.into(),
            host,
        }
    }

    /// The identifier opened when the last visible window closes.
    pub fn target(&self) -> &WindowIdentifier {
        &self.target
    }

    /// React to `closing` being about to close.
    ///
    /// Returns the number of the window the host opened, if an open request
    /// was issued and honoured.
    #[tracing::instrument(
        skip_all,
        target = "identifiable_window::cascade",
        level = "trace",
        fields(closing = %closing.number())
    )]
    pub fn handle_will_close(&self, closing: &WindowHandle) -> Option<WindowNumber> {
        let _span = EvaluationSpan::new(span_names::CASCADE);

        let remaining = self
            .host
            .visible_windows()
            .into_iter()
            .filter(|w| w.number() != closing.number())
            .count();
        if remaining > 0 {
            tracing::trace!(target: targets::CASCADE, remaining, "visible windows remain");
            return None;
        }

        tracing::debug!(
            target: targets::CASCADE,
            closing = %closing.number(),
            identifier = %self.target,
            "last visible window closing, opening default window"
        );
        let opened = self.host.open_window(&self.target);
        if opened.is_none() {
            tracing::debug!(target: targets::CASCADE, identifier = %self.target, "host did not open default window");
        }
        opened
    }
}
