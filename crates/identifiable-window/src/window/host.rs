//! The host windowing platform, as seen by lifecycle policies.
//!
//! Policies never talk to a platform API directly. They are handed a
//! [`WindowHost`], which enumerates live windows, publishes window events,
//! and accepts close/open requests. [`HeadlessHost`](super::HeadlessHost) is
//! an in-memory implementation; native backends implement the trait on top
//! of their own window list.

use identifiable_window_core::Signal;

use super::handle::{WindowHandle, WindowNumber};
use super::identity::WindowIdentifier;

/// Result of a polite close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The host accepted the request and the window is closing.
    Requested,
    /// The window (or its user) declined to close.
    Declined,
    /// No live window has that number.
    NotFound,
}

impl CloseOutcome {
    /// Whether the window is now closing.
    pub fn is_requested(&self) -> bool {
        matches!(self, CloseOutcome::Requested)
    }
}

/// Window lifecycle notifications published by a host.
///
/// Hosts emit these from their UI execution context; connected slots run to
/// completion before `emit` returns.
pub struct WindowEvents {
    /// Emitted when a window becomes the main (active) window.
    became_main: Signal<WindowHandle>,
    /// Emitted just before a window closes. The window is still listed by the
    /// host while this signal runs.
    will_close: Signal<WindowHandle>,
}

impl WindowEvents {
    pub fn new() -> Self {
        Self {
            became_main: Signal::new(),
            will_close: Signal::new(),
        }
    }

    /// Signal emitted when a window becomes main.
    pub fn became_main(&self) -> &Signal<WindowHandle> {
        &self.became_main
    }

    /// Signal emitted when a window is about to close.
    pub fn will_close(&self) -> &Signal<WindowHandle> {
        &self.will_close
    }
}

impl Default for WindowEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// Access to the host's live windows.
///
/// Implementations must not hold internal locks while emitting on
/// [`events`](Self::events): slots routinely call back into the host.
pub trait WindowHost: Send + Sync {
    /// Snapshot every live window, in the host's window order.
    fn windows(&self) -> Vec<WindowHandle>;

    /// Look up a live window by number.
    fn window(&self, number: WindowNumber) -> Option<WindowHandle> {
        self.windows().into_iter().find(|w| w.number() == number)
    }

    /// The visible window set, recomputed from the host on every call.
    fn visible_windows(&self) -> Vec<WindowHandle> {
        self.windows().into_iter().filter(|w| w.is_visible()).collect()
    }

    /// The host's lifecycle signals.
    fn events(&self) -> &WindowEvents;

    /// Ask a window to close, honouring any confirmation it shows.
    fn close_window(&self, number: WindowNumber) -> CloseOutcome;

    /// Open the window for `identifier`, surfacing it if it already exists.
    ///
    /// Returns the number of the window that was opened or surfaced, or
    /// `None` if the host could not provide one.
    fn open_window(&self, identifier: &WindowIdentifier) -> Option<WindowNumber>;
}
