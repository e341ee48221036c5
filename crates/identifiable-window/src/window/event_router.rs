//! winit event routing.
//!
//! A host backed by winit forwards each `WindowEvent` to [`route_window_event`]
//! from its `ApplicationHandler::window_event`:
//!
//! - `Focused(true)` emits [`WindowEvents::became_main`].
//! - `CloseRequested` becomes a polite [`WindowHost::close_window`]. The
//!   request may still be declined, so the router never emits
//!   [`WindowEvents::will_close`] itself. The host emits it from
//!   `close_window` once the close is accepted, before the window is dropped.
//!
//! ```ignore
//! fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
//!     if route_window_event(self.host.as_ref(), id, &event) {
//!         return;
//!     }
//!     // Default processing...
//! }
//! ```
//!
//! [`WindowEvents::became_main`]: super::WindowEvents::became_main
//! [`WindowEvents::will_close`]: super::WindowEvents::will_close

use winit::event::WindowEvent;
use winit::window::WindowId;

use identifiable_window_core::logging::targets;

use super::handle::WindowNumber;
use super::host::{CloseOutcome, WindowHost};

impl WindowNumber {
    /// The window number for a winit window.
    pub fn from_winit(id: WindowId) -> Self {
        Self::new(u64::from(id))
    }
}

/// Route a single winit window event to the host.
///
/// Returns `true` if the event was consumed. Focus changes are only observed.
/// A close request for a known window is consumed: the host's `close_window`
/// has either closed the window or been declined.
pub fn route_window_event(host: &dyn WindowHost, window_id: WindowId, event: &WindowEvent) -> bool {
    let number = WindowNumber::from_winit(window_id);

    match event {
        WindowEvent::Focused(true) => {
            let Some(handle) = host.window(number) else {
                tracing::trace!(target: targets::HOST, window = %number, "focus event for unknown window");
                return false;
            };
            host.events().became_main().emit(handle);
            false
        }
        WindowEvent::CloseRequested => {
            let outcome = host.close_window(number);
            tracing::trace!(target: targets::HOST, window = %number, ?outcome, "close requested by platform");
            outcome != CloseOutcome::NotFound
        }
        _ => false,
    }
}
