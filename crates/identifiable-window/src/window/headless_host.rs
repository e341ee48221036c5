//! In-memory window host.
//!
//! `HeadlessHost` keeps a window list in memory and behaves like a desktop
//! platform would from the policies' point of view: it emits lifecycle
//! signals, honours close refusals, and keeps at most one window per logical
//! identifier. It backs headless applications and the test suite.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};

use identifiable_window_core::logging::targets;

use super::handle::{WindowHandle, WindowNumber};
use super::host::{CloseOutcome, WindowEvents, WindowHost};
use super::identity::WindowIdentifier;
use super::window_type::WindowKind;

/// Internal window record.
#[derive(Debug, Clone)]
struct HeadlessWindow {
    handle: WindowHandle,
    /// Simulates a window whose confirmation prompt the user cancels.
    refuses_close: bool,
}

/// An in-memory [`WindowHost`].
///
/// Window numbers are assigned in creation order, starting at 1, and never
/// reused. Every close and open request is recorded so callers can inspect
/// exactly what the policies asked for.
///
/// # Example
///
/// ```
/// use identifiable_window::window::{HeadlessHost, WindowHost, WindowKind};
///
/// let host = HeadlessHost::new();
/// let library = host.open_window(&"main-library".into()).unwrap();
/// let panel = host.add_window(WindowKind::Panel, None);
///
/// assert!(host.window(library).unwrap().is_main());
/// assert_eq!(host.visible_windows().len(), 2);
/// host.close_window(panel);
/// assert_eq!(host.windows().len(), 1);
/// ```
pub struct HeadlessHost {
    /// All live windows, keyed (and therefore ordered) by number.
    windows: RwLock<BTreeMap<WindowNumber, HeadlessWindow>>,
    next_number: AtomicU64,
    events: WindowEvents,
    close_requests: Mutex<Vec<WindowNumber>>,
    open_requests: Mutex<Vec<WindowIdentifier>>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self {
            windows: RwLock::new(BTreeMap::new()),
            next_number: AtomicU64::new(1),
            events: WindowEvents::new(),
            close_requests: Mutex::new(Vec::new()),
            open_requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a visible, non-main window.
    ///
    /// An identifier that already has a live window is not reused: the new
    /// window is created without one. A window that is closing has released
    /// its identifier.
    pub fn add_window(
        &self,
        kind: WindowKind,
        identifier: Option<WindowIdentifier>,
    ) -> WindowNumber {
        let number = WindowNumber::new(self.next_number.fetch_add(1, Ordering::SeqCst));
        let mut handle = WindowHandle::new(number, kind).with_visible(true);

        {
            let mut windows = self.windows.write();
            if let Some(identifier) = identifier {
                let taken = windows
                    .values()
                    .any(|w| !w.handle.is_closing() && w.handle.identifier() == Some(&identifier));
                if taken {
                    tracing::warn!(
                        target: targets::HOST,
                        identifier = %identifier,
                        "identifier already has a live window, creating anonymous window"
                    );
                } else {
                    handle = handle.with_identifier(identifier);
                }
            }
            windows.insert(
                number,
                HeadlessWindow {
                    handle,
                    refuses_close: false,
                },
            );
        }

        tracing::trace!(target: targets::HOST, window = %number, %kind, "window created");
        number
    }

    /// Make `number` the main window, emitting "became main".
    ///
    /// Returns `false` if no such window exists.
    pub fn activate(&self, number: WindowNumber) -> bool {
        let activated = {
            let mut windows = self.windows.write();
            if !windows.contains_key(&number) {
                return false;
            }
            let mut activated = None;
            for (key, window) in windows.iter_mut() {
                let is_target = *key == number;
                window.handle.set_main(is_target);
                if is_target {
                    window.handle.set_visible(true);
                    activated = Some(window.handle.clone());
                }
            }
            activated
        };

        match activated {
            Some(handle) => {
                tracing::trace!(target: targets::HOST, window = %number, "window became main");
                self.events.became_main().emit(handle);
                true
            }
            None => false,
        }
    }

    /// Show or hide a window. Hiding the main window resigns main status.
    pub fn set_visible(&self, number: WindowNumber, visible: bool) -> bool {
        let mut windows = self.windows.write();
        let Some(window) = windows.get_mut(&number) else {
            return false;
        };
        window.handle.set_visible(visible);
        if !visible {
            window.handle.set_main(false);
        }
        true
    }

    /// Make a window decline (or accept again) polite close requests.
    pub fn set_refuses_close(&self, number: WindowNumber, refuses: bool) -> bool {
        let mut windows = self.windows.write();
        let Some(window) = windows.get_mut(&number) else {
            return false;
        };
        window.refuses_close = refuses;
        true
    }

    /// Every close request received, in order, including declined ones.
    pub fn close_requests(&self) -> Vec<WindowNumber> {
        self.close_requests.lock().clone()
    }

    /// Every open request received, in order.
    pub fn open_requests(&self) -> Vec<WindowIdentifier> {
        self.open_requests.lock().clone()
    }

    /// Forget recorded requests.
    pub fn clear_requests(&self) {
        self.close_requests.lock().clear();
        self.open_requests.lock().clear();
    }

    pub fn window_count(&self) -> usize {
        self.windows.read().len()
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowHost for HeadlessHost {
    fn windows(&self) -> Vec<WindowHandle> {
        self.windows
            .read()
            .values()
            .map(|w| w.handle.clone())
            .collect()
    }

    fn window(&self, number: WindowNumber) -> Option<WindowHandle> {
        self.windows.read().get(&number).map(|w| w.handle.clone())
    }

    fn events(&self) -> &WindowEvents {
        &self.events
    }

    fn close_window(&self, number: WindowNumber) -> CloseOutcome {
        self.close_requests.lock().push(number);

        let closing = {
            let mut windows = self.windows.write();
            let Some(window) = windows.get_mut(&number) else {
                return CloseOutcome::NotFound;
            };
            if window.handle.is_closing() {
                // Already on its way out.
                return CloseOutcome::Requested;
            }
            if window.refuses_close {
                tracing::trace!(target: targets::HOST, window = %number, "close declined");
                return CloseOutcome::Declined;
            }
            window.handle.set_closing(true);
            window.handle.clone()
        };

        self.events.will_close().emit(closing);
        self.windows.write().remove(&number);
        tracing::trace!(target: targets::HOST, window = %number, "window closed");

        CloseOutcome::Requested
    }

    fn open_window(&self, identifier: &WindowIdentifier) -> Option<WindowNumber> {
        self.open_requests.lock().push(identifier.clone());

        let existing = self
            .windows
            .read()
            .values()
            .find(|w| w.handle.identifier() == Some(identifier) && !w.handle.is_closing())
            .map(|w| w.handle.number());

        let number = match existing {
            Some(number) => {
                tracing::trace!(target: targets::HOST, window = %number, identifier = %identifier, "surfacing existing window");
                number
            }
            None => self.add_window(WindowKind::Normal, Some(identifier.clone())),
        };

        self.activate(number);
        Some(number)
    }
}

static_assertions::assert_impl_all!(HeadlessHost: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::resolve_identifier;
    use std::sync::Arc;

    #[test]
    fn test_numbers_are_fresh() {
        let host = HeadlessHost::new();
        let first = host.add_window(WindowKind::Normal, None);
        host.close_window(first);
        let second = host.add_window(WindowKind::Normal, None);

        assert_ne!(first, second);
        assert_eq!(host.window_count(), 1);
    }

    #[test]
    fn test_one_window_per_identifier() {
        let host = HeadlessHost::new();
        let first = host.open_window(&"settings".into()).unwrap();
        let again = host.open_window(&"settings".into()).unwrap();

        assert_eq!(first, again);
        assert_eq!(host.window_count(), 1);

        let anonymous = host.add_window(WindowKind::Normal, Some("settings".into()));
        assert!(host.window(anonymous).unwrap().identifier().is_none());
    }

    #[test]
    fn test_activate_moves_main_flag() {
        let host = HeadlessHost::new();
        let first = host.add_window(WindowKind::Normal, None);
        let second = host.add_window(WindowKind::Normal, None);

        assert!(host.activate(first));
        assert!(host.window(first).unwrap().is_main());

        assert!(host.activate(second));
        assert!(!host.window(first).unwrap().is_main());
        assert!(host.window(second).unwrap().is_main());

        assert!(!host.activate(WindowNumber::new(99)));
    }

    #[test]
    fn test_will_close_sees_closing_window() {
        let host = Arc::new(HeadlessHost::new());
        let number = host.add_window(WindowKind::Normal, None);
        let seen = Arc::new(Mutex::new(None));

        let weak = Arc::downgrade(&host);
        let seen_clone = seen.clone();
        host.events().will_close().connect(move |closing| {
            let still_listed = weak
                .upgrade()
                .and_then(|host| host.window(closing.number()))
                .is_some();
            *seen_clone.lock() = Some(still_listed);
        });

        assert_eq!(host.close_window(number), CloseOutcome::Requested);
        assert_eq!(*seen.lock(), Some(true));
        assert!(host.window(number).is_none());
    }

    #[test]
    fn test_refused_close() {
        let host = HeadlessHost::new();
        let number = host.add_window(WindowKind::Normal, None);
        host.set_refuses_close(number, true);

        assert_eq!(host.close_window(number), CloseOutcome::Declined);
        assert!(host.window(number).is_some());

        host.set_refuses_close(number, false);
        assert_eq!(host.close_window(number), CloseOutcome::Requested);
        assert_eq!(host.close_window(number), CloseOutcome::NotFound);
        assert_eq!(host.close_requests(), vec![number, number, number]);
    }

    #[test]
    fn test_reentrant_close_is_idempotent() {
        let host = Arc::new(HeadlessHost::new());
        let number = host.add_window(WindowKind::Normal, None);
        let will_close_count = Arc::new(Mutex::new(0));

        let weak = Arc::downgrade(&host);
        let count = will_close_count.clone();
        host.events().will_close().connect(move |closing| {
            *count.lock() += 1;
            if let Some(host) = weak.upgrade() {
                assert_eq!(host.close_window(closing.number()), CloseOutcome::Requested);
            }
        });

        host.close_window(number);
        assert_eq!(*will_close_count.lock(), 1);
        assert_eq!(host.window_count(), 0);
    }

    #[test]
    fn test_reopen_during_close_keeps_identifier() {
        let host = Arc::new(HeadlessHost::new());
        let first = host.open_window(&"main-library".into()).unwrap();

        let weak = Arc::downgrade(&host);
        host.events().will_close().connect(move |_| {
            if let Some(host) = weak.upgrade() {
                host.open_window(&"main-library".into());
            }
        });

        host.close_window(first);
        let reopened = resolve_identifier(&*host, &"main-library".into()).unwrap();
        assert_ne!(reopened.number(), first);
    }

    #[test]
    fn test_hiding_resigns_main() {
        let host = HeadlessHost::new();
        let number = host.add_window(WindowKind::Normal, None);
        host.activate(number);
        host.set_visible(number, false);

        let handle = host.window(number).unwrap();
        assert!(!handle.is_visible());
        assert!(!handle.is_main());
        assert!(host.visible_windows().is_empty());
    }
}
