//! Window handles and host-assigned window numbers.

use std::fmt;

use super::identity::WindowIdentifier;
use super::window_type::WindowKind;

/// The host-assigned identifier of a live window.
///
/// Numbers stay valid for the lifetime of the window they were assigned to
/// and are never reused by a well-behaved host. A [`WindowHandle`] is only a
/// snapshot, so anything that outlives the current event (a debounced check,
/// a tracked binding) keeps the number and resolves a fresh handle later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowNumber(u64);

impl WindowNumber {
    /// Wrap a raw host number.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw host number.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for WindowNumber {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for WindowNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A snapshot of a live host window.
///
/// Handles are produced by a [`WindowHost`](super::WindowHost); lifecycle
/// policies only read them and never construct live windows themselves.
///
/// # Example
///
/// ```
/// use identifiable_window::window::{WindowHandle, WindowKind, WindowNumber};
///
/// let handle = WindowHandle::new(WindowNumber::new(4), WindowKind::Panel)
///     .with_visible(true);
///
/// assert!(handle.is_exempt());
/// assert!(!handle.is_main());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowHandle {
    number: WindowNumber,
    identifier: Option<WindowIdentifier>,
    kind: WindowKind,
    visible: bool,
    main: bool,
    closing: bool,
}

impl WindowHandle {
    /// Create a hidden, non-main handle without a logical identifier.
    pub fn new(number: WindowNumber, kind: WindowKind) -> Self {
        Self {
            number,
            identifier: None,
            kind,
            visible: false,
            main: false,
            closing: false,
        }
    }

    /// Set the logical identifier this window was opened for.
    pub fn with_identifier(mut self, identifier: impl Into<WindowIdentifier>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Set the visibility flag.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set the main/active flag.
    pub fn with_main(mut self, main: bool) -> Self {
        self.main = main;
        self
    }

    /// Mark the window as closing.
    ///
    /// Hosts set this while delivering "will close". A closing window no
    /// longer owns its logical identifier.
    pub fn with_closing(mut self, closing: bool) -> Self {
        self.closing = closing;
        self
    }

    pub fn number(&self) -> WindowNumber {
        self.number
    }

    pub fn identifier(&self) -> Option<&WindowIdentifier> {
        self.identifier.as_ref()
    }

    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_main(&self) -> bool {
        self.main
    }

    /// Whether a close of this window has been accepted.
    pub fn is_closing(&self) -> bool {
        self.closing
    }

    /// Whether this window is an overlay whose activation never closes others.
    pub fn is_exempt(&self) -> bool {
        self.kind.is_exempt()
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn set_main(&mut self, main: bool) {
        self.main = main;
    }

    pub(crate) fn set_closing(&mut self, closing: bool) {
        self.closing = closing;
    }
}
