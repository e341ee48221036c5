//! Window kind definitions.
//!
//! The kind of a window decides how lifecycle policies treat it. Transient
//! overlay kinds are *exempt*: when one of them becomes the main window, the
//! windows underneath it are left alone.

/// The kind of a host window.
///
/// # Example
///
/// ```
/// use identifiable_window::window::WindowKind;
///
/// assert!(!WindowKind::Normal.is_exempt());
/// assert!(WindowKind::Panel.is_exempt());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowKind {
    /// A normal top-level document or application window.
    #[default]
    Normal,

    /// A dialog window.
    ///
    /// Dialogs are full windows for lifecycle purposes: a dialog becoming
    /// main can close an auxiliary window behind it.
    Dialog,

    /// A tool window (palette, inspector, etc.).
    ///
    /// Tool windows are real windows: one becoming main closes an auxiliary
    /// window like any other.
    Tool,

    /// A popup window (menu, dropdown, tooltip). Exempt.
    Popup,

    /// A splash screen window.
    Splash,

    /// A panel (color picker, font panel, alert panel). Exempt.
    Panel,
}

impl WindowKind {
    /// Whether activation of this kind must never close other windows.
    pub fn is_exempt(&self) -> bool {
        match self {
            WindowKind::Popup | WindowKind::Panel => true,
            WindowKind::Normal | WindowKind::Dialog | WindowKind::Tool | WindowKind::Splash => false,
        }
    }
}

impl std::fmt::Display for WindowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowKind::Normal => write!(f, "Normal"),
            WindowKind::Dialog => write!(f, "Dialog"),
            WindowKind::Tool => write!(f, "Tool"),
            WindowKind::Popup => write!(f, "Popup"),
            WindowKind::Splash => write!(f, "Splash"),
            WindowKind::Panel => write!(f, "Panel"),
        }
    }
}
