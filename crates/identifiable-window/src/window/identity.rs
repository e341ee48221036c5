//! Logical window identity.
//!
//! Every window role an application can open is declared once, with a stable
//! [`WindowIdentifier`] and a display title. The host guarantees at most one
//! live window per identifier, so the identifier is enough to find, surface,
//! or reopen that window later, no matter how many times it has been closed
//! and recreated in between.
//!
//! # Example
//!
//! ```
//! use identifiable_window::window::{IdentifiableWindow, WindowClass, WindowRegistry};
//!
//! struct Settings;
//!
//! impl IdentifiableWindow for Settings {
//!     const IDENTIFIER: &'static str = "settings";
//!
//!     fn title(&self) -> String {
//!         "Settings".into()
//!     }
//!
//!     fn class(&self) -> WindowClass {
//!         WindowClass::Utility
//!     }
//! }
//!
//! let mut registry = WindowRegistry::new();
//! registry.register(&Settings).unwrap();
//! assert!(registry.descriptor(&"settings".into()).is_some());
//! ```

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use identifiable_window_core::logging::targets;

use super::handle::{WindowHandle, WindowNumber};
use super::host::WindowHost;

/// A stable string key addressing a window role, e.g. `"settings"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WindowIdentifier(String);

impl WindowIdentifier {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowIdentifier {
    fn from(identifier: &str) -> Self {
        Self(identifier.to_owned())
    }
}

impl From<String> for WindowIdentifier {
    fn from(identifier: String) -> Self {
        Self(identifier)
    }
}

impl Borrow<str> for WindowIdentifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a window may be resized by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resizability {
    /// Platform default.
    #[default]
    Automatic,
    /// The window follows the size of its content.
    ContentSize,
    /// The content's minimum size bounds the window; larger is allowed.
    ContentMinSize,
}

/// Window chrome style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowStyle {
    /// Platform default title bar.
    #[default]
    Automatic,
    /// A standard title bar.
    TitleBar,
    /// The title bar is hidden; content extends to the top edge.
    HiddenTitleBar,
}

/// Broad category of a window role, deciding its default presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowClass {
    /// A regular application window.
    #[default]
    Standard,
    /// A small utility window: content-sized with a hidden title bar.
    Utility,
}

impl WindowClass {
    pub fn default_resizability(&self) -> Resizability {
        match self {
            WindowClass::Standard => Resizability::Automatic,
            WindowClass::Utility => Resizability::ContentSize,
        }
    }

    pub fn default_style(&self) -> WindowStyle {
        match self {
            WindowClass::Standard => WindowStyle::Automatic,
            WindowClass::Utility => WindowStyle::HiddenTitleBar,
        }
    }
}

/// A window role of which the application may have only one live instance.
pub trait IdentifiableWindow {
    /// The logical identifier of this role. Must be unique per application.
    const IDENTIFIER: &'static str;

    /// Display title.
    fn title(&self) -> String;

    fn class(&self) -> WindowClass {
        WindowClass::Standard
    }

    fn resizability(&self) -> Resizability {
        self.class().default_resizability()
    }

    fn style(&self) -> WindowStyle {
        self.class().default_style()
    }

    /// Onboarding windows close every other window when they open.
    fn is_onboarding(&self) -> bool {
        false
    }

    /// The identifier as a [`WindowIdentifier`].
    fn identifier() -> WindowIdentifier {
        WindowIdentifier::from(Self::IDENTIFIER)
    }

    /// Build the registration record for this role.
    fn descriptor(&self) -> WindowDescriptor {
        WindowDescriptor::new(Self::IDENTIFIER, self.title())
            .with_resizability(self.resizability())
            .with_style(self.style())
            .with_onboarding(self.is_onboarding())
    }
}

/// The registration record of one window role.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowDescriptor {
    identifier: WindowIdentifier,
    title: String,
    resizability: Resizability,
    style: WindowStyle,
    onboarding: bool,
}

impl WindowDescriptor {
    pub fn new(identifier: impl Into<WindowIdentifier>, title: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            resizability: Resizability::default(),
            style: WindowStyle::default(),
            onboarding: false,
        }
    }

    /// A descriptor with utility-window defaults.
    pub fn utility(identifier: impl Into<WindowIdentifier>, title: impl Into<String>) -> Self {
        Self::new(identifier, title)
            .with_resizability(WindowClass::Utility.default_resizability())
            .with_style(WindowClass::Utility.default_style())
    }

    pub fn with_resizability(mut self, resizability: Resizability) -> Self {
        self.resizability = resizability;
        self
    }

    pub fn with_style(mut self, style: WindowStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_onboarding(mut self, onboarding: bool) -> Self {
        self.onboarding = onboarding;
        self
    }

    pub fn identifier(&self) -> &WindowIdentifier {
        &self.identifier
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn resizability(&self) -> Resizability {
        self.resizability
    }

    pub fn style(&self) -> WindowStyle {
        self.style
    }

    pub fn is_onboarding(&self) -> bool {
        self.onboarding
    }
}

/// Errors raised while declaring window roles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("window identifier `{0}` is already registered")]
    DuplicateIdentifier(WindowIdentifier),
    #[error("window identifier must not be empty")]
    EmptyIdentifier,
    #[error("window `{0}` must declare a display title")]
    EmptyTitle(WindowIdentifier),
    #[error("window identifier `{0}` is not registered")]
    UnknownIdentifier(WindowIdentifier),
}

/// Registry of the window roles an application declares.
///
/// The registry only records declarations. Live windows always come from the
/// host; see [`resolve`](Self::resolve) and [`resolve_number`].
#[derive(Debug, Default)]
pub struct WindowRegistry {
    descriptors: BTreeMap<WindowIdentifier, WindowDescriptor>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a window role.
    pub fn register<W: IdentifiableWindow>(
        &mut self,
        window: &W,
    ) -> Result<&WindowDescriptor, RegistryError> {
        self.register_descriptor(window.descriptor())
    }

    /// Declare a window role from an explicit descriptor.
    pub fn register_descriptor(
        &mut self,
        descriptor: WindowDescriptor,
    ) -> Result<&WindowDescriptor, RegistryError> {
        let identifier = descriptor.identifier().clone();
        if identifier.as_str().trim().is_empty() {
            return Err(RegistryError::EmptyIdentifier);
        }
        if descriptor.title().trim().is_empty() {
            return Err(RegistryError::EmptyTitle(identifier));
        }
        if self.descriptors.contains_key(&identifier) {
            return Err(RegistryError::DuplicateIdentifier(identifier));
        }

        tracing::debug!(
            target: targets::REGISTRY,
            identifier = %identifier,
            title = descriptor.title(),
            "window role registered"
        );
        Ok(self.descriptors.entry(identifier).or_insert(descriptor))
    }

    pub fn descriptor(&self, identifier: &WindowIdentifier) -> Option<&WindowDescriptor> {
        self.descriptors.get(identifier)
    }

    pub fn contains(&self, identifier: &WindowIdentifier) -> bool {
        self.descriptors.contains_key(identifier)
    }

    /// All registered identifiers, in sorted order.
    pub fn identifiers(&self) -> impl Iterator<Item = &WindowIdentifier> {
        self.descriptors.keys()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// The live window currently bound to `identifier`, if any.
    pub fn resolve(
        &self,
        host: &dyn WindowHost,
        identifier: &WindowIdentifier,
    ) -> Option<WindowHandle> {
        resolve_identifier(host, identifier)
    }

    /// The host number to use when re-resolving `handle` later.
    pub fn number_of(handle: &WindowHandle) -> WindowNumber {
        handle.number()
    }
}

/// Find the live window opened for `identifier`.
///
/// A window that is closing has released its identifier and is skipped, so a
/// replacement opened while "will close" is delivered resolves instead.
pub fn resolve_identifier(
    host: &dyn WindowHost,
    identifier: &WindowIdentifier,
) -> Option<WindowHandle> {
    let found = host
        .windows()
        .into_iter()
        .find(|w| !w.is_closing() && w.identifier() == Some(identifier));
    if found.is_none() {
        tracing::trace!(target: targets::REGISTRY, identifier = %identifier, "no live window for identifier");
    }
    found
}

/// Re-resolve a window by its host number.
pub fn resolve_number(host: &dyn WindowHost, number: WindowNumber) -> Option<WindowHandle> {
    let found = host.window(number);
    if found.is_none() {
        tracing::trace!(target: targets::REGISTRY, window = %number, "window is no longer live");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Library;

    impl IdentifiableWindow for Library {
        const IDENTIFIER: &'static str = "main-library";

        fn title(&self) -> String {
            "Library".into()
        }
    }

    struct Onboarding;

    impl IdentifiableWindow for Onboarding {
        const IDENTIFIER: &'static str = "onboarding";

        fn title(&self) -> String {
            "Welcome".into()
        }

        fn class(&self) -> WindowClass {
            WindowClass::Utility
        }

        fn is_onboarding(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_descriptor_defaults() {
        let library = Library.descriptor();
        assert_eq!(library.identifier().as_str(), "main-library");
        assert_eq!(library.title(), "Library");
        assert_eq!(library.resizability(), Resizability::Automatic);
        assert_eq!(library.style(), WindowStyle::Automatic);
        assert!(!library.is_onboarding());

        let onboarding = Onboarding.descriptor();
        assert_eq!(onboarding.resizability(), Resizability::ContentSize);
        assert_eq!(onboarding.style(), WindowStyle::HiddenTitleBar);
        assert!(onboarding.is_onboarding());
        assert_eq!(Onboarding::identifier(), WindowIdentifier::from("onboarding"));
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = WindowRegistry::new();
        registry.register(&Library).unwrap();

        let err = registry.register(&Library).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateIdentifier("main-library".into()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_requires_identifier_and_title() {
        let mut registry = WindowRegistry::new();

        let err = registry
            .register_descriptor(WindowDescriptor::new("  ", "Title"))
            .unwrap_err();
        assert_eq!(err, RegistryError::EmptyIdentifier);

        let err = registry
            .register_descriptor(WindowDescriptor::new("about", ""))
            .unwrap_err();
        assert_eq!(err, RegistryError::EmptyTitle("about".into()));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_identifiers_sorted() {
        let mut registry = WindowRegistry::new();
        registry.register(&Onboarding).unwrap();
        registry.register(&Library).unwrap();
        registry
            .register_descriptor(WindowDescriptor::utility("about", "About"))
            .unwrap();

        let ids: Vec<&str> = registry.identifiers().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["about", "main-library", "onboarding"]);
    }

    #[test]
    fn test_resolve_round_trip() {
        use crate::window::{HeadlessHost, WindowKind};

        let host = HeadlessHost::new();
        let mut registry = WindowRegistry::new();
        registry.register(&Library).unwrap();
        assert!(registry.resolve(&host, &Library::identifier()).is_none());

        let number = host.add_window(WindowKind::Normal, Some(Library::identifier()));
        let handle = registry.resolve(&host, &Library::identifier()).unwrap();
        assert_eq!(WindowRegistry::number_of(&handle), number);
        assert_eq!(resolve_number(&host, number).map(|w| w.number()), Some(number));

        host.close_window(number);
        assert!(resolve_number(&host, number).is_none());
        assert!(resolve_identifier(&host, &Library::identifier()).is_none());
    }

    #[test]
    fn test_resolve_skips_closing_window() {
        use std::sync::Arc;

        use parking_lot::Mutex;

        use crate::window::HeadlessHost;

        let host = Arc::new(HeadlessHost::new());
        let first = host.open_window(&Library::identifier()).unwrap();

        // Reopen the role while the first window is still closing, then look
        // it up from a later slot.
        let weak = Arc::downgrade(&host);
        host.events().will_close().connect(move |_| {
            if let Some(host) = weak.upgrade() {
                host.open_window(&Library::identifier());
            }
        });
        let seen = Arc::new(Mutex::new(None));
        let seen_clone = seen.clone();
        let weak = Arc::downgrade(&host);
        host.events().will_close().connect(move |closing| {
            assert!(closing.is_closing());
            if let Some(host) = weak.upgrade() {
                *seen_clone.lock() = resolve_identifier(&*host, &Library::identifier()).map(|w| w.number());
            }
        });

        host.close_window(first);

        let resolved = seen.lock().expect("replacement resolved during close");
        assert_ne!(resolved, first);
        assert_eq!(
            resolve_identifier(&*host, &Library::identifier()).map(|w| w.number()),
            Some(resolved)
        );
    }

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::UnknownIdentifier("help".into());
        assert_eq!(err.to_string(), "window identifier `help` is not registered");
    }
}
