//! Window identity and lifecycle policies.
//!
//! # Window roles
//!
//! A window role is declared once, with a stable identifier, and the
//! application keeps at most one live window per role:
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
//! assert!(registry.contains(&Settings::identifier()));
//! ```
//!
//! # Policies
//!
//! Policies observe a [`WindowHost`] and issue polite requests against it:
//!
//! - [`ClosesWhenNoLongerMain`] closes an auxiliary window once another,
//!   non-exempt window becomes main.
//! - [`OpensDefaultOnClose`] opens a default window when the last visible
//!   window closes.
//! - [`close_all_but_main`] closes everything but the main window.
//!
//! They are normally attached through a [`WindowCoordinator`], which owns the
//! subscriptions and the debounce timer.

mod close_cascade;
mod coordinator;
#[cfg(feature = "winit")]
mod event_router;
mod exclusion;
mod focus_policy;
mod handle;
mod headless_host;
mod host;
mod identity;
mod window_config;
mod window_set_debug;
mod window_type;

pub use close_cascade::OpensDefaultOnClose;
pub use coordinator::{CascadePolicyHandle, FocusPolicyHandle, ShowWindowAction, WindowCoordinator};
#[cfg(feature = "winit")]
pub use event_router::route_window_event;
pub use exclusion::close_all_but_main;
pub use focus_policy::{ClosesWhenNoLongerMain, FocusPolicyState};
pub use handle::{WindowHandle, WindowNumber};
pub use headless_host::HeadlessHost;
pub use host::{CloseOutcome, WindowEvents, WindowHost};
pub use identity::{
    resolve_identifier, resolve_number, IdentifiableWindow, RegistryError, Resizability,
    WindowClass, WindowDescriptor, WindowIdentifier, WindowRegistry, WindowStyle,
};
pub use window_config::{LifecycleConfig, DEFAULT_STARTUP_GRACE_PERIOD};
pub use window_set_debug::{ListStyle, WindowSetDebug};
pub use window_type::WindowKind;
