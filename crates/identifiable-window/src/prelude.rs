//! Prelude module for Identifiable Window.
//!
//! ```ignore
//! use identifiable_window::prelude::*;
//! ```

// ============================================================================
// Runtime
// ============================================================================

pub use crate::{ConnectionId, LifecycleError, Signal};

// ============================================================================
// Identity
// ============================================================================

pub use crate::window::{
    IdentifiableWindow, WindowClass, WindowDescriptor, WindowIdentifier, WindowKind,
    WindowNumber, WindowRegistry,
};

// ============================================================================
// Hosts
// ============================================================================

pub use crate::window::{CloseOutcome, HeadlessHost, WindowHandle, WindowHost};

// ============================================================================
// Policies
// ============================================================================

pub use crate::window::{
    close_all_but_main, LifecycleConfig, ShowWindowAction, WindowCoordinator,
};
