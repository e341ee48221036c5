//! Identifiable Window - lifecycle coordination for multi-window desktop
//! applications.
//!
//! This is the main crate; it re-exports the signal and scheduling runtime
//! from `identifiable-window-core`.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use identifiable_window::prelude::*;
//!
//! let host = Arc::new(HeadlessHost::new());
//! let coordinator = WindowCoordinator::new(host.clone(), LifecycleConfig::default());
//! coordinator
//!     .register_descriptor(WindowDescriptor::new("main-library", "Library"))
//!     .unwrap();
//!
//! let _cascade = coordinator.opens_default_window_on_close("main-library");
//! let library = coordinator.open(&"main-library".into()).unwrap().unwrap();
//!
//! // Closing the last window brings the library straight back.
//! host.close_window(library);
//! assert!(coordinator.resolve(&"main-library".into()).is_some());
//! ```

pub use identifiable_window_core::*;

pub mod prelude;
pub mod window;
