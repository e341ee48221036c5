//! Core systems for Identifiable Window.
//!
//! This crate provides the building blocks the window lifecycle policies sit
//! on:
//!
//! - **Signal/Slot System**: observer registration for host window events
//! - **Scheduler**: cancellable one-shot tasks for debounced window checks
//! - **Logging**: tracing targets and spans shared by every policy
//!
//! # Signal/Slot Example
//!
//! ```
//! use identifiable_window_core::Signal;
//!
//! let will_close = Signal::<u64>::new();
//!
//! let conn_id = will_close.connect(|window| {
//!     println!("window {} is closing", window);
//! });
//!
//! will_close.emit(3);
//! will_close.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
mod scheduler;
pub mod signal;

pub use error::{LifecycleError, Result, SchedulerError};
pub use logging::EvaluationSpan;
pub use scheduler::{ScheduledTaskId, SharedTaskScheduler, TaskScheduler};
pub use signal::{ConnectionId, Signal};
