//! Error types for Identifiable Window.
//!
//! Window lifecycle policies never fail: a missing window or a declined close
//! is a normal outcome. The errors here cover the plumbing underneath them,
//! where a caller hands back an identifier that no longer refers to anything.

use std::fmt;

/// The main error type for the core crate.
#[derive(Debug)]
pub enum LifecycleError {
    /// Scheduler-related error.
    Scheduler(SchedulerError),
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduler(err) => write!(f, "Scheduler error: {err}"),
        }
    }
}

impl std::error::Error for LifecycleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scheduler(err) => Some(err),
        }
    }
}

/// Scheduler-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// The task ID is invalid, already ran, or was cancelled.
    InvalidTaskId,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTaskId => write!(f, "Invalid, completed, or cancelled task ID"),
        }
    }
}

impl std::error::Error for SchedulerError {}

impl From<SchedulerError> for LifecycleError {
    fn from(err: SchedulerError) -> Self {
        Self::Scheduler(err)
    }
}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, LifecycleError>;
