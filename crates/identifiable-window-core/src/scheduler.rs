//! One-shot task scheduler for debounced window checks.
//!
//! Lifecycle policies occasionally need to look at the window set again after
//! the host has had time to settle (a freshly created window is not always
//! reported as visible or main straight away). The scheduler holds those
//! deferred checks until the host's event loop drives it.
//!
//! The scheduler never spawns threads. The owning event loop calls
//! [`SharedTaskScheduler::process_ready`] from its single execution context,
//! and uses [`SharedTaskScheduler::time_until_next`] to decide how long it may
//! sleep.
//!
//! # Example
//!
//! ```
//! use identifiable_window_core::SharedTaskScheduler;
//! use std::time::{Duration, Instant};
//!
//! let scheduler = SharedTaskScheduler::new();
//! let id = scheduler.schedule_once(Duration::from_millis(200), || {
//!     println!("window set has settled");
//! });
//!
//! assert!(scheduler.is_active(id));
//! scheduler.process_ready_at(Instant::now() + Duration::from_millis(250));
//! assert!(!scheduler.is_active(id));
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, SchedulerError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a scheduled task.
    pub struct ScheduledTaskId;
}

/// A boxed task closure.
type BoxedScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// Internal scheduled task data.
struct ScheduledTaskData {
    /// When this task should execute.
    next_run: Instant,
    /// The task closure to execute.
    task: BoxedScheduledTask,
}

/// An entry in the scheduler queue (min-heap by execution time).
#[derive(Debug, Clone, Copy)]
struct SchedulerQueueEntry {
    id: ScheduledTaskId,
    run_time: Instant,
}

impl PartialEq for SchedulerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.run_time == other.run_time
    }
}

impl Eq for SchedulerQueueEntry {}

impl PartialOrd for SchedulerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SchedulerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.run_time.cmp(&self.run_time)
    }
}

/// Queue of one-shot tasks ordered by their execution time.
///
/// This type is not synchronized; see [`SharedTaskScheduler`] for the
/// version the coordinator shares with its policies.
pub struct TaskScheduler {
    /// All pending tasks.
    tasks: SlotMap<ScheduledTaskId, ScheduledTaskData>,
    /// Priority queue of pending task executions (min-heap by run time).
    queue: BinaryHeap<SchedulerQueueEntry>,
}

impl TaskScheduler {
    /// Create a new task scheduler.
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Schedule a task to execute after the specified delay.
    pub fn schedule_once<F>(&mut self, delay: Duration, task: F) -> ScheduledTaskId
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule_at(Instant::now() + delay, task)
    }

    /// Schedule a task to execute at a specific instant.
    ///
    /// If the instant is in the past, the task runs on the next processing cycle.
    pub fn schedule_at<F>(&mut self, instant: Instant, task: F) -> ScheduledTaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = self.tasks.insert(ScheduledTaskData {
            next_run: instant,
            task: Box::new(task),
        });
        self.queue.push(SchedulerQueueEntry {
            id,
            run_time: instant,
        });
        tracing::trace!(target: targets::SCHEDULER, ?id, "task scheduled");

        id
    }

    /// Cancel and remove a scheduled task.
    pub fn cancel(&mut self, id: ScheduledTaskId) -> Result<()> {
        if self.tasks.remove(id).is_some() {
            tracing::trace!(target: targets::SCHEDULER, ?id, "task cancelled");
            Ok(())
        } else {
            Err(SchedulerError::InvalidTaskId.into())
        }
    }

    /// Check if a task is still pending.
    pub fn is_active(&self, id: ScheduledTaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Get the duration until the next task should execute, if any.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.prune_stale();
        self.queue
            .peek()
            .map(|entry| entry.run_time.saturating_duration_since(Instant::now()))
    }

    /// Remove and return every task due at `now`, earliest first.
    ///
    /// The caller runs them; the scheduler no longer tracks them.
    pub fn take_ready(&mut self, now: Instant) -> Vec<(ScheduledTaskId, BoxedScheduledTask)> {
        let mut ready = Vec::new();

        while let Some(entry) = self.queue.peek() {
            if entry.run_time > now {
                break;
            }
            let entry = *entry;
            self.queue.pop();

            let is_current = self
                .tasks
                .get(entry.id)
                .is_some_and(|task| task.next_run == entry.run_time);
            if !is_current {
                continue;
            }

            if let Some(data) = self.tasks.remove(entry.id) {
                ready.push((entry.id, data.task));
            }
        }

        ready
    }

    /// Get the number of pending tasks.
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    /// Drop queue entries whose task was cancelled.
    fn prune_stale(&mut self) {
        while let Some(entry) = self.queue.peek() {
            let is_current = self
                .tasks
                .get(entry.id)
                .is_some_and(|task| task.next_run == entry.run_time);
            if is_current {
                break;
            }
            self.queue.pop();
        }
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A thread-safe wrapper around `TaskScheduler`.
///
/// Tasks run after the internal lock is released, so a task may schedule or
/// cancel other tasks (or trigger window events that do).
pub struct SharedTaskScheduler {
    inner: Mutex<TaskScheduler>,
}

impl SharedTaskScheduler {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TaskScheduler::new()),
        }
    }

    pub fn schedule_once<F>(&self, delay: Duration, task: F) -> ScheduledTaskId
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.lock().schedule_once(delay, task)
    }

    pub fn cancel(&self, id: ScheduledTaskId) -> Result<()> {
        self.inner.lock().cancel(id)
    }

    pub fn is_active(&self, id: ScheduledTaskId) -> bool {
        self.inner.lock().is_active(id)
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.inner.lock().time_until_next()
    }

    /// Run every task that is due now.
    pub fn process_ready(&self) -> usize {
        self.process_ready_at(Instant::now())
    }

    /// Run every task due at `now`.
    ///
    /// Returns the number of tasks executed.
    #[tracing::instrument(
        skip(self),
        target = "identifiable_window_core::scheduler",
        level = "trace"
    )]
    pub fn process_ready_at(&self, now: Instant) -> usize {
        let ready = self.inner.lock().take_ready(now);
        let count = ready.len();

        for (id, task) in ready {
            tracing::trace!(target: targets::SCHEDULER, ?id, "executing scheduled task");
            task();
        }

        count
    }
}

impl Default for SharedTaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(SharedTaskScheduler: Send, Sync);
