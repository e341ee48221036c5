//! Application-facing attachment points for the lifecycle policies.
//!
//! The `WindowCoordinator` owns the injected host, the window role registry,
//! and the scheduler that drives debounced checks. Policies are attached
//! through it and detached by dropping the handle it returns.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::{Duration, Instant};
//! use identifiable_window::window::{
//!     HeadlessHost, LifecycleConfig, WindowCoordinator, WindowDescriptor, WindowHost,
//! };
//!
//! let host = Arc::new(HeadlessHost::new());
//! let coordinator = WindowCoordinator::new(host.clone(), LifecycleConfig::default());
//! coordinator.register_descriptor(WindowDescriptor::new("main-library", "Library")).unwrap();
//! coordinator.register_descriptor(WindowDescriptor::utility("about", "About")).unwrap();
//!
//! // Reopen the library whenever the last visible window closes.
//! let _cascade = coordinator.opens_default_window_on_close("main-library");
//!
//! // The about window closes itself once it stops being main.
//! let about = coordinator.open(&"about".into()).unwrap().unwrap();
//! let focus = coordinator.closes_window_when_no_longer_main();
//! focus.bind(about);
//!
//! coordinator.process_timers_at(Instant::now() + Duration::from_millis(250));
//! assert!(host.window(about).is_some());
//! ```

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{RwLock, RwLockReadGuard};

use identifiable_window_core::logging::targets;
use identifiable_window_core::{ConnectionId, ScheduledTaskId, SharedTaskScheduler};

use super::close_cascade::OpensDefaultOnClose;
use super::exclusion::close_all_but_main;
use super::focus_policy::{ClosesWhenNoLongerMain, FocusPolicyState};
use super::handle::{WindowHandle, WindowNumber};
use super::host::WindowHost;
use super::identity::{
    IdentifiableWindow, RegistryError, WindowDescriptor, WindowIdentifier, WindowRegistry,
};
use super::window_config::LifecycleConfig;

/// Coordinates lifecycle policies over one host.
pub struct WindowCoordinator {
    host: Arc<dyn WindowHost>,
    registry: RwLock<WindowRegistry>,
    scheduler: Arc<SharedTaskScheduler>,
    config: LifecycleConfig,
}

impl WindowCoordinator {
    pub fn new(host: Arc<dyn WindowHost>, config: LifecycleConfig) -> Self {
        Self {
            host,
            registry: RwLock::new(WindowRegistry::new()),
            scheduler: Arc::new(SharedTaskScheduler::new()),
            config,
        }
    }

    pub fn host(&self) -> &Arc<dyn WindowHost> {
        &self.host
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Read access to the declared window roles.
    pub fn registry(&self) -> RwLockReadGuard<'_, WindowRegistry> {
        self.registry.read()
    }

    /// Declare a window role.
    pub fn register<W: IdentifiableWindow>(&self, window: &W) -> Result<(), RegistryError> {
        self.registry.write().register(window).map(|_| ())
    }

    /// Declare a window role from an explicit descriptor.
    pub fn register_descriptor(&self, descriptor: WindowDescriptor) -> Result<(), RegistryError> {
        self.registry.write().register_descriptor(descriptor).map(|_| ())
    }

    /// The live window for a declared role, if one is open.
    pub fn resolve(&self, identifier: &WindowIdentifier) -> Option<WindowHandle> {
        self.registry.read().resolve(self.host.as_ref(), identifier)
    }

    /// Attach a focus-change policy.
    ///
    /// The returned handle must be bound to its window with
    /// [`FocusPolicyHandle::bind`] once the window is known. The startup check
    /// is scheduled immediately, relative to attachment.
    pub fn closes_window_when_no_longer_main(&self) -> FocusPolicyHandle {
        let policy = Arc::new(ClosesWhenNoLongerMain::new(self.host.clone()));

        let weak = Arc::downgrade(&policy);
        let connection = self.host.events().became_main().connect(move |activated| {
            if let Some(policy) = weak.upgrade() {
                policy.handle_became_main(activated);
            }
        });

        let startup_task = self.config.startup_check_enabled().then(|| {
            let weak = Arc::downgrade(&policy);
            self.scheduler
                .schedule_once(self.config.startup_grace_period(), move || {
                    if let Some(policy) = weak.upgrade() {
                        policy.run_startup_check();
                    }
                })
        });

        tracing::trace!(target: targets::FOCUS, "focus policy attached");
        FocusPolicyHandle {
            policy,
            host: self.host.clone(),
            scheduler: self.scheduler.clone(),
            connection,
            startup_task,
        }
    }

    /// Attach a close-cascade policy that opens `identifier` whenever the
    /// last visible window closes.
    pub fn opens_default_window_on_close(
        &self,
        identifier: impl Into<WindowIdentifier>,
    ) -> CascadePolicyHandle {
        let identifier = identifier.into();
        if !self.registry.read().contains(&identifier) {
            tracing::debug!(
                target: targets::CASCADE,
                identifier = %identifier,
                "default window identifier is not registered"
            );
        }

        let policy = Arc::new(OpensDefaultOnClose::new(identifier, self.host.clone()));
        let slot_policy = policy.clone();
        let connection = self.host.events().will_close().connect(move |closing| {
            slot_policy.handle_will_close(closing);
        });

        CascadePolicyHandle {
            policy,
            host: self.host.clone(),
            connection,
        }
    }

    /// Close every window except the main one.
    pub fn close_all_but_main(&self) -> usize {
        close_all_but_main(self.host.as_ref())
    }

    /// Open the window for a declared role.
    ///
    /// Onboarding roles close every other window once they are open.
    pub fn open(
        &self,
        identifier: &WindowIdentifier,
    ) -> Result<Option<WindowNumber>, RegistryError> {
        let onboarding = self
            .registry
            .read()
            .descriptor(identifier)
            .map(WindowDescriptor::is_onboarding)
            .ok_or_else(|| RegistryError::UnknownIdentifier(identifier.clone()))?;

        let opened = self.host.open_window(identifier);
        if opened.is_some() && onboarding {
            tracing::debug!(target: targets::EXCLUSION, identifier = %identifier, "onboarding window opened");
            self.close_all_but_main();
        }
        Ok(opened)
    }

    /// Open the window for role `W`.
    pub fn open_window<W: IdentifiableWindow>(&self) -> Result<Option<WindowNumber>, RegistryError> {
        self.open(&W::identifier())
    }

    /// Run debounced checks that are due now.
    pub fn process_timers(&self) -> usize {
        self.scheduler.process_ready()
    }

    /// Run debounced checks that are due at `now`.
    pub fn process_timers_at(&self, now: Instant) -> usize {
        self.scheduler.process_ready_at(now)
    }

    /// How long the event loop may sleep before the next debounced check.
    pub fn time_until_next_timer(&self) -> Option<Duration> {
        self.scheduler.time_until_next()
    }
}

/// An attached focus-change policy.
///
/// Dropping the handle disconnects the policy from the host and cancels its
/// pending startup check.
pub struct FocusPolicyHandle {
    policy: Arc<ClosesWhenNoLongerMain>,
    host: Arc<dyn WindowHost>,
    scheduler: Arc<SharedTaskScheduler>,
    connection: ConnectionId,
    startup_task: Option<ScheduledTaskId>,
}

impl FocusPolicyHandle {
    /// Report the window this policy's content is hosted in. Only the first
    /// call has any effect.
    pub fn bind(&self, number: WindowNumber) -> bool {
        self.policy.bind(number)
    }

    pub fn state(&self) -> FocusPolicyState {
        self.policy.state()
    }

    pub fn tracked_window(&self) -> Option<WindowHandle> {
        self.policy.tracked_window()
    }

    /// Whether the startup check is still waiting to run.
    pub fn startup_check_pending(&self) -> bool {
        self.startup_task
            .is_some_and(|task| self.scheduler.is_active(task))
    }
}

impl Drop for FocusPolicyHandle {
    fn drop(&mut self) {
        self.host.events().became_main().disconnect(self.connection);
        if let Some(task) = self.startup_task.take() {
            // Already ran if this fails.
            let _ = self.scheduler.cancel(task);
        }
        tracing::trace!(target: targets::FOCUS, state = ?self.policy.state(), "focus policy detached");
    }
}

/// An attached close-cascade policy. Dropping it deregisters the policy.
pub struct CascadePolicyHandle {
    policy: Arc<OpensDefaultOnClose>,
    host: Arc<dyn WindowHost>,
    connection: ConnectionId,
}

impl CascadePolicyHandle {
    pub fn target(&self) -> &WindowIdentifier {
        self.policy.target()
    }
}

impl Drop for CascadePolicyHandle {
    fn drop(&mut self) {
        self.host.events().will_close().disconnect(self.connection);
    }
}

/// A titled action that opens a declared window role when triggered.
///
/// This is the behaviour behind a "show window" button; rendering the button
/// is left to the UI layer, which can read [`title`](Self::title) and
/// [`grows_to_fit`](Self::grows_to_fit) for its label.
pub struct ShowWindowAction<W: IdentifiableWindow> {
    title: String,
    grows_to_fit: bool,
    _window: PhantomData<fn() -> W>,
}

impl<W: IdentifiableWindow> ShowWindowAction<W> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            grows_to_fit: false,
            _window: PhantomData,
        }
    }

    /// Let the control stretch to the available width.
    pub fn with_grows_to_fit(mut self, grows_to_fit: bool) -> Self {
        self.grows_to_fit = grows_to_fit;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn grows_to_fit(&self) -> bool {
        self.grows_to_fit
    }

    /// The role this action opens.
    pub fn identifier(&self) -> WindowIdentifier {
        W::identifier()
    }

    /// Open (or surface) the window.
    pub fn trigger(
        &self,
        coordinator: &WindowCoordinator,
    ) -> Result<Option<WindowNumber>, RegistryError> {
        coordinator.open_window::<W>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{HeadlessHost, WindowKind};

    struct Library;

    impl IdentifiableWindow for Library {
        const IDENTIFIER: &'static str = "main-library";

        fn title(&self) -> String {
            "Library".into()
        }
    }

    fn setup() -> (Arc<HeadlessHost>, WindowCoordinator) {
        let host = Arc::new(HeadlessHost::new());
        let coordinator = WindowCoordinator::new(host.clone(), LifecycleConfig::default());
        (host, coordinator)
    }

    #[test]
    fn test_open_unknown_identifier() {
        let (host, coordinator) = setup();
        let err = coordinator.open(&"missing".into()).unwrap_err();
        assert_eq!(err, RegistryError::UnknownIdentifier("missing".into()));
        assert!(host.open_requests().is_empty());
    }

    #[test]
    fn test_show_window_action() {
        let (host, coordinator) = setup();
        coordinator.register(&Library).unwrap();

        let action = ShowWindowAction::<Library>::new("Show Library").with_grows_to_fit(true);
        assert_eq!(action.title(), "Show Library");
        assert!(action.grows_to_fit());
        assert_eq!(action.identifier().as_str(), "main-library");

        let first = action.trigger(&coordinator).unwrap().unwrap();
        let second = action.trigger(&coordinator).unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(host.window_count(), 1);
        assert_eq!(coordinator.resolve(&"main-library".into()).map(|w| w.number()), Some(first));
    }

    #[test]
    fn test_focus_handle_drop_detaches() {
        let (host, coordinator) = setup();
        let tracked = host.add_window(WindowKind::Normal, None);
        let other = host.add_window(WindowKind::Normal, None);

        let handle = coordinator.closes_window_when_no_longer_main();
        handle.bind(tracked);
        assert!(handle.startup_check_pending());
        assert_eq!(host.events().became_main().connection_count(), 1);

        drop(handle);
        assert_eq!(host.events().became_main().connection_count(), 0);
        assert!(coordinator.time_until_next_timer().is_none());

        host.activate(other);
        coordinator.process_timers_at(Instant::now() + Duration::from_secs(1));
        assert!(host.window(tracked).is_some());
    }

    #[test]
    fn test_startup_check_disabled() {
        let host = Arc::new(HeadlessHost::new());
        let coordinator = WindowCoordinator::new(
            host.clone(),
            LifecycleConfig::new().with_startup_check(false),
        );
        let tracked = host.add_window(WindowKind::Normal, None);
        host.add_window(WindowKind::Normal, None);

        let handle = coordinator.closes_window_when_no_longer_main();
        handle.bind(tracked);
        assert!(!handle.startup_check_pending());
        assert_eq!(coordinator.process_timers_at(Instant::now() + Duration::from_secs(1)), 0);
        assert!(host.window(tracked).is_some());
    }

    #[test]
    fn test_cascade_handle_drop_detaches() {
        let (host, coordinator) = setup();
        let only = host.add_window(WindowKind::Normal, None);

        let handle = coordinator.opens_default_window_on_close("main-library");
        assert_eq!(handle.target().as_str(), "main-library");
        drop(handle);

        host.close_window(only);
        assert!(host.open_requests().is_empty());
    }
}
