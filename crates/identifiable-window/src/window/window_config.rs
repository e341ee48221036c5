//! Lifecycle configuration.
//!
//! `LifecycleConfig` is a builder for the tunables shared by every policy a
//! [`WindowCoordinator`](super::WindowCoordinator) hands out.

use std::time::Duration;

/// Default delay before a freshly attached focus policy re-checks the
/// visible window set.
pub const DEFAULT_STARTUP_GRACE_PERIOD: Duration = Duration::from_millis(200);

/// Configuration for window lifecycle policies.
///
/// # Example
///
/// ```
/// use identifiable_window::window::LifecycleConfig;
/// use std::time::Duration;
///
/// let config = LifecycleConfig::new()
///     .with_startup_grace_period(Duration::from_millis(350));
///
/// assert_eq!(config.startup_grace_period(), Duration::from_millis(350));
/// assert!(config.startup_check_enabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LifecycleConfig {
    /// How long the host gets to settle its window hierarchy before the
    /// startup check runs.
    startup_grace_period: Duration,
    /// Whether focus policies schedule the startup check at all.
    startup_check: bool,
}

impl LifecycleConfig {
    /// Create a configuration with the default grace period and the startup
    /// check enabled.
    pub fn new() -> Self {
        Self {
            startup_grace_period: DEFAULT_STARTUP_GRACE_PERIOD,
            startup_check: true,
        }
    }

    pub fn with_startup_grace_period(mut self, grace_period: Duration) -> Self {
        self.startup_grace_period = grace_period;
        self
    }

    pub fn with_startup_check(mut self, enabled: bool) -> Self {
        self.startup_check = enabled;
        self
    }

    pub fn startup_grace_period(&self) -> Duration {
        self.startup_grace_period
    }

    pub fn startup_check_enabled(&self) -> bool {
        self.startup_check
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LifecycleConfig::default();
        assert_eq!(config.startup_grace_period(), Duration::from_millis(200));
        assert!(config.startup_check_enabled());
    }

    #[test]
    fn test_builder() {
        let config = LifecycleConfig::new()
            .with_startup_grace_period(Duration::from_secs(1))
            .with_startup_check(false);
        assert_eq!(config.startup_grace_period(), Duration::from_secs(1));
        assert!(!config.startup_check_enabled());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip_with_defaults() {
        let config: LifecycleConfig = serde_json::from_str(r#"{"startup_check": false}"#).unwrap();
        assert_eq!(config.startup_grace_period(), DEFAULT_STARTUP_GRACE_PERIOD);
        assert!(!config.startup_check_enabled());

        let json = serde_json::to_string(&config).unwrap();
        let back: LifecycleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
