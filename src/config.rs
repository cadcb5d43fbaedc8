//! Configuration for the delayed invokers.
use std::time::Duration;

/// Latency inserted before each delayed operation produces its result.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);
/// Interval between two consecutive `sync` emissions.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(1000);
/// Number of drafts a `sync` sequence emits before completing.
pub const DEFAULT_SYNC_STEPS: usize = 3;

/// Settings shared by every invoker built from one [crate::services::Services].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Simulated latency before each operation.
    pub delay: Duration,
    /// Pause between two `sync` emissions.
    pub refresh_interval: Duration,
    /// How many drafts `sync` emits.
    pub sync_steps: usize,
    /// Whether the reactive invoker is built.
    pub reactive: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            sync_steps: DEFAULT_SYNC_STEPS,
            reactive: true,
        }
    }
}

impl ServiceConfig {
    /// Create a new builder starting from the default values.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::new()
    }
}

/// Builder for [ServiceConfig].
#[derive(Debug, Clone, Default)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the latency applied before every operation.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use itempost::config::ServiceConfig;
    ///
    /// let config = ServiceConfig::builder()
    ///     .delay(Duration::from_millis(20))
    ///     .build();
    /// assert_eq!(config.delay, Duration::from_millis(20));
    /// ```
    pub fn delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    /// Set the pause between `sync` emissions.
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.config.refresh_interval = interval;
        self
    }

    /// Set how many drafts `sync` emits.
    ///
    /// # Example
    /// ```
    /// use itempost::config::ServiceConfig;
    ///
    /// let config = ServiceConfig::builder().sync_steps(5).build();
    /// assert_eq!(config.sync_steps, 5);
    /// ```
    pub fn sync_steps(mut self, steps: usize) -> Self {
        self.config.sync_steps = steps;
        self
    }

    /// Enable or disable the reactive invoker.
    pub fn reactive(mut self, enabled: bool) -> Self {
        self.config.reactive = enabled;
        self
    }

    pub fn build(self) -> ServiceConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let config = ServiceConfig::default();

        assert_eq!(config.delay, DEFAULT_DELAY);
        assert_eq!(config.refresh_interval, DEFAULT_REFRESH_INTERVAL);
        assert_eq!(config.sync_steps, DEFAULT_SYNC_STEPS);
        assert!(config.reactive);
    }

    #[test]
    fn builder_overrides_each_field() {
        let config = ServiceConfig::builder()
            .delay(Duration::from_millis(1))
            .refresh_interval(Duration::from_millis(2))
            .sync_steps(5)
            .reactive(false)
            .build();

        assert_eq!(
            config,
            ServiceConfig {
                delay: Duration::from_millis(1),
                refresh_interval: Duration::from_millis(2),
                sync_steps: 5,
                reactive: false,
            }
        );
    }
}
