//! # Services Module
//!
//! This module provides the [Services] struct, which builds every invoker of
//! the item service from a single [ServiceConfig].
//!
//! ## Overview
//!
//! One [BlockingService] is shared, behind an [Arc], by the suspend-style,
//! stream-style and reactive-style invokers. The configuration decides the
//! latency, the `sync` cadence and whether the reactive invoker exists at
//! all. A default implementation is provided for easy instantiation with the
//! stock delays.
use std::sync::Arc;

use crate::{
    config::ServiceConfig,
    delayed::DelayedService,
    reactive::ReactiveService,
    service::BlockingService,
    stream::StreamService,
};

#[derive(Debug, Clone)]
/// The set of invokers built around one shared core service.
pub struct Services {
    /// configuration every invoker was built from
    config: ServiceConfig,
    /// the core service, called synchronously
    blocking: Arc<BlockingService>,
    /// sleeps before delegating, cancellable while waiting
    delayed: DelayedService,
    /// lazy single-shot streams plus the `sync` feed
    stream: StreamService,
    /// push-based variant, only present when enabled in the configuration
    reactive: Option<ReactiveService>,
}

impl Default for Services {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}

impl Services {
    /// Creates a new instance of the `Services` struct around a fresh
    /// [BlockingService].
    ///
    /// # Arguments
    ///
    /// - `config`: latency, `sync` cadence and the reactive switch.
    ///
    /// # Returns
    ///
    /// Returns a new instance whose invokers all delegate to the same core
    /// service. [Services::reactive] is `None` unless `config.reactive` is set.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_core(BlockingService::new(), config)
    }

    /// Same as [Services::new], delegating to the given core service.
    pub fn with_core(core: BlockingService, config: ServiceConfig) -> Self {
        let blocking = Arc::new(core);
        let delayed = DelayedService::from_shared(Arc::clone(&blocking), config.delay);
        let stream = StreamService::from_shared(Arc::clone(&blocking), &config);
        let reactive = config
            .reactive
            .then(|| ReactiveService::from_shared(Arc::clone(&blocking), &config));
        Self {
            config,
            blocking,
            delayed,
            stream,
            reactive,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn blocking(&self) -> &BlockingService {
        &self.blocking
    }

    pub fn delayed(&self) -> &DelayedService {
        &self.delayed
    }

    pub fn stream(&self) -> &StreamService {
        &self.stream
    }

    pub fn reactive(&self) -> Option<&ReactiveService> {
        self.reactive.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reactive_invoker_follows_configuration() {
        let enabled = Services::default();
        let disabled = Services::new(ServiceConfig::builder().reactive(false).build());

        assert!(enabled.reactive().is_some());
        assert!(disabled.reactive().is_none());
    }

    #[test]
    fn delayed_invoker_uses_configured_delay() {
        let config = ServiceConfig::builder()
            .delay(std::time::Duration::from_millis(42))
            .build();

        let services = Services::new(config.clone());

        assert_eq!(services.delayed().delay(), config.delay);
        assert_eq!(services.config(), &config);
    }
}
