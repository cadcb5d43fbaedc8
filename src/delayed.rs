//! # Delayed Module
//!
//! This module provides the [AsyncItemService] trait and [DelayedService],
//! the suspend-style invoker of the item service.
//!
//! ## Overview
//!
//! Every call first sleeps for the configured latency with
//! [tokio::time::sleep], then delegates to the wrapped [ItemService] and
//! returns its result unchanged. The sleep is the only suspension point.
//!
//! A call can be cancelled while it waits, either by dropping its future or
//! through the [CancellationToken] given to [DelayedService::with_cancellation].
//! In both cases the wrapped service is never reached.
use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    error::ServiceError,
    model::{Draft, Item},
    service::{BlockingService, ItemService},
};

/// Suspend-style capability interface of the item service.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AsyncItemService: Send + Sync {
    async fn create(&self, item: Item) -> Result<Draft, ServiceError>;
    async fn replace(&self, item: Item) -> Result<Item, ServiceError>;
    async fn remove(&self, item: Item) -> Result<(), ServiceError>;
}

#[derive(Debug)]
/// Wraps an [ItemService] behind a fixed simulated latency.
///
/// # Type Parameters
/// - `S`: the wrapped service, [BlockingService] unless a double is injected
pub struct DelayedService<S = BlockingService> {
    inner: Arc<S>,
    delay: Duration,
    /// cancels every pending and future call of this instance when triggered
    cancellation: Option<CancellationToken>,
}

impl<S> Clone for DelayedService<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            delay: self.delay,
            cancellation: self.cancellation.clone(),
        }
    }
}

impl<S> DelayedService<S>
where
    S: ItemService,
{
    pub fn new(inner: S, delay: Duration) -> Self {
        Self::from_shared(Arc::new(inner), delay)
    }

    /// Creates a delayed invoker around a service shared with other invokers.
    pub fn from_shared(inner: Arc<S>, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            cancellation: None,
        }
    }

    /// Makes every call race its delay against `token`.
    ///
    /// # Behavior
    ///
    /// Once `token` is cancelled, calls still waiting and calls started
    /// afterwards return [ServiceError::Cancelled] without reaching the
    /// wrapped service. A call whose delay already elapsed is not affected.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    async fn wait(&self, operation: &'static str) -> Result<(), ServiceError> {
        debug!(operation, delay_ms = self.delay.as_millis(), "delaying operation");
        match &self.cancellation {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(operation, "operation cancelled during delay");
                    Err(ServiceError::Cancelled)
                }
                _ = sleep(self.delay) => Ok(()),
            },
            None => {
                sleep(self.delay).await;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl<S> AsyncItemService for DelayedService<S>
where
    S: ItemService,
{
    async fn create(&self, item: Item) -> Result<Draft, ServiceError> {
        self.wait("create").await?;
        Ok(self.inner.create(&item))
    }

    async fn replace(&self, item: Item) -> Result<Item, ServiceError> {
        self.wait("replace").await?;
        self.inner.replace(&item)
    }

    async fn remove(&self, item: Item) -> Result<(), ServiceError> {
        self.wait("remove").await?;
        self.inner.remove(&item);
        Ok(())
    }
}
