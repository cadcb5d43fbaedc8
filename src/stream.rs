//! # Stream Module
//!
//! This module provides the [StreamItemService] trait, its implementation
//! [StreamService] and the [ServiceStreamExt] operators.
//!
//! ## Overview
//!
//! Every operation returns a lazy [ServiceStream]: nothing happens until the
//! stream is polled. When driven, a single-shot stream sleeps for the
//! configured latency, calls the wrapped [ItemService], emits exactly one
//! `Result` and completes. An `Err` item is always the last one.
//!
//! [StreamItemService::sync] models a polling feed. After the initial latency
//! it emits `sync_steps` drafts with identifiers `"0"`, `"1"`, ... and waits
//! one refresh interval after each of them, the last included, before it
//! completes.
//!
//! Streams are consumed by value and cannot be restarted. Dropping one
//! part-way through is equivalent to stopping consumption; no cleanup runs.
use std::{sync::Arc, time::Duration};

use async_stream::stream;
use futures::{stream::BoxStream, Stream, StreamExt};
use tokio::time::sleep;
use tracing::debug;

use crate::{
    config::ServiceConfig,
    error::ServiceError,
    model::{Draft, Item},
    service::{BlockingService, ItemService},
};

/// Lazy, finite stream of service results.
pub type ServiceStream<T> = BoxStream<'static, Result<T, ServiceError>>;

/// Stream-style capability interface of the item service.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait StreamItemService: Send + Sync {
    fn create(&self, item: Item) -> ServiceStream<Draft>;
    fn replace(&self, item: Item) -> ServiceStream<Item>;
    fn remove(&self, item: Item) -> ServiceStream<()>;
    /// Emits the configured number of drafts at the refresh interval.
    fn sync(&self) -> ServiceStream<Draft>;
}

#[derive(Debug)]
pub struct StreamService<S = BlockingService> {
    inner: Arc<S>,
    delay: Duration,
    refresh_interval: Duration,
    sync_steps: usize,
}

impl<S> Clone for StreamService<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            delay: self.delay,
            refresh_interval: self.refresh_interval,
            sync_steps: self.sync_steps,
        }
    }
}

impl<S> StreamService<S>
where
    S: ItemService + 'static,
{
    pub fn new(inner: S, config: &ServiceConfig) -> Self {
        Self::from_shared(Arc::new(inner), config)
    }

    /// Creates a stream invoker around a service shared with other invokers.
    ///
    /// # Arguments
    ///
    /// - `inner`: the service each stream delegates to once its delay elapsed.
    /// - `config`: supplies the delay, the `sync` refresh interval and the
    ///     number of `sync` steps.
    pub fn from_shared(inner: Arc<S>, config: &ServiceConfig) -> Self {
        Self {
            inner,
            delay: config.delay,
            refresh_interval: config.refresh_interval,
            sync_steps: config.sync_steps,
        }
    }

    fn delayed_once<T, F>(&self, operation: &'static str, call: F) -> ServiceStream<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    {
        let delay = self.delay;
        Box::pin(stream! {
            debug!(operation, delay_ms = delay.as_millis(), "delaying stream");
            sleep(delay).await;
            yield call();
        })
    }
}

impl<S> StreamItemService for StreamService<S>
where
    S: ItemService + 'static,
{
    fn create(&self, item: Item) -> ServiceStream<Draft> {
        let inner = Arc::clone(&self.inner);
        self.delayed_once("create", move || Ok(inner.create(&item)))
    }

    fn replace(&self, item: Item) -> ServiceStream<Item> {
        let inner = Arc::clone(&self.inner);
        self.delayed_once("replace", move || inner.replace(&item))
    }

    fn remove(&self, item: Item) -> ServiceStream<()> {
        let inner = Arc::clone(&self.inner);
        self.delayed_once("remove", move || {
            inner.remove(&item);
            Ok(())
        })
    }

    fn sync(&self) -> ServiceStream<Draft> {
        let delay = self.delay;
        let interval = self.refresh_interval;
        let steps = self.sync_steps;
        Box::pin(stream! {
            sleep(delay).await;
            for step in 0..steps {
                debug!(step, steps, "sync emitting");
                yield Ok::<_, ServiceError>(Draft::new(step.to_string()));
                sleep(interval).await;
            }
        })
    }
}

/// Operators for any stream of `Result<T, ServiceError>`.
pub trait ServiceStreamExt<T>: Stream<Item = Result<T, ServiceError>> + Sized {
    /// Calls `observer` once when the stream terminates.
    ///
    /// # Behavior
    ///
    /// - On failure `observer` receives `Some(&error)` before the error item
    ///   is yielded downstream.
    /// - On normal completion it receives `None` once the upstream is exhausted.
    /// - A consumer that stops polling early never triggers it.
    fn on_completion<F>(self, observer: F) -> ServiceStream<T>
    where
        Self: Send + 'static,
        T: Send + 'static,
        F: FnOnce(Option<&ServiceError>) + Send + 'static,
    {
        let upstream = self;
        Box::pin(stream! {
            let mut upstream = Box::pin(upstream);
            let mut observer = Some(observer);
            while let Some(item) = upstream.next().await {
                if let Err(error) = &item {
                    if let Some(observer) = observer.take() {
                        observer(Some(error));
                    }
                    yield item;
                    return;
                }
                yield item;
            }
            if let Some(observer) = observer.take() {
                observer(None);
            }
        })
    }

    /// Strips the `Result` wrapping, handing a terminal error to `handler`.
    ///
    /// The returned stream completes normally after the error was handled.
    fn catch_error<F>(self, handler: F) -> BoxStream<'static, T>
    where
        Self: Send + 'static,
        T: Send + 'static,
        F: FnOnce(ServiceError) + Send + 'static,
    {
        let upstream = self;
        Box::pin(stream! {
            let mut upstream = Box::pin(upstream);
            let mut handler = Some(handler);
            while let Some(item) = upstream.next().await {
                match item {
                    Ok(value) => yield value,
                    Err(error) => {
                        if let Some(handler) = handler.take() {
                            handler(error);
                        }
                        return;
                    }
                }
            }
        })
    }
}

impl<T, S> ServiceStreamExt<T> for S where S: Stream<Item = Result<T, ServiceError>> + Sized {}
