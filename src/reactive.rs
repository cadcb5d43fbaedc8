//! # Reactive Module
//!
//! This module provides push-based primitives, [Single] and [Observable],
//! and the reactive-style invoker [ReactiveService] built on them.
//!
//! ## Overview
//!
//! Both primitives own the receiving half of an [async_channel] channel. The
//! producer pushes its elements into the channel buffer as soon as the
//! primitive is built, so production is eager. A [Single] completes with its
//! one value. An [Observable] ends with an explicit completion marker or a
//! terminal error. A channel that closes before either arrives lost its
//! producer and reports [ServiceError::Disconnected].
//!
//! Latency is a pipeline stage rather than a gate on production:
//! [Single::delay] and [Observable::delay] spawn a tokio task that holds each
//! element for the given duration, measured from the moment the stage
//! received it, before pushing it further downstream.
//!
//! [TestObserver] drains a primitive and records what a subscriber would
//! have seen: the values, the terminal error and whether it completed.
use std::{collections::VecDeque, sync::Arc, time::Duration};

use async_channel::{bounded, unbounded, Receiver};
use async_stream::stream;
use futures::Stream;
use tokio::time::{sleep_until, Instant};
use tracing::trace;

use crate::{
    config::ServiceConfig,
    error::ServiceError,
    model::{Draft, Item},
    service::{BlockingService, ItemService},
};

type Element<T> = Result<T, ServiceError>;

/// Upper bound for a hold that cannot be represented as an [Instant].
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// What an [Observable] channel carries.
#[derive(Debug)]
enum Signal<T> {
    Next(T),
    Error(ServiceError),
    Complete,
}

fn deadline_after(delay: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(delay).unwrap_or_else(|| now + FAR_FUTURE)
}

/// Forwards every element of `upstream` after holding it for `delay`.
///
/// # Arguments
///
/// - `upstream`: receiver the stage drains.
/// - `delay`: how long each element is held, counted from its reception.
///     A delay too large for an [Instant] holds the element for thirty
///     years, the same ceiling `tokio::time::sleep` saturates to.
/// - `capacity`: optional size of the downstream channel. If `None`, an
///     unbounded channel is created.
///
/// # Behavior
///
/// The spawned task keeps reading `upstream` while earlier elements wait, so
/// elements pushed together leave together. It exits once `upstream` is
/// closed and drained, which closes the returned receiver, or as soon as the
/// downstream receiver is dropped.
fn delay_stage<E>(upstream: Receiver<E>, delay: Duration, capacity: Option<usize>) -> Receiver<E>
where
    E: Send + 'static,
{
    let (sender, receiver) = match capacity {
        Some(b) => bounded(b),
        None => unbounded(),
    };
    tokio::spawn(async move {
        let mut pending: VecDeque<(Instant, E)> = VecDeque::new();
        let mut upstream_open = true;
        loop {
            let next_due = pending.front().map(|(due, _)| *due);
            tokio::select! {
                received = upstream.recv(), if upstream_open => match received {
                    Ok(element) => pending.push_back((deadline_after(delay), element)),
                    Err(_) => upstream_open = false,
                },
                _ = sleep_until(next_due.unwrap_or_else(Instant::now)), if next_due.is_some() => {
                    if let Some((_, element)) = pending.pop_front() {
                        if sender.send(element).await.is_err() {
                            trace!("downstream dropped, stopping delay stage");
                            return;
                        }
                    }
                }
                else => break,
            }
        }
    });
    receiver
}

#[derive(Debug)]
/// Push source of exactly one value or one error.
pub struct Single<T> {
    receiver: Receiver<Element<T>>,
}

impl<T> Single<T>
where
    T: Send + 'static,
{
    pub fn just(value: T) -> Self {
        Self::from_result(Ok(value))
    }

    pub fn error(error: ServiceError) -> Self {
        Self::from_result(Err(error))
    }

    pub fn from_result(result: Result<T, ServiceError>) -> Self {
        let (sender, receiver) = bounded(1);
        // a fresh channel of capacity one always accepts the first push
        let _ = sender.try_send(result);
        Self { receiver }
    }

    /// Delays delivery of the value or error by `delay`.
    ///
    /// # Panics
    ///
    /// Spawns the delay stage on the current tokio runtime, so it panics when
    /// called outside of one.
    pub fn delay(self, delay: Duration) -> Self {
        Self {
            receiver: delay_stage(self.receiver, delay, Some(1)),
        }
    }

    /// Waits for the pushed value.
    ///
    /// Returns [ServiceError::Disconnected] if the producer went away
    /// without pushing anything.
    pub async fn get(self) -> Result<T, ServiceError> {
        self.receiver.recv().await?
    }

    pub async fn test(self) -> TestObserver<T> {
        let mut observer = TestObserver::new();
        match self.receiver.recv().await {
            Ok(Ok(value)) => {
                observer.values.push(value);
                observer.completed = true;
            }
            Ok(Err(error)) => observer.error = Some(error),
            Err(closed) => observer.error = Some(closed.into()),
        }
        observer
    }
}

#[derive(Debug)]
/// Finite push source of values, optionally ended by an error.
pub struct Observable<T> {
    receiver: Receiver<Signal<T>>,
}

impl<T> FromIterator<T> for Observable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        let (sender, receiver) = unbounded();
        for value in values {
            // unbounded and the receiver is held below
            let _ = sender.try_send(Signal::Next(value));
        }
        let _ = sender.try_send(Signal::Complete);
        Self { receiver }
    }
}

impl<T> Observable<T>
where
    T: Send + 'static,
{
    pub fn just(value: T) -> Self {
        std::iter::once(value).collect()
    }

    pub fn error(error: ServiceError) -> Self {
        let (sender, receiver) = unbounded();
        let _ = sender.try_send(Signal::Error(error));
        Self { receiver }
    }

    /// One value on `Ok`, a lone terminal error on `Err`.
    pub fn from_result(result: Result<T, ServiceError>) -> Self {
        match result {
            Ok(value) => Self::just(value),
            Err(error) => Self::error(error),
        }
    }

    /// Shifts every element by `delay`.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn delay(self, delay: Duration) -> Self {
        Self {
            receiver: delay_stage(self.receiver, delay, None),
        }
    }

    /// Exposes the pushed elements as a stream that ends on completion.
    ///
    /// A terminal error is the last item. A producer that went away without
    /// completing ends the stream with [ServiceError::Disconnected].
    pub fn into_stream(self) -> impl Stream<Item = Result<T, ServiceError>> {
        let receiver = self.receiver;
        stream! {
            loop {
                match receiver.recv().await {
                    Ok(Signal::Next(value)) => yield Ok::<_, ServiceError>(value),
                    Ok(Signal::Error(error)) => {
                        yield Err(error);
                        break;
                    }
                    Ok(Signal::Complete) => break,
                    Err(closed) => {
                        yield Err(closed.into());
                        break;
                    }
                }
            }
        }
    }

    pub async fn test(self) -> TestObserver<T> {
        let mut observer = TestObserver::new();
        loop {
            match self.receiver.recv().await {
                Ok(Signal::Next(value)) => observer.values.push(value),
                Ok(Signal::Error(error)) => {
                    observer.error = Some(error);
                    break;
                }
                Ok(Signal::Complete) => {
                    observer.completed = true;
                    break;
                }
                Err(closed) => {
                    observer.error = Some(closed.into());
                    break;
                }
            }
        }
        observer
    }
}

/// Everything a subscriber observed from a [Single] or an [Observable].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestObserver<T> {
    values: Vec<T>,
    error: Option<ServiceError>,
    completed: bool,
}

impl<T> TestObserver<T> {
    fn new() -> Self {
        Self {
            values: Vec::new(),
            error: None,
            completed: false,
        }
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    pub fn error(&self) -> Option<&ServiceError> {
        self.error.as_ref()
    }

    /// True when the source finished without an error.
    pub fn is_complete(&self) -> bool {
        self.completed
    }
}

/// Reactive-style capability interface of the item service.
///
/// # Panics
///
/// The provided [ReactiveService] calls the wrapped service immediately and
/// delays only the delivery of the result through a spawned stage. Every
/// method therefore panics when called outside of a tokio runtime.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ReactiveItemService: Send + Sync {
    fn create(&self, item: Item) -> Single<Draft>;
    fn replace(&self, item: Item) -> Observable<Item>;
    fn remove(&self, item: Item) -> Single<()>;
    fn sync(&self) -> Observable<Draft>;
}

#[derive(Debug)]
pub struct ReactiveService<S = BlockingService> {
    inner: Arc<S>,
    delay: Duration,
    sync_steps: usize,
}

impl<S> Clone for ReactiveService<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            delay: self.delay,
            sync_steps: self.sync_steps,
        }
    }
}

impl<S> ReactiveService<S>
where
    S: ItemService,
{
    pub fn new(inner: S, config: &ServiceConfig) -> Self {
        Self::from_shared(Arc::new(inner), config)
    }

    pub fn from_shared(inner: Arc<S>, config: &ServiceConfig) -> Self {
        Self {
            inner,
            delay: config.delay,
            sync_steps: config.sync_steps,
        }
    }
}

impl<S> ReactiveItemService for ReactiveService<S>
where
    S: ItemService,
{
    fn create(&self, item: Item) -> Single<Draft> {
        Single::just(self.inner.create(&item)).delay(self.delay)
    }

    fn replace(&self, item: Item) -> Observable<Item> {
        Observable::from_result(self.inner.replace(&item)).delay(self.delay)
    }

    fn remove(&self, item: Item) -> Single<()> {
        self.inner.remove(&item);
        Single::just(()).delay(self.delay)
    }

    fn sync(&self) -> Observable<Draft> {
        (0..self.sync_steps)
            .map(|step| Draft::new(step.to_string()))
            .collect::<Observable<_>>()
            .delay(self.delay)
    }
}
