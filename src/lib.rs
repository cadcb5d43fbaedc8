//! # Itempost Library
//!
//! This library models a tiny item-posting service and exposes it through
//! four invocation styles, each behind a trait so tests can substitute a
//! double for the real implementation.
//!
//! ## Modules
//!
//! - `model`: the `Item`, `Draft` and `Container` value types.
//! - `draft`: derivation of a draft identifier from an item.
//! - `error`: the `ServiceError` enum shared by every style.
//! - `config`: `ServiceConfig`, the latency and `sync` settings.
//! - `service`: the blocking `ItemService` trait and `BlockingService`.
//! - `delayed`: the suspend-style `AsyncItemService` and `DelayedService`.
//! - `stream`: the stream-style `StreamItemService`, `StreamService` and the
//!   `ServiceStreamExt` operators.
//! - `reactive`: the push primitives `Single`, `Observable`, `TestObserver`
//!   and the reactive-style `ReactiveService`.
//! - `services`: `Services`, which builds every invoker from one config.
//!
//! ## Overview
//!
//! The core service is trivial on purpose: `create` derives
//! `"adId_{user_id}_{category}"`, `replace` always fails with a fixed error
//! and `remove` does nothing. The delayed invokers put a simulated latency in
//! front of each call. The suspend-style and stream-style ones sleep with
//! `tokio::time::sleep`, a real suspension point, while the reactive one
//! delays delivery in a pipeline stage after producing eagerly.
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! itempost = "0.1.0"
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use futures::StreamExt;
//! use itempost::{
//!     config::ServiceConfig,
//!     delayed::AsyncItemService,
//!     error::ServiceError,
//!     model::{Draft, Item},
//!     services::Services,
//!     stream::StreamItemService,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ServiceError> {
//!     let config = ServiceConfig::builder()
//!         .delay(Duration::from_millis(5))
//!         .refresh_interval(Duration::from_millis(5))
//!         .sync_steps(3)
//!         .build();
//!     let services = Services::new(config);
//!     let item = Item::new("userId", "adCategory");
//!
//!     let draft = services.delayed().create(item.clone()).await?;
//!     assert_eq!(draft, Draft::new("adId_userId_adCategory"));
//!
//!     let feed: Vec<_> = services.stream().sync().collect().await;
//!     assert_eq!(feed.len(), 3);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `testing`: generates the `mockall` mocks (`MockItemService`,
//!   `MockAsyncItemService`, `MockStreamItemService`,
//!   `MockReactiveItemService`) outside of this crate's own tests.
//!
//! ## Dependencies
//!
//! - `tokio` for timers, task spawning and cancellation races
//! - `tokio-util` for `CancellationToken`
//! - `async_channel` for the push primitives
//! - `futures` and `async-stream` for the lazy streams
//! - `async-trait` for the suspend-style trait
//! - `thiserror` for error handling
//! - `tracing` for structured logging

pub mod config;
pub mod delayed;
pub mod draft;
pub mod error;
pub mod model;
pub mod reactive;
pub mod service;
pub mod services;
pub mod stream;
