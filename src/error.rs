//! # Error Module
//!
//! This module provides the [ServiceError] enum shared by every invocation
//! style of the item service.
//!
//! ## Overview
//!
//! The only failure the core service produces on its own is the
//! [ServiceError::OperationFailure] raised by `replace`. The other variants
//! come from the delivery layers: a suspend-style call cancelled through its
//! token, and a reactive receiver whose producer went away before sending a
//! terminal event.
use async_channel::RecvError;
use thiserror::Error;

/// Message carried by the failure `replace` always raises.
pub const REPLACE_FAILED_MESSAGE: &str = "replace failed message";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    OperationFailure(String),
    #[error("Operation cancelled before completion")]
    Cancelled,
    #[error("Error receiving pushed value")]
    Disconnected(#[from] RecvError),
}

impl ServiceError {
    /// The fixed failure returned by every `replace` call.
    pub fn replace_failed() -> Self {
        ServiceError::OperationFailure(REPLACE_FAILED_MESSAGE.to_string())
    }
}
