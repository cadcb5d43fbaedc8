//! # Service Module
//!
//! This module provides the [ItemService] trait and [BlockingService], the
//! core implementation every other invoker delegates to.
//!
//! ## Overview
//!
//! Calls through [ItemService] run synchronously and return immediately.
//! The operations are deliberately trivial: `create` derives a draft,
//! `replace` always fails, `remove` does nothing and `reset_category` swaps
//! the category for a fixed marker. Code that depends on the service should
//! take an [ItemService] so a test double can stand in for it.
use tracing::{debug, warn};

use crate::{
    error::ServiceError,
    model::{Draft, Item},
};

/// Category written by [ItemService::reset_category] unless configured otherwise.
pub const FAILURE_CATEGORY: &str = "no category!!";

/// Blocking capability interface of the item service.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ItemService: Send + Sync {
    /// Derives and returns the draft for `item`.
    fn create(&self, item: &Item) -> Draft;
    /// Always fails with [ServiceError::replace_failed].
    fn replace(&self, item: &Item) -> Result<Item, ServiceError>;
    fn remove(&self, item: &Item);
    /// Returns `item` with its category replaced by the failure marker.
    fn reset_category(&self, item: &Item) -> Item;
}

#[derive(Debug, Clone)]
pub struct BlockingService {
    failure_category: String,
}

impl Default for BlockingService {
    fn default() -> Self {
        Self::with_failure_category(FAILURE_CATEGORY)
    }
}

impl BlockingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service whose `reset_category` writes `category` instead of
    /// [FAILURE_CATEGORY].
    pub fn with_failure_category(category: impl Into<String>) -> Self {
        Self {
            failure_category: category.into(),
        }
    }

    fn failure_category(&self) -> &str {
        &self.failure_category
    }
}

impl ItemService for BlockingService {
    fn create(&self, item: &Item) -> Draft {
        let draft = item.to_draft();
        debug!(user_id = %item.user_id, draft_id = %draft.id, "draft created");
        draft
    }

    fn replace(&self, item: &Item) -> Result<Item, ServiceError> {
        warn!(user_id = %item.user_id, "replace rejected");
        Err(ServiceError::replace_failed())
    }

    fn remove(&self, item: &Item) {
        debug!(user_id = %item.user_id, "remove accepted");
    }

    fn reset_category(&self, item: &Item) -> Item {
        item.with_category(self.failure_category())
    }
}
