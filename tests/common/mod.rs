#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use itempost::{
    config::ServiceConfig,
    error::ServiceError,
    model::{Draft, Item},
    service::{BlockingService, ItemService},
};

pub const DELAY: Duration = Duration::from_millis(500);
pub const REFRESH: Duration = Duration::from_millis(1000);

pub fn item() -> Item {
    Item::new("userId", "adCategory")
}

pub fn draft() -> Draft {
    Draft::new("adId")
}

/// Drafts `"0"` up to `"steps - 1"`, as emitted by `sync`.
pub fn emissions(steps: usize) -> Vec<Draft> {
    (0..steps).map(|step| Draft::new(step.to_string())).collect()
}

pub fn config(steps: usize) -> ServiceConfig {
    ServiceConfig::builder()
        .delay(DELAY)
        .refresh_interval(REFRESH)
        .sync_steps(steps)
        .build()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(Item),
    Replace(Item),
    Remove(Item),
    ResetCategory(Item),
}

/// Hand-written double: records each call, answers like [BlockingService]
/// unless `replace` was given a canned answer.
#[derive(Debug, Clone, Default)]
pub struct RecordingService {
    real: BlockingService,
    replace_answer: Option<Item>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl RecordingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replace_answer(answer: Item) -> Self {
        Self {
            replace_answer: Some(answer),
            ..Self::default()
        }
    }

    /// Shared view on the calls, still readable after the double moved away.
    pub fn log(&self) -> Arc<Mutex<Vec<Call>>> {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ItemService for RecordingService {
    fn create(&self, item: &Item) -> Draft {
        self.record(Call::Create(item.clone()));
        self.real.create(item)
    }

    fn replace(&self, item: &Item) -> Result<Item, ServiceError> {
        self.record(Call::Replace(item.clone()));
        match &self.replace_answer {
            Some(answer) => Ok(answer.clone()),
            None => self.real.replace(item),
        }
    }

    fn remove(&self, item: &Item) {
        self.record(Call::Remove(item.clone()));
        self.real.remove(item)
    }

    fn reset_category(&self, item: &Item) -> Item {
        self.record(Call::ResetCategory(item.clone()));
        self.real.reset_category(item)
    }
}

pub fn calls(log: &Arc<Mutex<Vec<Call>>>) -> Vec<Call> {
    log.lock().unwrap().clone()
}
