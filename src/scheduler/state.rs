//! Persisted scheduler state and advice records.
//!
//! The whole [`SchedulerState`] is stored as one camelCase JSON document
//! under [`STATE_KEY`] and is always read-modify-written as a unit.

use crate::catalog::MentalHealthTip;
use crate::error::Result;
use crate::store::{self, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Store key of the scheduler state document.
pub const STATE_KEY: &str = "mentalHealthScheduler";

/// One generated check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledAdvice {
    /// Unique within the history.
    pub id: String,
    /// Epoch milliseconds at generation.
    pub timestamp: u64,
    pub tip: MentalHealthTip,
    pub personal_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affirmation: Option<String>,
    #[serde(default)]
    pub is_read: bool,
}

/// The single persisted scheduler aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulerState {
    /// Epoch milliseconds of the latest generation, `0` if never sent.
    pub last_sent: u64,
    /// Newest first.
    pub advice_history: Vec<ScheduledAdvice>,
    pub is_enabled: bool,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self {
            last_sent: 0,
            advice_history: Vec::new(),
            is_enabled: true,
        }
    }
}

impl SchedulerState {
    /// Load state from `store`, degrading to the default state when the
    /// record is absent, unreadable or corrupt.
    ///
    /// Loaded history keeps its stored order and is capped at `limit`.
    pub fn load(store: &dyn KeyValueStore, limit: usize) -> Self {
        let mut state = match store::load_json::<SchedulerState>(store, STATE_KEY) {
            Ok(Some(state)) => state,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!("cannot load scheduler state, using defaults: {e}");
                return Self::default();
            }
        };
        if state.normalize(limit) {
            debug!("capped persisted advice history at {limit}");
        }
        state
    }

    /// Persist the full state.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the store write fails.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        store::save_json(store, STATE_KEY, self)
    }

    /// Delete the persisted state.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot remove the record.
    pub fn clear(store: &dyn KeyValueStore) -> Result<()> {
        store.remove(STATE_KEY)
    }

    /// Milliseconds since the last generation. A clock behind `last_sent`
    /// counts as zero elapsed.
    pub fn elapsed_since_last(&self, now_millis: u64) -> u64 {
        now_millis.saturating_sub(self.last_sent)
    }

    /// `true` when enabled and at least `interval` has elapsed.
    pub fn is_due(&self, now_millis: u64, interval: Duration) -> bool {
        self.is_enabled && u128::from(self.elapsed_since_last(now_millis)) >= interval.as_millis()
    }

    /// Time left until the next advice is due, never negative.
    pub fn time_until_next(&self, now_millis: u64, interval: Duration) -> Duration {
        interval.saturating_sub(Duration::from_millis(self.elapsed_since_last(now_millis)))
    }

    /// Insert `advice` at the head, evict beyond `limit` and stamp
    /// `last_sent` with the advice timestamp.
    pub fn push_advice(&mut self, advice: ScheduledAdvice, limit: usize) {
        self.last_sent = advice.timestamp;
        self.advice_history.insert(0, advice);
        self.advice_history.truncate(limit.max(1));
    }

    pub fn unread(&self) -> Vec<ScheduledAdvice> {
        self.advice_history
            .iter()
            .filter(|a| !a.is_read)
            .cloned()
            .collect()
    }

    /// Mark one record read. Returns `true` when the record exists and was unread.
    pub fn mark_as_read(&mut self, id: &str) -> bool {
        match self.advice_history.iter_mut().find(|a| a.id == id) {
            Some(advice) if !advice.is_read => {
                advice.is_read = true;
                true
            }
            _ => false,
        }
    }

    /// Mark every record read. Returns how many changed.
    pub fn mark_all_as_read(&mut self) -> usize {
        let mut changed = 0;
        for advice in self.advice_history.iter_mut().filter(|a| !a.is_read) {
            advice.is_read = true;
            changed += 1;
        }
        changed
    }

    /// Cap externally written history at `limit` entries. Stored order is
    /// authoritative: the head is the newest insertion even when the clock
    /// stepped backwards between generations. Returns `true` when anything
    /// was dropped.
    pub fn normalize(&mut self, limit: usize) -> bool {
        let limit = limit.max(1);
        let over = self.advice_history.len() > limit;
        self.advice_history.truncate(limit);
        over
    }
}
