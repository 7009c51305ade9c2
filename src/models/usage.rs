use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Maximum permitted pipeline invocations per window, shared by all callers
pub const USAGE_QUOTA: u32 = 3;

/// Action label recorded for a completed generation
pub const GENERATE_ACTION: &str = "generate";

/// Length of the rolling usage window
pub fn usage_window() -> Duration {
    Duration::hours(1)
}

/// One entry in the append-only usage history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEvent {
    pub timestamp: DateTime<Utc>,
    pub action: String,
}

/// The persisted usage singleton: one record for the whole service instance.
///
/// Field names are the on-disk JSON layout; `usage_count` must equal
/// `usage_history.len()` after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub usage_count: u32,
    pub last_reset: DateTime<Utc>,
    pub usage_history: Vec<UsageEvent>,
}

impl UsageRecord {
    /// A zero-state record whose window starts now
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            usage_count: 0,
            last_reset: now,
            usage_history: Vec::new(),
        }
    }

    /// True once the window has fully elapsed (`now - last_reset >= W`)
    pub fn window_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.last_reset >= usage_window()
    }

    /// Applies the window reset in place: zero count, fresh window start,
    /// cleared history
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.usage_count = 0;
        self.last_reset = now;
        self.usage_history.clear();
    }

    /// Records one completed invocation and returns the new count
    pub fn record_usage(&mut self, now: DateTime<Utc>, action: &str) -> u32 {
        self.usage_history.push(UsageEvent {
            timestamp: now,
            action: action.to_string(),
        });
        self.usage_count += 1;
        self.usage_count
    }

    /// When the current window ends and the counter resets
    pub fn resets_at(&self) -> DateTime<Utc> {
        self.last_reset + usage_window()
    }
}
