use serde::{Deserialize, Serialize};

/// One poll of the video's cumulative counters, stamped at capture time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CounterSample {
    /// Local capture instant, `YYYY-MM-DD HH:MM:SS`. Primary key in the store.
    pub ts: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
}

/// Per-day maximum of each counter plus the change from the previous day.
///
/// Derived from the full sample history on every read; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyAggregate {
    /// Calendar day, `YYYY-MM-DD`.
    pub day: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub views_delta: i64,
    pub likes_delta: i64,
    pub comments_delta: i64,
}
