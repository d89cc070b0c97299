use crate::models::{CounterSample, DailyAggregate};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use tracing::warn;

pub const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Default)]
struct DayMax {
    views: u64,
    likes: u64,
    comments: u64,
}

/// Groups samples by calendar day, keeps the per-metric maximum within each
/// day, and attaches day-over-day deltas. The first day's deltas are zero.
///
/// Counters reported by the platform only ever grow, so the in-day maximum is
/// the day's closing value; taking the max also shrugs off out-of-order or
/// momentarily stale polls.
pub fn aggregate(samples: &[CounterSample]) -> Vec<DailyAggregate> {
    let mut days: BTreeMap<chrono::NaiveDate, DayMax> = BTreeMap::new();
    for sample in samples {
        let Ok(ts) = NaiveDateTime::parse_from_str(&sample.ts, TS_FORMAT) else {
            warn!("skipping sample with malformed timestamp: {}", sample.ts);
            continue;
        };
        let entry = days.entry(ts.date()).or_default();
        entry.views = entry.views.max(sample.views);
        entry.likes = entry.likes.max(sample.likes);
        entry.comments = entry.comments.max(sample.comments);
    }

    let mut out = Vec::with_capacity(days.len());
    let mut prev: Option<DayMax> = None;
    for (day, max) in days {
        let delta = |current: u64, previous: Option<u64>| match previous {
            Some(previous) => current as i64 - previous as i64,
            None => 0,
        };
        out.push(DailyAggregate {
            day: day.format("%Y-%m-%d").to_string(),
            views: max.views,
            likes: max.likes,
            comments: max.comments,
            views_delta: delta(max.views, prev.map(|p| p.views)),
            likes_delta: delta(max.likes, prev.map(|p| p.likes)),
            comments_delta: delta(max.comments, prev.map(|p| p.comments)),
        });
        prev = Some(max);
    }

    out
}
