//! Ordering and filtering: sorted and sliced views over record
//! collections. Pure; every function returns a new vector and leaves
//! its input untouched.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::models::{ActivityRecord, Timeframe};

/// Numeric suffix of a record id ("session-012" -> 12). Ids without a
/// numeric suffix have no recency key.
fn recency_key(id: &str) -> Option<u64> {
    let prefix = id.trim_end_matches(|c: char| c.is_ascii_digit());
    id[prefix.len()..].parse().ok()
}

/// Most-recent-first ordering by the id's numeric suffix. Stable for
/// ties; records without a numeric suffix order after all numbered
/// ones. Idempotent.
pub fn sort_by_recency_desc<R: ActivityRecord + Clone>(records: &[R]) -> Vec<R> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        match (recency_key(a.record_id()), recency_key(b.record_id())) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    sorted
}

/// First `n` records — the collapsed "preview" slice. Growing `n`
/// never changes the prefix already shown.
pub fn take_top_n<R: Clone>(records: &[R], n: usize) -> Vec<R> {
    records.iter().take(n).cloned().collect()
}

/// Last `n` records.
pub fn take_last_n<R: Clone>(records: &[R], n: usize) -> Vec<R> {
    let skip = records.len().saturating_sub(n);
    records.iter().skip(skip).cloned().collect()
}

/// Records whose `start_time` falls within `[now - window, now]`.
/// `Timeframe::All` passes everything through. Both boundaries are
/// inclusive; records stamped after `now` are excluded.
pub fn filter_by_timeframe<R: ActivityRecord + Clone>(
    records: &[R],
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> Vec<R> {
    let Some(window) = timeframe.window() else {
        return records.to_vec();
    };
    let cutoff = now - window;
    records
        .iter()
        .filter(|r| r.start_time() >= cutoff && r.start_time() <= now)
        .cloned()
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
