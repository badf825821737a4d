//! Retention policy evaluation.
//!
//! The three filters run in a fixed order and each one only sees the entries
//! that survived the previous one:
//!
//! 1. **Size**: walk newest first accumulating sizes; the entry that pushes
//!    the running total over the budget and everything after it is removed.
//! 2. **Age**: the first survivor older than the limit and every survivor
//!    after it is removed. The snapshot is sorted newest first, so age never
//!    decreases along the walk and a single cutoff suffices.
//! 3. **Count**: survivors beyond the first `max_count` are removed.
//!
//! Because every filter partitions its own input, an entry is selected by at
//! most one filter and the removal set never holds duplicates.

use std::time::SystemTime;

use tracing::debug;

use super::config::Limits;
use super::size::{format_duration, format_size};
use super::snapshot::Entry;
use crate::error::Result;

/// Which filter selected an entry for removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    /// Cumulative size exceeded `max_size`
    Size,
    /// Older than `max_age`
    Age,
    /// Beyond the first `max_count` entries
    Count,
}

/// Outcome of evaluating a snapshot against the limits.
#[derive(Debug, Default)]
pub struct Evaluation {
    /// Entries satisfying every active limit, newest first
    pub keep: Vec<Entry>,
    /// Entries selected for removal with the filter that selected them
    pub remove: Vec<(Entry, RemovalReason)>,
}

/// Classify every entry of `snapshot` as keep or remove.
///
/// `snapshot` must be sorted newest first. `dir_size` is consulted only by
/// the size filter, only for directories, and only until the budget is
/// exceeded; its errors abort the evaluation.
pub fn evaluate<F>(
    snapshot: Vec<Entry>,
    limits: &Limits,
    now: SystemTime,
    mut dir_size: F,
) -> Result<Evaluation>
where
    F: FnMut(&Entry) -> Result<u64>,
{
    let mut remaining = snapshot;
    let mut remove = Vec::new();

    if let Some(max_size) = limits.size_limit() {
        let cutoff = size_cutoff(&remaining, max_size, &mut dir_size)?;
        if let Some(idx) = cutoff {
            debug!(
                "size budget {} exceeded at {:?}",
                format_size(max_size),
                remaining[idx].path
            );
            remove.extend(remaining.drain(idx..).map(|e| (e, RemovalReason::Size)));
        }
    }

    if let Some(max_age) = limits.age_limit()
        && let Some(idx) = remaining.iter().position(|e| e.age(now) > max_age)
    {
        debug!(
            "age limit {} exceeded at {:?}",
            format_duration(max_age),
            remaining[idx].path
        );
        remove.extend(remaining.drain(idx..).map(|e| (e, RemovalReason::Age)));
    }

    if let Some(max_count) = limits.count_limit()
        && remaining.len() > max_count
    {
        debug!(
            "count limit {max_count} exceeded by {} entries",
            remaining.len() - max_count
        );
        remove.extend(
            remaining
                .drain(max_count..)
                .map(|e| (e, RemovalReason::Count)),
        );
    }

    Ok(Evaluation {
        keep: remaining,
        remove,
    })
}

/// Index of the first entry whose inclusion pushes the cumulative size
/// above `max_size`.
fn size_cutoff<F>(entries: &[Entry], max_size: u64, dir_size: &mut F) -> Result<Option<usize>>
where
    F: FnMut(&Entry) -> Result<u64>,
{
    let mut total: u64 = 0;
    for (idx, entry) in entries.iter().enumerate() {
        let size = if entry.is_dir {
            dir_size(entry)?
        } else {
            entry.size
        };
        total = total.saturating_add(size);
        if total > max_size {
            return Ok(Some(idx));
        }
    }
    Ok(None)
}
