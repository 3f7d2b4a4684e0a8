use crate::error::{AlarmError, Result};
use crate::store::AlarmStore;
use crate::types::AlarmRecord;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

/// CloudWatch `DescribeAlarms` accepts at most this many names per call.
pub const MAX_BATCH_SIZE: usize = 100;

pub const DEFAULT_BATCH_SIZE: usize = MAX_BATCH_SIZE;

#[derive(Debug, Clone, Default, Serialize)]
pub struct FetchResult {
    /// Found alarms keyed by exact name, in request order.
    pub records: IndexMap<String, AlarmRecord>,
    /// Requested names the store did not return, in request order.
    pub not_found: Vec<String>,
}

/// Collapse duplicate names, keeping the first occurrence of each.
pub fn dedup_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|n| n.as_ref())
        .filter(|n| seen.insert(*n))
        .map(str::to_string)
        .collect()
}

pub fn check_batch_size(batch_size: usize) -> Result<()> {
    if batch_size == 0 || batch_size > MAX_BATCH_SIZE {
        return Err(AlarmError::InvalidBatchSize(batch_size));
    }
    Ok(())
}

/// Fetch alarm definitions in chunks of at most `batch_size` names.
///
/// A transport failure on any chunk aborts the whole fetch: a partial view
/// of alarm state is not safe to plan against.
pub fn fetch<S: AsRef<str>>(
    store: &mut dyn AlarmStore,
    names: &[S],
    batch_size: usize,
) -> Result<FetchResult> {
    check_batch_size(batch_size)?;
    let names = dedup_names(names);

    let mut result = FetchResult::default();
    for (i, chunk) in names.chunks(batch_size).enumerate() {
        tracing::debug!(batch = i, count = chunk.len(), "describing alarms");
        let returned = store.describe(chunk)?;

        let mut by_name: IndexMap<String, AlarmRecord> =
            returned.into_iter().map(|r| (r.name.clone(), r)).collect();
        for name in chunk {
            match by_name.shift_remove(name) {
                Some(record) => {
                    result.records.insert(name.clone(), record);
                }
                None => result.not_found.push(name.clone()),
            }
        }
        if !by_name.is_empty() {
            tracing::debug!(
                batch = i,
                extra = by_name.len(),
                "ignoring alarms that were not requested"
            );
        }
    }

    if !result.not_found.is_empty() {
        tracing::warn!(
            count = result.not_found.len(),
            "some requested alarms were not found"
        );
    }
    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
