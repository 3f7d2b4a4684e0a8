use crate::error::{AlarmError, Result};
use crate::execute::{execute, RunReport};
use crate::fetch::{check_batch_size, fetch, DEFAULT_BATCH_SIZE};
use crate::plan::plan;
use crate::store::AlarmStore;
use crate::types::Operation;
use crate::validate::validate;

/// Everything one `update` invocation needs, before validation.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub alarms: Vec<String>,
    pub operation: Operation,
    pub target: String,
    pub states: Vec<String>,
    pub dry_run: bool,
    pub batch_size: usize,
    pub fail_on_missing: bool,
}

impl UpdateRequest {
    pub fn new(
        alarms: Vec<String>,
        operation: Operation,
        target: impl Into<String>,
        states: Vec<String>,
    ) -> Self {
        Self {
            alarms,
            operation,
            target: target.into(),
            states,
            dry_run: false,
            batch_size: DEFAULT_BATCH_SIZE,
            fail_on_missing: false,
        }
    }
}

/// Validate, fetch, plan and execute.
///
/// Validation and fetch failures are returned before anything is written.
/// Per-alarm write failures are folded into the report instead.
pub fn run_update(store: &mut dyn AlarmStore, req: UpdateRequest) -> Result<RunReport> {
    let selection = validate(&req.target, &req.states)?;
    check_batch_size(req.batch_size)?;
    if req.alarms.iter().all(|a| a.trim().is_empty()) {
        return Err(AlarmError::EmptyAlarmList);
    }

    tracing::info!(
        operation = %req.operation,
        target = %selection.target,
        alarms = req.alarms.len(),
        dry_run = req.dry_run,
        "starting update"
    );

    let fetched = fetch(store, &req.alarms, req.batch_size)?;
    if req.fail_on_missing && !fetched.not_found.is_empty() {
        return Err(AlarmError::AlarmsNotFound(fetched.not_found));
    }

    if fetched.records.is_empty() {
        tracing::warn!(requested = req.alarms.len(), "none of the listed alarms were found");
    }

    let plans = plan(
        &fetched.records,
        &selection.states,
        req.operation,
        &selection.target,
    );
    Ok(execute(store, plans, fetched.not_found, req.dry_run))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
