use crate::mutate::mutate;
use crate::types::{AlarmPlan, AlarmRecord, AlarmState, Operation, StateOutcome};
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Build one plan per fetched alarm, evaluating only the requested states.
pub fn plan(
    records: &IndexMap<String, AlarmRecord>,
    states: &BTreeSet<AlarmState>,
    op: Operation,
    target: &str,
) -> Vec<AlarmPlan> {
    records
        .values()
        .map(|record| plan_alarm(record, states, op, target))
        .collect()
}

fn plan_alarm(
    record: &AlarmRecord,
    states: &BTreeSet<AlarmState>,
    op: Operation,
    target: &str,
) -> AlarmPlan {
    let outcomes: Vec<StateOutcome> = states
        .iter()
        .map(|&state| {
            let previous = record.actions(state);
            let m = mutate(previous, op, target);
            StateOutcome {
                state,
                previous: previous.to_vec(),
                new: m.actions,
                classification: m.classification,
            }
        })
        .collect();
    let changed = outcomes.iter().any(|o| o.classification.is_change());
    AlarmPlan {
        alarm: record.name.clone(),
        outcomes,
        changed,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
