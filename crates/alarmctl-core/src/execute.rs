use crate::store::{ActionUpdate, AlarmStore};
use crate::types::AlarmPlan;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RunReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounts {
    pub attempted: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub not_found: usize,
    pub written: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmFailure {
    pub alarm: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub dry_run: bool,
    pub plans: Vec<AlarmPlan>,
    pub not_found: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<AlarmFailure>,
    pub counts: RunCounts,
}

impl RunReport {
    /// True when every write that was attempted went through.
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failure(&self, alarm: &str) -> Option<&AlarmFailure> {
        self.failures.iter().find(|f| f.alarm == alarm)
    }
}

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

fn update_for(plan: &AlarmPlan) -> ActionUpdate {
    ActionUpdate {
        alarm: plan.alarm.clone(),
        actions: plan
            .outcomes
            .iter()
            .map(|o| (o.state, o.new.clone()))
            .collect(),
    }
}

/// Apply `plans` to the store, one write per changed alarm.
///
/// With `dry_run` set no write is issued and the report describes what would
/// have happened. A failed write is recorded against its alarm and the
/// remaining alarms are still processed.
pub fn execute(
    store: &mut dyn AlarmStore,
    plans: Vec<AlarmPlan>,
    not_found: Vec<String>,
    dry_run: bool,
) -> RunReport {
    let changed = plans.iter().filter(|p| p.changed).count();
    let mut counts = RunCounts {
        attempted: plans.len(),
        changed,
        unchanged: plans.len() - changed,
        not_found: not_found.len(),
        ..Default::default()
    };
    let mut failures = Vec::new();

    if dry_run {
        tracing::info!(changed, "dry run: skipping writes");
    } else {
        for plan in plans.iter().filter(|p| p.changed) {
            match store.put_actions(&update_for(plan)) {
                Ok(()) => {
                    tracing::info!(alarm = %plan.alarm, "alarm updated");
                    counts.written += 1;
                }
                Err(e) => {
                    tracing::warn!(alarm = %plan.alarm, error = %e, "alarm update failed");
                    failures.push(AlarmFailure {
                        alarm: plan.alarm.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
        counts.failed = failures.len();
    }

    RunReport {
        dry_run,
        plans,
        not_found,
        failures,
        counts,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
