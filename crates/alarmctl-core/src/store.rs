use crate::error::Result;
use crate::types::{AlarmRecord, AlarmState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Full replacement action lists for one alarm, keyed by state.
///
/// Only states that were evaluated are present. A store whose update call
/// replaces the whole alarm must carry the remaining states over from the
/// definition it returned from [`AlarmStore::describe`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionUpdate {
    pub alarm: String,
    pub actions: BTreeMap<AlarmState, Vec<String>>,
}

/// Backing store for alarm definitions.
///
/// Calls are blocking and issued sequentially by one caller.
pub trait AlarmStore {
    /// Look up at most one batch of alarms by exact name. Names with no
    /// matching alarm are simply absent from the result.
    fn describe(&mut self, names: &[String]) -> Result<Vec<AlarmRecord>>;

    /// Persist the new action lists for a single alarm.
    fn put_actions(&mut self, update: &ActionUpdate) -> Result<()>;
}

// ---------------------------------------------------------------------------
// In-memory store for tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod memory {
    use super::*;
    use crate::error::AlarmError;
    use std::collections::{HashMap, HashSet};

    /// Records every call so tests can assert on batching and write counts.
    #[derive(Default)]
    pub struct MemoryStore {
        pub alarms: HashMap<String, AlarmRecord>,
        pub lookups: Vec<Vec<String>>,
        pub writes: Vec<ActionUpdate>,
        pub fail_describe: bool,
        pub fail_writes_for: HashSet<String>,
    }

    impl MemoryStore {
        pub fn with(records: impl IntoIterator<Item = AlarmRecord>) -> Self {
            Self {
                alarms: records.into_iter().map(|r| (r.name.clone(), r)).collect(),
                ..Default::default()
            }
        }
    }

    impl AlarmStore for MemoryStore {
        fn describe(&mut self, names: &[String]) -> Result<Vec<AlarmRecord>> {
            self.lookups.push(names.to_vec());
            if self.fail_describe {
                return Err(AlarmError::BackendUnavailable("connection refused".into()));
            }
            Ok(names
                .iter()
                .filter_map(|n| self.alarms.get(n).cloned())
                .collect())
        }

        fn put_actions(&mut self, update: &ActionUpdate) -> Result<()> {
            if self.fail_writes_for.contains(&update.alarm) {
                return Err(AlarmError::WriteFailed {
                    alarm: update.alarm.clone(),
                    reason: "throttled".into(),
                });
            }
            if let Some(record) = self.alarms.get_mut(&update.alarm) {
                for (state, actions) in &update.actions {
                    *record.actions_mut(*state) = actions.clone();
                }
            }
            self.writes.push(update.clone());
            Ok(())
        }
    }
}
