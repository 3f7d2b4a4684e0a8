use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// AlarmState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlarmState {
    Ok,
    InAlarm,
    InsufficientData,
}

impl AlarmState {
    pub fn all() -> &'static [AlarmState] {
        &[
            AlarmState::Ok,
            AlarmState::InAlarm,
            AlarmState::InsufficientData,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlarmState::Ok => "OK",
            AlarmState::InAlarm => "IN_ALARM",
            AlarmState::InsufficientData => "INSUFFICIENT_DATA",
        }
    }
}

impl fmt::Display for AlarmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AlarmState {
    type Err = crate::error::AlarmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OK" => Ok(AlarmState::Ok),
            "IN_ALARM" => Ok(AlarmState::InAlarm),
            "INSUFFICIENT_DATA" => Ok(AlarmState::InsufficientData),
            _ => Err(crate::error::AlarmError::InvalidState(s.trim().to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Remove,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Remove => "remove",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Operation {
    type Err = crate::error::AlarmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Operation::Add),
            "remove" => Ok(Operation::Remove),
            _ => Err(crate::error::AlarmError::InvalidOperation(s.trim().to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Outcome of applying an [`Operation`] to one state's action list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Unchanged,
    Added,
    Removed,
    /// ADD of a target already present, or REMOVE of one that is absent.
    NotApplicable,
}

impl Classification {
    pub fn is_change(self) -> bool {
        matches!(self, Classification::Added | Classification::Removed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Unchanged => "unchanged",
            Classification::Added => "added",
            Classification::Removed => "removed",
            Classification::NotApplicable => "not_applicable",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AlarmRecord
// ---------------------------------------------------------------------------

/// Snapshot of one alarm's notification actions as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlarmRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    #[serde(default)]
    pub ok_actions: Vec<String>,
    #[serde(default)]
    pub alarm_actions: Vec<String>,
    #[serde(default)]
    pub insufficient_data_actions: Vec<String>,
}

impl AlarmRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_actions(mut self, state: AlarmState, actions: Vec<String>) -> Self {
        *self.actions_mut(state) = actions;
        self
    }

    pub fn actions(&self, state: AlarmState) -> &[String] {
        match state {
            AlarmState::Ok => &self.ok_actions,
            AlarmState::InAlarm => &self.alarm_actions,
            AlarmState::InsufficientData => &self.insufficient_data_actions,
        }
    }

    pub fn actions_mut(&mut self, state: AlarmState) -> &mut Vec<String> {
        match state {
            AlarmState::Ok => &mut self.ok_actions,
            AlarmState::InAlarm => &mut self.alarm_actions,
            AlarmState::InsufficientData => &mut self.insufficient_data_actions,
        }
    }
}

// ---------------------------------------------------------------------------
// StateOutcome / AlarmPlan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateOutcome {
    pub state: AlarmState,
    pub previous: Vec<String>,
    pub new: Vec<String>,
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmPlan {
    pub alarm: String,
    pub outcomes: Vec<StateOutcome>,
    pub changed: bool,
}

impl AlarmPlan {
    pub fn outcome(&self, state: AlarmState) -> Option<&StateOutcome> {
        self.outcomes.iter().find(|o| o.state == state)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn state_roundtrip() {
        for state in AlarmState::all() {
            assert_eq!(AlarmState::from_str(state.as_str()).unwrap(), *state);
        }
    }

    #[test]
    fn state_parse_is_case_insensitive() {
        assert_eq!(AlarmState::from_str("ok").unwrap(), AlarmState::Ok);
        assert_eq!(AlarmState::from_str(" in_alarm ").unwrap(), AlarmState::InAlarm);
        assert_eq!(
            AlarmState::from_str("Insufficient_Data").unwrap(),
            AlarmState::InsufficientData
        );
    }

    #[test]
    fn state_alarm_is_not_a_valid_spelling() {
        let err = AlarmState::from_str("ALARM").unwrap_err();
        assert!(matches!(err, crate::AlarmError::InvalidState(s) if s == "ALARM"));
    }

    #[test]
    fn state_serializes_canonically() {
        let json = serde_json::to_string(&AlarmState::InsufficientData).unwrap();
        assert_eq!(json, "\"INSUFFICIENT_DATA\"");
    }

    #[test]
    fn operation_parse() {
        assert_eq!(Operation::from_str("ADD").unwrap(), Operation::Add);
        assert_eq!(Operation::from_str("remove").unwrap(), Operation::Remove);
        assert!(Operation::from_str("toggle").is_err());
    }

    #[test]
    fn only_added_and_removed_are_changes() {
        assert!(Classification::Added.is_change());
        assert!(Classification::Removed.is_change());
        assert!(!Classification::NotApplicable.is_change());
        assert!(!Classification::Unchanged.is_change());
    }

    #[test]
    fn record_actions_by_state() {
        let record = AlarmRecord::new("cpu-high")
            .with_actions(AlarmState::InAlarm, vec!["arn:a".to_string()]);
        assert_eq!(record.actions(AlarmState::InAlarm), ["arn:a".to_string()]);
        assert!(record.actions(AlarmState::Ok).is_empty());
    }
}
