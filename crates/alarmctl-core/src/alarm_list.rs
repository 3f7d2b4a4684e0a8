use crate::error::{AlarmError, Result};
use crate::fetch::dedup_names;
use serde_json::Value;
use std::path::Path;

/// Parse an alarm list document.
///
/// Accepts either a bare array of names or an object with an `alarms` array.
/// Names are kept byte-for-byte; entries that are entirely blank are dropped
/// and duplicates collapsed in first-seen order.
pub fn parse_alarm_list(data: &str) -> Result<Vec<String>> {
    let doc: Value = serde_json::from_str(data)?;
    let items = match doc {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("alarms") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(AlarmError::InvalidAlarmList(
                    "'alarms' must be an array of strings".into(),
                ))
            }
            None => {
                return Err(AlarmError::InvalidAlarmList(
                    "expected an array or an object with an 'alarms' key".into(),
                ))
            }
        },
        _ => {
            return Err(AlarmError::InvalidAlarmList(
                "expected an array or an object with an 'alarms' key".into(),
            ))
        }
    };

    let mut names = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        match item {
            Value::String(s) => {
                if !s.trim().is_empty() {
                    names.push(s);
                }
            }
            other => {
                return Err(AlarmError::InvalidAlarmList(format!(
                    "entry {i} is not a string: {other}"
                )))
            }
        }
    }

    let names = dedup_names(&names);
    if names.is_empty() {
        return Err(AlarmError::EmptyAlarmList);
    }
    Ok(names)
}

pub fn load_alarm_list(path: &Path) -> Result<Vec<String>> {
    let data = std::fs::read_to_string(path)?;
    let names = parse_alarm_list(&data)?;
    tracing::info!(path = %path.display(), count = names.len(), "loaded alarm list");
    Ok(names)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
