use crate::error::{AlarmError, Result};
use crate::types::AlarmState;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// A validated target identifier together with the normalized set of states
/// it should be applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub target: String,
    pub states: BTreeSet<AlarmState>,
}

// ---------------------------------------------------------------------------
// Topic ARN
// ---------------------------------------------------------------------------

static TOPIC_ARN_RE: OnceLock<Regex> = OnceLock::new();

fn topic_arn_re() -> &'static Regex {
    TOPIC_ARN_RE.get_or_init(|| {
        Regex::new(r"^arn:aws(-[a-z]+)*:sns:[a-z0-9-]+:\d{12}:[A-Za-z0-9_-]{1,256}(\.fifo)?$")
            .unwrap()
    })
}

pub fn validate_target(identifier: &str) -> Result<String> {
    let target = identifier.trim();
    if target.is_empty() {
        return Err(AlarmError::EmptyIdentifier);
    }
    if !topic_arn_re().is_match(target) {
        return Err(AlarmError::MalformedIdentifier(target.to_string()));
    }
    Ok(target.to_string())
}

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// Normalize requested state names. Blank entries are skipped; every other
/// entry must name one of the three alarm states (case-insensitive).
pub fn validate_states<S: AsRef<str>>(states: &[S]) -> Result<BTreeSet<AlarmState>> {
    let mut set = BTreeSet::new();
    for raw in states {
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            continue;
        }
        set.insert(raw.parse::<AlarmState>()?);
    }
    if set.is_empty() {
        return Err(AlarmError::NoStatesSelected);
    }
    Ok(set)
}

/// Split a comma-separated state list such as `"OK, IN_ALARM"`.
pub fn parse_state_list(list: &str) -> Result<BTreeSet<AlarmState>> {
    let parts: Vec<&str> = list.split(',').collect();
    validate_states(&parts)
}

/// Per-state booleans, as supplied by workflow-dispatch style inputs.
pub fn states_from_flags(
    ok: bool,
    in_alarm: bool,
    insufficient_data: bool,
) -> Result<BTreeSet<AlarmState>> {
    let set: BTreeSet<AlarmState> = [
        (ok, AlarmState::Ok),
        (in_alarm, AlarmState::InAlarm),
        (insufficient_data, AlarmState::InsufficientData),
    ]
    .into_iter()
    .filter_map(|(on, state)| on.then_some(state))
    .collect();
    if set.is_empty() {
        return Err(AlarmError::NoStatesSelected);
    }
    Ok(set)
}

pub fn validate<S: AsRef<str>>(identifier: &str, states: &[S]) -> Result<Selection> {
    let target = validate_target(identifier)?;
    let states = validate_states(states)?;
    Ok(Selection { target, states })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TOPIC: &str = "arn:aws:sns:us-east-1:123456789012:ops-alerts";

    #[test]
    fn valid_selection() {
        let sel = validate(TOPIC, &["OK", "in_alarm"]).unwrap();
        assert_eq!(sel.target, TOPIC);
        assert_eq!(
            sel.states.into_iter().collect::<Vec<_>>(),
            vec![AlarmState::Ok, AlarmState::InAlarm]
        );
    }

    #[test]
    fn empty_identifier() {
        assert!(matches!(
            validate("   ", &["OK"]),
            Err(AlarmError::EmptyIdentifier)
        ));
    }

    #[test]
    fn malformed_identifier() {
        for bad in [
            "topicX",
            "arn:aws:sqs:us-east-1:123456789012:queue",
            "arn:aws:sns:us-east-1:1234:short-account",
            "arn:aws:sns:us-east-1:123456789012:",
        ] {
            assert!(
                matches!(validate_target(bad), Err(AlarmError::MalformedIdentifier(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn other_partitions_and_fifo_topics_accepted() {
        validate_target("arn:aws-us-gov:sns:us-gov-west-1:123456789012:alerts").unwrap();
        validate_target("arn:aws-cn:sns:cn-north-1:123456789012:alerts.fifo").unwrap();
    }

    #[test]
    fn identifier_is_trimmed() {
        assert_eq!(validate_target(&format!(" {TOPIC}\n")).unwrap(), TOPIC);
    }

    #[test]
    fn alarm_is_not_in_alarm() {
        let err = validate(TOPIC, &["ALARM"]).unwrap_err();
        assert!(matches!(err, AlarmError::InvalidState(s) if s == "ALARM"));
    }

    #[test]
    fn zero_states() {
        let none: [&str; 0] = [];
        assert!(matches!(
            validate(TOPIC, &none),
            Err(AlarmError::NoStatesSelected)
        ));
    }

    #[test]
    fn state_list_dedups_and_skips_blanks() {
        let set = parse_state_list("OK, ok,,INSUFFICIENT_DATA ").unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&AlarmState::InsufficientData));
    }

    #[test]
    fn blank_state_list_selects_nothing() {
        assert!(matches!(
            parse_state_list(" , "),
            Err(AlarmError::NoStatesSelected)
        ));
    }

    #[test]
    fn flags_map_to_states() {
        let set = states_from_flags(false, true, true).unwrap();
        assert!(!set.contains(&AlarmState::Ok));
        assert!(set.contains(&AlarmState::InAlarm));
        assert!(matches!(
            states_from_flags(false, false, false),
            Err(AlarmError::NoStatesSelected)
        ));
    }
}
