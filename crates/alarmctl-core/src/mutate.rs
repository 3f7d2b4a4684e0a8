use crate::types::{Classification, Operation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub actions: Vec<String>,
    pub classification: Classification,
}

/// Add or remove `target` from one state's ordered action list.
///
/// Entries other than `target` keep their relative order. ADD never creates
/// a duplicate; REMOVE drops only the first match. REMOVE of an absent
/// target and ADD of a present one both
/// return the list untouched as [`Classification::NotApplicable`].
pub fn mutate(current: &[String], op: Operation, target: &str) -> Mutation {
    let position = current.iter().position(|a| a == target);
    match (op, position) {
        (Operation::Add, Some(_)) | (Operation::Remove, None) => Mutation {
            actions: current.to_vec(),
            classification: Classification::NotApplicable,
        },
        (Operation::Add, None) => {
            let mut actions = Vec::with_capacity(current.len() + 1);
            actions.extend_from_slice(current);
            actions.push(target.to_string());
            Mutation {
                actions,
                classification: Classification::Added,
            }
        }
        (Operation::Remove, Some(idx)) => {
            let mut actions = current.to_vec();
            actions.remove(idx);
            Mutation {
                actions,
                classification: Classification::Removed,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
