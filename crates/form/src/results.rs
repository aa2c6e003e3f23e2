//! Validation outcomes and helpers over lists of them.

use serde::Serialize;

/// The result of validating one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    /// Field name.
    pub name: String,
    /// Whether the field's constraint held.
    pub success: bool,
    /// The field's message in the current locale, if one is configured.
    ///
    /// Present whether or not validation failed.
    pub error_message: Option<String>,
}

impl ValidationOutcome {
    /// The error message, but only if validation failed.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        if self.success {
            None
        } else {
            self.error_message.as_deref().filter(|m| !m.is_empty())
        }
    }
}

/// Returns `true` if every outcome succeeded. An empty list passes.
#[must_use]
pub fn all_passed(outcomes: &[ValidationOutcome]) -> bool {
    outcomes.iter().all(|outcome| outcome.success)
}

/// Messages of the failed outcomes, in order. Failures without a message
/// are skipped.
#[must_use]
pub fn error_messages(outcomes: &[ValidationOutcome]) -> Vec<&str> {
    outcomes
        .iter()
        .filter_map(ValidationOutcome::failure_message)
        .collect()
}

/// Names of the failed outcomes, in order.
pub fn failed_names(outcomes: &[ValidationOutcome]) -> impl Iterator<Item = &str> {
    outcomes
        .iter()
        .filter(|outcome| !outcome.success)
        .map(|outcome| outcome.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn outcome(name: &str, success: bool, message: Option<&str>) -> ValidationOutcome {
        ValidationOutcome {
            name: name.to_owned(),
            success,
            error_message: message.map(str::to_owned),
        }
    }

    #[test]
    fn empty_list_passes() {
        assert!(all_passed(&[]));
        assert!(error_messages(&[]).is_empty());
    }

    #[test]
    fn collects_failed_messages_only() {
        let outcomes = vec![
            outcome("a", true, Some("A is wrong")),
            outcome("b", false, Some("B is wrong")),
            outcome("c", false, None),
            outcome("d", false, Some("D is wrong")),
        ];
        assert!(!all_passed(&outcomes));
        assert_eq!(error_messages(&outcomes), vec!["B is wrong", "D is wrong"]);
        assert_eq!(failed_names(&outcomes).collect::<Vec<_>>(), vec!["b", "c", "d"]);
    }
}
