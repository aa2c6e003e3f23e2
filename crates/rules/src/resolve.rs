//! Constraint resolution: turning any [`Constraint`] into a [`Predicate`].

use regex::Regex;

use crate::combinators::LogicalOp;
use crate::constraint::Constraint;
use crate::error::{ConstraintError, ConstraintResult};
use crate::predicate::Predicate;
use crate::registry::RuleRegistry;

impl RuleRegistry {
    /// Resolves a constraint against this registry.
    ///
    /// - a predicate resolves to itself;
    /// - a pattern becomes a regex search over the subject's value;
    /// - a rule name resolves through [`lookup`](Self::lookup);
    /// - a sequence resolves each element, drops [`Constraint::Absent`]
    ///   elements, and AND-folds the rest left to right. An empty sequence is
    ///   the constant-true predicate and a single survivor is returned as is.
    ///
    /// A top-level [`Constraint::Absent`] fails with
    /// [`ConstraintError::UnsupportedConstraintType`].
    pub fn resolve(&self, constraint: &Constraint) -> ConstraintResult<Predicate> {
        match constraint {
            Constraint::Predicate(predicate) => Ok(predicate.clone()),
            Constraint::Pattern(pattern) => Ok(pattern_predicate(pattern.clone())),
            Constraint::Rule(name) => self.lookup(name),
            Constraint::Sequence(items) => self.resolve_sequence(items),
            Constraint::Absent => Err(ConstraintError::unsupported_constraint(
                constraint.kind(),
            )),
        }
    }

    /// Converts anything constraint-like into a predicate.
    pub fn to_predicate(&self, constraint: impl Into<Constraint>) -> ConstraintResult<Predicate> {
        self.resolve(&constraint.into())
    }

    /// Resolves each operand in order, failing on the first error.
    pub(crate) fn resolve_each<I, C>(&self, operands: I) -> ConstraintResult<Vec<Predicate>>
    where
        I: IntoIterator<Item = C>,
        C: Into<Constraint>,
    {
        operands
            .into_iter()
            .map(|operand| self.to_predicate(operand))
            .collect()
    }

    fn resolve_sequence(&self, items: &[Constraint]) -> ConstraintResult<Predicate> {
        let mut predicates = Vec::with_capacity(items.len());
        for item in items {
            if matches!(item, Constraint::Absent) {
                continue;
            }
            predicates.push(self.resolve(item)?);
        }
        tracing::trace!(
            elements = items.len(),
            kept = predicates.len(),
            "resolved sequence"
        );
        Ok(LogicalOp::And.fold(predicates))
    }
}

/// Wraps a regex as a predicate searching the subject's value.
///
/// A subject with no value is searched as `""`.
pub(crate) fn pattern_predicate(pattern: Regex) -> Predicate {
    Predicate::new(move |subject, _| pattern.is_match(&subject.text()))
}
