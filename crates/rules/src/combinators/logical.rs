//! Logical combinators: AND, OR, XOR, IMPLIES and NOT.
//!
//! The variadic operators are **left folds**. `xor(a, b, c)` evaluates as
//! `(a XOR b) XOR c`, which is true when an odd number of operands hold, not
//! when exactly one does. `implies(a, b, c)` evaluates as
//! `((a -> b) -> c)`, not as a chain `a -> b -> c`. Both are deliberate and
//! must not be "fixed" into textbook n-ary semantics.
//!
//! Evaluation runs left to right. AND, OR and IMPLIES skip the remaining
//! operand evaluation once the accumulated result decides it; XOR always
//! evaluates every operand.
//!
//! # Examples
//!
//! ```
//! use greenlight_rules::{Predicate, RuleRegistry, combinators};
//!
//! let registry = RuleRegistry::new();
//! let t = Predicate::always();
//! let f = Predicate::never();
//!
//! let odd = combinators::xor(&registry, [&t, &t, &t]).unwrap();
//! assert!(odd.test_detached(&""));
//!
//! let p = combinators::implies(&registry, [&f, &f, &f]).unwrap();
//! // ((false -> false) -> false) == (true -> false) == false
//! assert!(!p.test_detached(&""));
//! ```

use crate::constraint::Constraint;
use crate::error::ConstraintResult;
use crate::predicate::Predicate;
use crate::registry::RuleRegistry;

/// A binary logical operator used to fold operand predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    /// Logical conjunction.
    And,
    /// Logical disjunction.
    Or,
    /// Boolean inequality, `!a != !b`.
    Xor,
    /// Material implication, `!a || b`.
    Implies,
}

impl LogicalOp {
    /// The operator's left identity: the result of folding zero operands.
    #[must_use]
    pub fn identity(self) -> bool {
        match self {
            Self::And | Self::Implies => true,
            Self::Or | Self::Xor => false,
        }
    }

    /// Combines the accumulated result with the next operand.
    ///
    /// `next` is only called when the operator needs it.
    #[inline]
    pub fn apply(self, acc: bool, next: impl FnOnce() -> bool) -> bool {
        match self {
            Self::And => acc && next(),
            Self::Or => acc || next(),
            Self::Xor => acc != next(),
            Self::Implies => !acc || next(),
        }
    }

    /// Left-folds `predicates` into a single predicate.
    ///
    /// Zero predicates give the constant identity; one predicate is returned
    /// unchanged.
    #[must_use]
    pub fn fold(self, mut predicates: Vec<Predicate>) -> Predicate {
        if predicates.len() <= 1 {
            return predicates.pop().unwrap_or_else(|| self.constant());
        }
        Predicate::new(move |subject, cx| {
            let Some((first, rest)) = predicates.split_first() else {
                return self.identity();
            };
            rest.iter().fold(first.test(subject, cx), |acc, p| {
                self.apply(acc, || p.test(subject, cx))
            })
        })
    }

    fn constant(self) -> Predicate {
        if self.identity() {
            Predicate::always()
        } else {
            Predicate::never()
        }
    }
}

// ============================================================================
// FREE FUNCTIONS
// ============================================================================

fn combine<I, C>(registry: &RuleRegistry, op: LogicalOp, operands: I) -> ConstraintResult<Predicate>
where
    I: IntoIterator<Item = C>,
    C: Into<Constraint>,
{
    let predicates = registry.resolve_each(operands)?;
    tracing::trace!(?op, operands = predicates.len(), "combined predicates");
    Ok(op.fold(predicates))
}

/// All operands must hold. Zero operands give the constant-true predicate.
pub fn and<I, C>(registry: &RuleRegistry, operands: I) -> ConstraintResult<Predicate>
where
    I: IntoIterator<Item = C>,
    C: Into<Constraint>,
{
    combine(registry, LogicalOp::And, operands)
}

/// At least one operand must hold. Zero operands give the constant-false predicate.
pub fn or<I, C>(registry: &RuleRegistry, operands: I) -> ConstraintResult<Predicate>
where
    I: IntoIterator<Item = C>,
    C: Into<Constraint>,
{
    combine(registry, LogicalOp::Or, operands)
}

/// Cumulative parity: true when an odd number of operands hold.
pub fn xor<I, C>(registry: &RuleRegistry, operands: I) -> ConstraintResult<Predicate>
where
    I: IntoIterator<Item = C>,
    C: Into<Constraint>,
{
    combine(registry, LogicalOp::Xor, operands)
}

/// Left-folded implication: `implies(a, b, c)` is `((a -> b) -> c)`.
pub fn implies<I, C>(registry: &RuleRegistry, operands: I) -> ConstraintResult<Predicate>
where
    I: IntoIterator<Item = C>,
    C: Into<Constraint>,
{
    combine(registry, LogicalOp::Implies, operands)
}

/// Negation of a single operand.
pub fn not(registry: &RuleRegistry, operand: impl Into<Constraint>) -> ConstraintResult<Predicate> {
    Ok(registry.to_predicate(operand)?.negate())
}

// ============================================================================
// FLUENT COMBINATION
// ============================================================================

impl Predicate {
    /// `self AND other`.
    #[must_use]
    pub fn and(&self, other: &Predicate) -> Predicate {
        LogicalOp::And.fold(vec![self.clone(), other.clone()])
    }

    /// `self OR other`.
    #[must_use]
    pub fn or(&self, other: &Predicate) -> Predicate {
        LogicalOp::Or.fold(vec![self.clone(), other.clone()])
    }

    /// `self XOR other`.
    #[must_use]
    pub fn xor(&self, other: &Predicate) -> Predicate {
        LogicalOp::Xor.fold(vec![self.clone(), other.clone()])
    }

    /// `self -> other`.
    #[must_use]
    pub fn implies(&self, other: &Predicate) -> Predicate {
        LogicalOp::Implies.fold(vec![self.clone(), other.clone()])
    }
}
