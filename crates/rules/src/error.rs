//! Error types for constraint resolution and combinator construction.
//!
//! Only resolution and construction can fail. Once a [`Predicate`](crate::Predicate)
//! exists, evaluating it always yields a plain `bool`.

use std::borrow::Cow;

/// Errors raised while turning constraint-like input into a predicate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintError {
    /// A rule was referenced by name but never registered.
    #[error("rule '{name}' not found")]
    RuleNotFound {
        /// The name that failed to resolve.
        name: String,
    },

    /// A constraint-like value did not match any recognised shape.
    #[error("unsupported constraint type: {found}")]
    UnsupportedConstraintType {
        /// Short description of what was supplied.
        found: Cow<'static, str>,
    },

    /// A combinator received a malformed literal argument.
    #[error("invalid argument for `{combinator}`: {reason}")]
    InvalidArgument {
        /// The combinator that rejected the argument.
        combinator: &'static str,
        /// Why the argument was rejected.
        reason: Cow<'static, str>,
    },

    /// A type-dispatching combinator received an argument type it has no behavior for.
    #[error("unsupported argument type for `{combinator}`: {found}")]
    UnsupportedArgumentType {
        /// The combinator that rejected the argument.
        combinator: &'static str,
        /// The argument type that was supplied.
        found: &'static str,
    },
}

impl ConstraintError {
    /// Creates a [`ConstraintError::RuleNotFound`] error.
    pub fn rule_not_found(name: impl Into<String>) -> Self {
        Self::RuleNotFound { name: name.into() }
    }

    /// Creates a [`ConstraintError::UnsupportedConstraintType`] error.
    pub fn unsupported_constraint(found: impl Into<Cow<'static, str>>) -> Self {
        Self::UnsupportedConstraintType {
            found: found.into(),
        }
    }

    /// Creates a [`ConstraintError::InvalidArgument`] error.
    pub fn invalid_argument(
        combinator: &'static str,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidArgument {
            combinator,
            reason: reason.into(),
        }
    }

    /// Creates a [`ConstraintError::UnsupportedArgumentType`] error.
    pub fn unsupported_argument(combinator: &'static str, found: &'static str) -> Self {
        Self::UnsupportedArgumentType { combinator, found }
    }

    /// Returns `true` for [`ConstraintError::RuleNotFound`].
    #[must_use]
    pub fn is_rule_not_found(&self) -> bool {
        matches!(self, Self::RuleNotFound { .. })
    }

    /// Returns the combinator name for argument errors.
    #[must_use]
    pub fn combinator(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { combinator, .. }
            | Self::UnsupportedArgumentType { combinator, .. } => Some(combinator),
            _ => None,
        }
    }
}

/// Result alias for constraint construction and resolution.
pub type ConstraintResult<T> = Result<T, ConstraintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_not_found_display() {
        let error = ConstraintError::rule_not_found("zipcode");
        assert_eq!(error.to_string(), "rule 'zipcode' not found");
        assert!(error.is_rule_not_found());
        assert_eq!(error.combinator(), None);
    }

    #[test]
    fn invalid_argument_display() {
        let error = ConstraintError::invalid_argument("less_than", "expected a number");
        assert_eq!(
            error.to_string(),
            "invalid argument for `less_than`: expected a number"
        );
        assert_eq!(error.combinator(), Some("less_than"));
    }

    #[test]
    fn unsupported_argument_display() {
        let error = ConstraintError::unsupported_argument("selected", "bool");
        assert_eq!(
            error.to_string(),
            "unsupported argument type for `selected`: bool"
        );
    }

    #[test]
    fn static_found_is_borrowed() {
        let error = ConstraintError::unsupported_constraint("number");
        match error {
            ConstraintError::UnsupportedConstraintType { found } => {
                assert!(matches!(found, Cow::Borrowed("number")));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
