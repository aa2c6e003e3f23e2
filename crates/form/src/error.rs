//! Error types for form validation.

use greenlight_rules::ConstraintError;

/// Errors raised by value filters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// A filter was named that does not exist.
    #[error("unknown filter '{name}'")]
    UnknownFilter {
        /// The name as written.
        name: String,
    },

    /// A replace filter's pattern did not compile.
    #[error("invalid replace pattern: {reason}")]
    InvalidPattern {
        /// The regex compiler's message.
        reason: String,
    },
}

/// Errors raised by [`FormValidator`](crate::FormValidator).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// The validator was created without a form id.
    #[error("no form id provided")]
    MissingFormId,

    /// A field was validated that was never registered.
    #[error("form field '{name}' not registered")]
    Unregistered {
        /// The field name.
        name: String,
    },

    /// A registered field is not present in the form being validated.
    #[error("form field '{name}' is missing from the form")]
    FieldMissing {
        /// The field name.
        name: String,
    },

    /// An input's constraint failed to resolve.
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    /// An input's filter specification was invalid.
    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl FormError {
    /// Creates a [`FormError::Unregistered`] error.
    pub fn unregistered(name: impl Into<String>) -> Self {
        Self::Unregistered { name: name.into() }
    }

    /// Creates a [`FormError::FieldMissing`] error.
    pub fn field_missing(name: impl Into<String>) -> Self {
        Self::FieldMissing { name: name.into() }
    }
}

/// Result type for form operations.
pub type FormResult<T> = Result<T, FormError>;
