//! Prelude module for convenient imports.
//!
//! ```
//! use greenlight_rules::prelude::*;
//!
//! let p = starts_with(["+1"]).unwrap();
//! assert!(p.test_detached(&Field::text("+1 555 0100")));
//! ```

// ============================================================================
// CORE TYPES
// ============================================================================

pub use crate::{
    Constraint, ConstraintError, ConstraintResult, Engine, EvalContext, Field, Form, Literal,
    LogicalOp, Predicate, Readiness, RuleRegistry, RuleSet, Siblings, Subject,
};

// ============================================================================
// COMBINATORS
// ============================================================================

pub use crate::combinators::{
    accept, and, contains, ends_with, equals, greater_than, implies, length, less_than, matches,
    not, or, property_equals, require, selected, starts_with, xor,
};

pub use crate::constraints;
