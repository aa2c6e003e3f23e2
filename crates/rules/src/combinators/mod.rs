//! Combinators that build predicates from constraints and literals.
//!
//! - [`logical`]: `and`, `or`, `xor`, `implies`, `not` over constraints.
//! - [`value`]: comparisons, length, content, selection, sibling checks.
//! - [`affix`]: prefix, suffix, and file-extension checks.
//!
//! Combinators that take constraints resolve them immediately against a
//! [`RuleRegistry`](crate::RuleRegistry), so every construction error surfaces
//! here and the returned predicates never fail.

pub mod affix;
pub mod literal;
pub mod logical;
pub mod value;

pub use affix::{accept, ends_with, starts_with};
pub use literal::Literal;
pub use logical::{LogicalOp, and, implies, not, or, xor};
pub use value::{
    DEFAULT_REQUIRE_RULE, contains, equals, greater_than, length, less_than, matches,
    property_equals, require, selected,
};
