//! # greenlight-rules
//!
//! A constraint-combinator engine: turn rule names, regular expressions,
//! predicate closures, and nested sequences of them into one evaluable
//! predicate.
//!
//! ## Quick Start
//!
//! ```
//! use greenlight_rules::prelude::*;
//!
//! let mut engine = Engine::new();
//! engine.register_rule("username", ["required", "alphanumeric"]).unwrap();
//!
//! let short = length(3, 20).unwrap();
//! let username = engine.and([Constraint::from("username"), short.into()]).unwrap();
//!
//! assert!(username.test_detached(&Field::text("alice_01")));
//! assert!(!username.test_detached(&Field::text("al")));
//! ```
//!
//! ## Concepts
//!
//! - [`Constraint`]: anything constraint-like, before resolution.
//! - [`Predicate`]: the resolved form; evaluating one never fails.
//! - [`RuleRegistry`]: named predicates, with the built-ins `alpha`,
//!   `alphanumeric`, `email`, `checked`, `empty`, `required`, `enabled`.
//! - [`Subject`] and [`EvalContext`]: what a predicate is evaluated against,
//!   and where it finds sibling subjects.
//! - [`combinators`]: `and`, `or`, `xor`, `implies`, `not` and the value
//!   combinators. XOR and IMPLIES are cumulative left folds.
//!
//! Every argument check happens when a predicate is built and is reported as
//! a [`ConstraintError`].

mod builtins;
pub mod combinators;
mod constraint;
mod context;
mod engine;
mod error;
pub mod prelude;
mod predicate;
mod readiness;
mod registry;
mod resolve;
mod subject;

pub use builtins::BUILTIN_RULES;
pub use combinators::{Literal, LogicalOp};
pub use constraint::Constraint;
pub use context::EvalContext;
pub use engine::Engine;
pub use error::{ConstraintError, ConstraintResult};
pub use predicate::Predicate;
pub use readiness::Readiness;
pub use registry::{Rule, RuleDefinition, RuleRegistry, RuleSet};
pub use subject::{Field, Form, Siblings, Subject};
