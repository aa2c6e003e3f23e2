//! The public façade: a registry plus readiness, with the combinators bound
//! to that registry.
//!
//! # Examples
//!
//! ```
//! use greenlight_rules::{Engine, EvalContext, Field, Form};
//!
//! let mut engine = Engine::new();
//! engine.register_rule("zip", regex::Regex::new(r"^\d{5}$").unwrap()).unwrap();
//!
//! let zip_or_empty = engine.or(["zip", "empty"]).unwrap();
//! assert!(zip_or_empty.test_detached(&Field::text("12345")));
//! assert!(zip_or_empty.test_detached(&Field::text("")));
//! assert!(!zip_or_empty.test_detached(&Field::text("1234")));
//!
//! let form = Form::new().with_field("country", Field::text("US"));
//! let needs_country = engine.require("country", None).unwrap();
//! assert!(needs_country.test(&Field::new(), &EvalContext::with_siblings(&form)));
//! ```

use crate::combinators;
use crate::constraint::Constraint;
use crate::error::ConstraintResult;
use crate::predicate::Predicate;
use crate::readiness::Readiness;
use crate::registry::{RuleRegistry, RuleSet};

/// Rule registry and readiness flag behind one handle.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    registry: RuleRegistry,
    readiness: Readiness,
}

impl Engine {
    /// An engine with the built-in rules and a pending readiness flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine over an existing registry and readiness flag.
    #[must_use]
    pub fn with_parts(registry: RuleRegistry, readiness: Readiness) -> Self {
        Self {
            registry,
            readiness,
        }
    }

    /// The underlying registry.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Mutable access to the underlying registry.
    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    /// The readiness flag; clone it to hand to the host environment.
    #[must_use]
    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }

    /// Whether the host environment has reported ready.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.readiness.is_ready()
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// See [`RuleRegistry::register`].
    pub fn register_rule(
        &mut self,
        name: impl Into<String>,
        constraint: impl Into<Constraint>,
    ) -> ConstraintResult<()> {
        self.registry.register(name, constraint)
    }

    /// See [`RuleRegistry::register_many`].
    pub fn register_rules<I, N, C>(&mut self, entries: I) -> ConstraintResult<()>
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<Constraint>,
    {
        self.registry.register_many(entries)
    }

    /// See [`RuleRegistry::load_rule_set`].
    pub fn load_rule_set(&mut self, rule_set: &RuleSet) -> ConstraintResult<()> {
        self.registry.load_rule_set(rule_set)
    }

    /// See [`RuleRegistry::to_predicate`].
    pub fn to_predicate(&self, constraint: impl Into<Constraint>) -> ConstraintResult<Predicate> {
        self.registry.to_predicate(constraint)
    }

    // ------------------------------------------------------------------------
    // Combinators
    // ------------------------------------------------------------------------

    /// See [`combinators::and`].
    pub fn and<I, C>(&self, operands: I) -> ConstraintResult<Predicate>
    where
        I: IntoIterator<Item = C>,
        C: Into<Constraint>,
    {
        combinators::and(&self.registry, operands)
    }

    /// See [`combinators::or`].
    pub fn or<I, C>(&self, operands: I) -> ConstraintResult<Predicate>
    where
        I: IntoIterator<Item = C>,
        C: Into<Constraint>,
    {
        combinators::or(&self.registry, operands)
    }

    /// See [`combinators::xor`]. Cumulative parity over the operands.
    pub fn xor<I, C>(&self, operands: I) -> ConstraintResult<Predicate>
    where
        I: IntoIterator<Item = C>,
        C: Into<Constraint>,
    {
        combinators::xor(&self.registry, operands)
    }

    /// See [`combinators::implies`]. Left-folded implication.
    pub fn implies<I, C>(&self, operands: I) -> ConstraintResult<Predicate>
    where
        I: IntoIterator<Item = C>,
        C: Into<Constraint>,
    {
        combinators::implies(&self.registry, operands)
    }

    /// See [`combinators::not`].
    pub fn not(&self, operand: impl Into<Constraint>) -> ConstraintResult<Predicate> {
        combinators::not(&self.registry, operand)
    }

    /// See [`combinators::require`].
    pub fn require(
        &self,
        name: impl Into<String>,
        constraint: Option<Constraint>,
    ) -> ConstraintResult<Predicate> {
        combinators::require(&self.registry, name, constraint)
    }
}
