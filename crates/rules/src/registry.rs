//! Rule registry: named, resolved predicates.
//!
//! A [`RuleRegistry`] is an explicit object, created once and passed to
//! whatever needs to resolve rule names. Several registries can coexist, e.g.
//! one per independent validation context.
//!
//! Registration resolves the constraint immediately, so the stored rule is
//! always a ready [`Predicate`]. Rules that reference other rules capture the
//! predicate registered under that name *at registration time*; re-registering
//! the referenced rule later does not change predicates built earlier.
//!
//! # Examples
//!
//! ```
//! use greenlight_rules::{RuleRegistry, Field};
//!
//! let mut registry = RuleRegistry::new();
//! registry.register("username", ["required", "alphanumeric"]).unwrap();
//!
//! let username = registry.lookup("username").unwrap();
//! assert!(username.test_detached(&Field::text("alice_01")));
//! assert!(!username.test_detached(&Field::text("")));
//! assert!(registry.lookup("Username").is_err());
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builtins;
use crate::constraint::Constraint;
use crate::error::{ConstraintError, ConstraintResult};
use crate::predicate::Predicate;

// ============================================================================
// RULE
// ============================================================================

/// A named, resolved predicate.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    predicate: Predicate,
}

impl Rule {
    /// The rule's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rule's predicate.
    #[must_use]
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Mapping from rule name to resolved predicate.
///
/// Mutation takes `&mut self`; wrap the registry in a lock if it has to be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: HashMap<String, Rule>,
}

impl RuleRegistry {
    /// Creates a registry with the built-in rules registered.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        builtins::register_builtins(&mut registry);
        registry
    }

    /// Creates a registry with no rules at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Resolves `constraint` and stores it under `name`, replacing any
    /// previous rule of that name.
    ///
    /// The constraint is resolved before the old rule is replaced, so a rule
    /// may be redefined in terms of its previous definition.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        constraint: impl Into<Constraint>,
    ) -> ConstraintResult<()> {
        let name = name.into();
        let predicate = self.resolve(&constraint.into())?;
        self.insert(name, predicate);
        Ok(())
    }

    /// Registers each `(name, constraint)` pair in order.
    ///
    /// Stops at the first pair that fails to resolve; pairs before it stay
    /// registered.
    pub fn register_many<I, N, C>(&mut self, entries: I) -> ConstraintResult<()>
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<Constraint>,
    {
        for (name, constraint) in entries {
            self.register(name, constraint)?;
        }
        Ok(())
    }

    /// Registers every definition in a [`RuleSet`], in order.
    pub fn load_rule_set(&mut self, rule_set: &RuleSet) -> ConstraintResult<()> {
        for definition in &rule_set.rules {
            let constraint = Constraint::from_json(&definition.constraint)?;
            self.register(definition.name.clone(), constraint)?;
        }
        tracing::debug!(count = rule_set.rules.len(), "loaded rule set");
        Ok(())
    }

    /// Returns the predicate registered under `name`.
    ///
    /// Lookup is exact and case-sensitive.
    pub fn lookup(&self, name: &str) -> ConstraintResult<Predicate> {
        self.rules
            .get(name)
            .map(|rule| rule.predicate.clone())
            .ok_or_else(|| ConstraintError::rule_not_found(name))
    }

    /// Returns the rule registered under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Returns `true` if a rule is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// All registered rule names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) fn insert(&mut self, name: String, predicate: Predicate) {
        let replaced = self.rules.contains_key(&name);
        tracing::debug!(rule = %name, replaced, "registered rule");
        self.rules.insert(name.clone(), Rule { name, predicate });
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// A rule definition as it appears in configuration.
///
/// `constraint` uses the JSON encoding understood by
/// [`Constraint::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    /// Name to register the rule under.
    pub name: String,
    /// JSON-encoded constraint.
    pub constraint: Value,
}

/// An ordered list of rule definitions, loaded with
/// [`RuleRegistry::load_rule_set`].
///
/// ```json
/// { "rules": [
///     { "name": "zip", "constraint": { "pattern": "^\\d{5}$" } },
///     { "name": "zip_required", "constraint": ["required", "zip"] }
/// ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Definitions, registered in order.
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

impl RuleSet {
    /// Parses a rule set from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Appends a definition, builder style.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_rule(mut self, name: impl Into<String>, constraint: Value) -> Self {
        self.rules.push(RuleDefinition {
            name: name.into(),
            constraint,
        });
        self
    }
}
