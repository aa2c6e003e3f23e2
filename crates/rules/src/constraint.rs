//! Constraint-like input: the tagged union the resolver accepts.
//!
//! Callers hand the engine predicates, regular expressions, rule names, or
//! sequences of these. [`Constraint`] names each shape explicitly, and the
//! `From` conversions below map native Rust values onto it so call sites can
//! stay terse:
//!
//! ```
//! use greenlight_rules::{Constraint, Predicate, constraints};
//! use regex::Regex;
//!
//! let zip = Regex::new(r"^\d{5}$").unwrap();
//! let c: Constraint = constraints!["required", zip, Predicate::always()];
//! assert!(matches!(c, Constraint::Sequence(ref items) if items.len() == 3));
//! ```
//!
//! Constraints read from configuration go through [`Constraint::from_json`].

use std::fmt;

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::error::{ConstraintError, ConstraintResult};
use crate::predicate::Predicate;

/// A constraint-like value, before resolution.
#[derive(Clone)]
pub enum Constraint {
    /// An already-resolved predicate; resolves to itself.
    Predicate(Predicate),
    /// A regular expression searched for in the subject's value.
    Pattern(Regex),
    /// The name of a registered rule.
    Rule(String),
    /// An ordered sequence, combined with AND from left to right.
    Sequence(Vec<Constraint>),
    /// An element that resolves to nothing.
    ///
    /// Dropped when it appears inside a [`Sequence`](Constraint::Sequence);
    /// anywhere else it is an unsupported constraint.
    Absent,
}

impl Constraint {
    /// Wraps a closure over the subject and context.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&dyn crate::Subject, &crate::EvalContext<'_>) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Predicate::new(f))
    }

    /// Compiles `pattern` into a [`Constraint::Pattern`].
    pub fn pattern(pattern: &str) -> ConstraintResult<Self> {
        compile_pattern(pattern, "")
    }

    /// Short description of the variant, used in error messages and logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Predicate(_) => "predicate",
            Self::Pattern(_) => "pattern",
            Self::Rule(_) => "rule",
            Self::Sequence(_) => "sequence",
            Self::Absent => "absent",
        }
    }

    /// Converts a JSON literal into a constraint.
    ///
    /// | JSON | constraint |
    /// |---|---|
    /// | string | rule name |
    /// | array | sequence (elements converted recursively) |
    /// | `null` | absent |
    /// | `{"pattern": "...", "flags": "i"}` | pattern; `flags` is optional |
    ///
    /// Numbers, booleans, and any other object fail with
    /// [`ConstraintError::UnsupportedConstraintType`]. A pattern that does not
    /// compile fails with [`ConstraintError::InvalidArgument`].
    pub fn from_json(value: &Value) -> ConstraintResult<Self> {
        match value {
            Value::String(name) => Ok(Self::Rule(name.clone())),
            Value::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<ConstraintResult<Vec<_>>>()
                .map(Self::Sequence),
            Value::Null => Ok(Self::Absent),
            Value::Object(map) => {
                let pattern = map.get("pattern").and_then(Value::as_str).ok_or_else(|| {
                    ConstraintError::unsupported_constraint("object without a `pattern` string")
                })?;
                let flags = map.get("flags").and_then(Value::as_str).unwrap_or_default();
                compile_pattern(pattern, flags)
            }
            Value::Bool(_) => Err(ConstraintError::unsupported_constraint("boolean")),
            Value::Number(_) => Err(ConstraintError::unsupported_constraint("number")),
        }
    }
}

fn compile_pattern(pattern: &str, flags: &str) -> ConstraintResult<Constraint> {
    let mut builder = RegexBuilder::new(pattern);
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            other => {
                return Err(ConstraintError::invalid_argument(
                    "pattern",
                    format!("unknown flag '{other}'"),
                ));
            }
        };
    }
    builder
        .build()
        .map(Constraint::Pattern)
        .map_err(|e| ConstraintError::invalid_argument("pattern", e.to_string()))
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate(p) => f.debug_tuple("Predicate").field(p).finish(),
            Self::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Self::Rule(name) => f.debug_tuple("Rule").field(name).finish(),
            Self::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            Self::Absent => f.write_str("Absent"),
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<Predicate> for Constraint {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }
}

impl From<&Predicate> for Constraint {
    fn from(predicate: &Predicate) -> Self {
        Self::Predicate(predicate.clone())
    }
}

impl From<Regex> for Constraint {
    fn from(pattern: Regex) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<&Regex> for Constraint {
    fn from(pattern: &Regex) -> Self {
        Self::Pattern(pattern.clone())
    }
}

impl From<&str> for Constraint {
    fn from(name: &str) -> Self {
        Self::Rule(name.to_owned())
    }
}

impl From<String> for Constraint {
    fn from(name: String) -> Self {
        Self::Rule(name)
    }
}

impl From<&String> for Constraint {
    fn from(name: &String) -> Self {
        Self::Rule(name.clone())
    }
}

impl<T: Into<Constraint>> From<Vec<T>> for Constraint {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Constraint>, const N: usize> From<[T; N]> for Constraint {
    fn from(items: [T; N]) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Constraint>> From<Option<T>> for Constraint {
    fn from(item: Option<T>) -> Self {
        item.map_or(Self::Absent, Into::into)
    }
}

impl TryFrom<Value> for Constraint {
    type Error = ConstraintError;

    fn try_from(value: Value) -> ConstraintResult<Self> {
        Self::from_json(&value)
    }
}

impl TryFrom<&Value> for Constraint {
    type Error = ConstraintError;

    fn try_from(value: &Value) -> ConstraintResult<Self> {
        Self::from_json(value)
    }
}

// ============================================================================
// MACRO
// ============================================================================

/// Builds a [`Constraint::Sequence`] from heterogeneous items.
///
/// Each item is converted with `Constraint::from`, so rule names, regexes,
/// predicates, and nested sequences can be mixed freely.
///
/// ```rust,ignore
/// let c = constraints!["required", Regex::new(r"^\d+$")?, constraints!["alpha"]];
/// ```
#[macro_export]
macro_rules! constraints {
    () => {
        $crate::Constraint::Sequence(::std::vec::Vec::new())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Constraint::Sequence(::std::vec![$($crate::Constraint::from($item)),+])
    };
}
