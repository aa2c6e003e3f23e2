//! Value combinators: predicates built from a literal argument.
//!
//! Each function validates its arguments once, at construction, and returns
//! a predicate that never fails. Arguments that make no sense are reported as
//! [`ConstraintError::InvalidArgument`] or
//! [`ConstraintError::UnsupportedArgumentType`].

use regex::RegexBuilder;
use serde_json::Value;

use super::literal::Literal;
use crate::constraint::Constraint;
use crate::error::{ConstraintError, ConstraintResult};
use crate::predicate::Predicate;
use crate::registry::RuleRegistry;
use crate::resolve::pattern_predicate;

/// Rule used by [`require`] when no constraint is given.
pub const DEFAULT_REQUIRE_RULE: &str = "required";

// ============================================================================
// COMPARISON
// ============================================================================

/// The subject's value equals `value` exactly.
///
/// A subject with no value compares as `""`.
pub fn equals(value: impl Into<String>) -> Predicate {
    let expected = value.into();
    Predicate::new(move |subject, _| *subject.text() == *expected)
}

/// The subject's value, parsed as a number, is strictly below `bound`.
///
/// The value is parsed leniently from its leading numeric prefix, so `"3kg"`
/// reads as `3`. A value with no numeric prefix never satisfies the predicate.
pub fn less_than(bound: impl Into<Literal>) -> ConstraintResult<Predicate> {
    let bound = numeric_bound("less_than", bound.into())?;
    Ok(Predicate::on_value(move |v| {
        parse_leading_number(v).is_some_and(|n| n < bound)
    }))
}

/// The subject's value, parsed as a number, is strictly above `bound`.
///
/// See [`less_than`] for how the value is parsed.
pub fn greater_than(bound: impl Into<Literal>) -> ConstraintResult<Predicate> {
    let bound = numeric_bound("greater_than", bound.into())?;
    Ok(Predicate::on_value(move |v| {
        parse_leading_number(v).is_some_and(|n| n > bound)
    }))
}

fn numeric_bound(combinator: &'static str, bound: Literal) -> ConstraintResult<f64> {
    match bound {
        Literal::Number(n) if n.is_nan() => Err(ConstraintError::invalid_argument(
            combinator,
            "bound must not be NaN",
        )),
        Literal::Number(n) => Ok(n),
        Literal::Missing => Err(ConstraintError::invalid_argument(
            combinator,
            "a numeric bound is required",
        )),
        other => Err(ConstraintError::invalid_argument(
            combinator,
            format!("expected a number, got {}", other.type_name()),
        )),
    }
}

/// Parses the longest numeric prefix of `input`, after leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent, and the literal `Infinity`. Returns `None` when no digits are
/// found.
pub(crate) fn parse_leading_number(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    if bytes.get(end) == Some(&b'.') {
        let frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits == 0 {
            return None;
        }
        end += 1 + frac_digits;
    } else if int_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

// ============================================================================
// LENGTH & CONTENT
// ============================================================================

/// The subject's value has between `min` and `max` characters, inclusive.
///
/// `max = None` leaves the upper end unbounded. Length counts Unicode scalar
/// values, not bytes.
///
/// # Errors
///
/// [`ConstraintError::InvalidArgument`] if `min > max`.
pub fn length(min: usize, max: impl Into<Option<usize>>) -> ConstraintResult<Predicate> {
    let max = max.into();
    if let Some(max) = max.filter(|&max| min > max) {
        return Err(ConstraintError::invalid_argument(
            "length",
            format!("min ({min}) is greater than max ({max})"),
        ));
    }
    Ok(Predicate::on_value(move |v| {
        let len = v.chars().count();
        len >= min && max.is_none_or(|max| len <= max)
    }))
}

/// The subject's value contains a match for `text`.
///
/// `text` is interpreted as a regular expression, matched case-insensitively
/// unless `case_sensitive` is set.
///
/// # Errors
///
/// [`ConstraintError::InvalidArgument`] if `text` is missing or does not
/// compile; [`ConstraintError::UnsupportedArgumentType`] if it is not text.
pub fn contains(text: impl Into<Literal>, case_sensitive: bool) -> ConstraintResult<Predicate> {
    let source = match text.into() {
        Literal::Text(source) => source,
        Literal::Missing => {
            return Err(ConstraintError::invalid_argument(
                "contains",
                "search text is required",
            ));
        }
        other => {
            return Err(ConstraintError::unsupported_argument(
                "contains",
                other.type_name(),
            ));
        }
    };
    let pattern = RegexBuilder::new(&source)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|e| ConstraintError::invalid_argument("contains", e.to_string()))?;
    Ok(pattern_predicate(pattern))
}

// ============================================================================
// SELECTION & PROPERTIES
// ============================================================================

/// Selection check for list-like subjects.
///
/// - a number compares against the selected index;
/// - text compares against the selected option's value.
///
/// A subject with nothing selected never satisfies the predicate.
///
/// # Errors
///
/// [`ConstraintError::UnsupportedArgumentType`] for any other argument.
pub fn selected(value: impl Into<Literal>) -> ConstraintResult<Predicate> {
    match value.into() {
        Literal::Number(index) => Ok(Predicate::new(move |subject, _| {
            subject
                .selected_index()
                .is_some_and(|selected| index_matches(selected, index))
        })),
        Literal::Text(expected) => Ok(Predicate::new(move |subject, _| {
            subject
                .selected_value()
                .is_some_and(|selected| *selected == *expected)
        })),
        other => Err(ConstraintError::unsupported_argument(
            "selected",
            other.type_name(),
        )),
    }
}

fn index_matches(selected: usize, index: f64) -> bool {
    selected as f64 == index
}

/// The subject's value equals the value of the sibling named `name`.
///
/// Siblings come from the [`EvalContext`](crate::EvalContext); with no
/// enclosing collection, or no sibling of that name, the predicate is false.
pub fn matches(name: impl Into<String>) -> Predicate {
    let name = name.into();
    Predicate::new(move |subject, cx| {
        cx.lookup_sibling(&name)
            .is_some_and(|sibling| sibling.text() == subject.text())
    })
}

/// Property `property` of the subject equals `value`.
///
/// Properties are looked up with [`Subject::property`](crate::Subject::property).
pub fn property_equals(property: impl Into<String>, value: impl Into<Value>) -> Predicate {
    let property = property.into();
    let expected = value.into();
    Predicate::new(move |subject, _| subject.property(&property).is_some_and(|v| v == expected))
}

/// The sibling named `name` satisfies `constraint`.
///
/// The constraint is resolved now, against `registry`, and evaluated against
/// the sibling (with the same context) instead of the subject. `None` uses
/// the [`"required"`](DEFAULT_REQUIRE_RULE) rule. A missing sibling makes the
/// predicate false.
pub fn require(
    registry: &RuleRegistry,
    name: impl Into<String>,
    constraint: Option<Constraint>,
) -> ConstraintResult<Predicate> {
    let name = name.into();
    let inner = registry.resolve(
        &constraint.unwrap_or_else(|| Constraint::from(DEFAULT_REQUIRE_RULE)),
    )?;
    Ok(Predicate::new(move |_, cx| {
        cx.lookup_sibling(&name)
            .is_some_and(|sibling| inner.test(sibling, cx))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EvalContext;
    use crate::subject::{Field, Form};
    use serde_json::json;

    #[test]
    fn equals_is_exact() {
        let p = equals("Yes");
        assert!(p.test_detached(&"Yes"));
        assert!(!p.test_detached(&"yes"));
        assert!(!p.test_detached(&"Yes "));
        assert!(equals("").test_detached(&Field::new()));
    }

    #[test]
    fn leading_number_parsing() {
        assert_eq!(parse_leading_number("3"), Some(3.0));
        assert_eq!(parse_leading_number("  -4.5kg"), Some(-4.5));
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("5."), Some(5.0));
        assert_eq!(parse_leading_number("1e3x"), Some(1000.0));
        assert_eq!(parse_leading_number("2e"), Some(2.0));
        assert_eq!(parse_leading_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_leading_number("abc"), None);
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("."), None);
        assert_eq!(parse_leading_number("-"), None);
        assert_eq!(parse_leading_number("inf"), None);
    }

    #[test]
    fn less_than_cases() {
        let p = less_than(5).unwrap();
        assert!(p.test_detached(&"3"));
        assert!(!p.test_detached(&"5"));
        assert!(!p.test_detached(&"abc"));
        assert!(!p.test_detached(&Field::new()));
    }

    #[test]
    fn greater_than_cases() {
        let p = greater_than(2.5).unwrap();
        assert!(p.test_detached(&"3"));
        assert!(!p.test_detached(&"2.5"));
        assert!(!p.test_detached(&""));
    }

    #[test]
    fn numeric_bounds_are_validated() {
        let err = less_than(f64::NAN).unwrap_err();
        assert_eq!(err.combinator(), Some("less_than"));
        assert!(matches!(err, ConstraintError::InvalidArgument { .. }));

        let err = greater_than("ten").unwrap_err();
        assert_eq!(
            err,
            ConstraintError::invalid_argument("greater_than", "expected a number, got text")
        );
        assert!(less_than("x").is_err());
    }

    #[test]
    fn length_bounds() {
        let p = length(2, 4).unwrap();
        assert!(!p.test_detached(&"a"));
        assert!(p.test_detached(&"ab"));
        assert!(p.test_detached(&"abcd"));
        assert!(!p.test_detached(&"abcde"));

        let unbounded = length(2, None).unwrap();
        assert!(!unbounded.test_detached(&""));
        assert!(unbounded.test_detached(&"ab"));
        assert!(unbounded.test_detached(&"a".repeat(1000).as_str()));
    }

    #[test]
    fn length_counts_chars() {
        assert!(length(2, 2).unwrap().test_detached(&"éé"));
    }

    #[test]
    fn length_rejects_inverted_range() {
        let err = length(5, 2).unwrap_err();
        assert_eq!(err.combinator(), Some("length"));
    }

    #[test]
    fn contains_is_case_insensitive_by_default() {
        let p = contains("foo", false).unwrap();
        assert!(p.test_detached(&"FooBar"));
        assert!(!contains("foo", true).unwrap().test_detached(&"FooBar"));
        assert!(contains("Foo", true).unwrap().test_detached(&"FooBar"));
    }

    #[test]
    fn contains_treats_text_as_pattern() {
        let p = contains(r"\d{3}", false).unwrap();
        assert!(p.test_detached(&"ab123"));
        assert!(!p.test_detached(&"ab12"));
    }

    #[test]
    fn contains_argument_errors() {
        let missing = contains(None::<&str>, false).unwrap_err();
        assert!(matches!(missing, ConstraintError::InvalidArgument { .. }));
        let bad = contains("(", false).unwrap_err();
        assert!(matches!(bad, ConstraintError::InvalidArgument { .. }));
        let number = contains(3, false).unwrap_err();
        assert!(matches!(number, ConstraintError::UnsupportedArgumentType { .. }));
    }

    #[test]
    fn selected_by_index_and_value() {
        let field = Field::select(["red", "green", "blue"], Some(1));
        assert!(selected(1).unwrap().test_detached(&field));
        assert!(!selected(0).unwrap().test_detached(&field));
        assert!(selected("green").unwrap().test_detached(&field));
        assert!(!selected("red").unwrap().test_detached(&field));

        let nothing = Field::select(["red"], None);
        assert!(!selected(0).unwrap().test_detached(&nothing));
    }

    #[test]
    fn selected_rejects_other_types() {
        let err = selected(true).unwrap_err();
        assert_eq!(err, ConstraintError::unsupported_argument("selected", "boolean"));
    }

    #[test]
    fn matches_compares_with_sibling() {
        let form = Form::new()
            .with_field("password", Field::text("hunter2"))
            .with_field("confirm", Field::text("hunter2"));
        let cx = EvalContext::with_siblings(&form);
        let p = matches("password");

        assert!(p.test(&Field::text("hunter2"), &cx));
        assert!(!p.test(&Field::text("hunter3"), &cx));
        assert!(!p.test_detached(&Field::text("hunter2")));
        assert!(!matches("nope").test(&Field::text("hunter2"), &cx));
    }

    #[test]
    fn property_equals_reads_properties() {
        let field = Field::text("x").with_property("maxlength", json!(8));
        assert!(property_equals("maxlength", 8).test_detached(&field));
        assert!(!property_equals("maxlength", 9).test_detached(&field));
        assert!(!property_equals("missing", 8).test_detached(&field));
    }

    #[test]
    fn require_evaluates_sibling() {
        let registry = RuleRegistry::new();
        let form = Form::new()
            .with_field("email", Field::text("a@example.com"))
            .with_field("phone", Field::new());
        let cx = EvalContext::with_siblings(&form);

        let needs_email = require(&registry, "email", None).unwrap();
        let needs_phone = require(&registry, "phone", None).unwrap();
        let email_valid = require(&registry, "email", Some("email".into())).unwrap();

        let anything = Field::new();
        assert!(needs_email.test(&anything, &cx));
        assert!(!needs_phone.test(&anything, &cx));
        assert!(email_valid.test(&anything, &cx));
        assert!(!require(&registry, "fax", None).unwrap().test(&anything, &cx));
        assert!(!needs_email.test_detached(&anything));
    }

    #[test]
    fn require_resolves_eagerly() {
        let registry = RuleRegistry::new();
        let err = require(&registry, "x", Some("unknown".into())).unwrap_err();
        assert!(err.is_rule_not_found());
    }
}
