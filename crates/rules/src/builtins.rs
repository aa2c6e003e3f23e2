//! Rules every [`RuleRegistry::new`] starts with.

use std::sync::LazyLock;

use regex::Regex;

use crate::predicate::Predicate;
use crate::registry::RuleRegistry;
use crate::resolve::pattern_predicate;

/// Names of the built-in rules, in registration order.
pub const BUILTIN_RULES: &[&str] = &[
    "alpha",
    "alphanumeric",
    "email",
    "checked",
    "empty",
    "required",
    "enabled",
];

static ALPHA_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z]*$").unwrap());

static ALPHANUMERIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]*$").unwrap());

// Optional as a whole: the empty string passes, pair with `required`.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[^@\s]+@(?:[-a-z0-9]+\.)+[a-z]{2,})?$").unwrap()
});

// ============================================================================
// REGISTRATION
// ============================================================================

pub(crate) fn register_builtins(registry: &mut RuleRegistry) {
    registry.insert("alpha".to_owned(), pattern_predicate(ALPHA_REGEX.clone()));
    registry.insert(
        "alphanumeric".to_owned(),
        pattern_predicate(ALPHANUMERIC_REGEX.clone()),
    );
    registry.insert("email".to_owned(), pattern_predicate(EMAIL_REGEX.clone()));
    registry.insert(
        "checked".to_owned(),
        Predicate::new(|subject, _| subject.checked() == Some(true)),
    );
    registry.insert("empty".to_owned(), Predicate::on_value(str::is_empty));
    registry.insert(
        "required".to_owned(),
        Predicate::new(|subject, _| {
            !subject.text().is_empty() || subject.checked() == Some(true)
        }),
    );
    registry.insert(
        "enabled".to_owned(),
        Predicate::new(|subject, _| !subject.disabled() && subject.kind() != Some("hidden")),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::Field;

    fn rule(name: &str) -> Predicate {
        RuleRegistry::new().lookup(name).unwrap()
    }

    #[test]
    fn every_builtin_is_registered() {
        let registry = RuleRegistry::new();
        assert_eq!(registry.len(), BUILTIN_RULES.len());
        for name in BUILTIN_RULES {
            assert!(registry.contains(name));
        }
    }

    #[test]
    fn alpha() {
        let p = rule("alpha");
        assert!(p.test_detached(&"abcXYZ"));
        assert!(p.test_detached(&""));
        assert!(!p.test_detached(&"abc1"));
        assert!(!p.test_detached(&"ab c"));
    }

    #[test]
    fn alphanumeric() {
        let p = rule("alphanumeric");
        assert!(p.test_detached(&"user_01"));
        assert!(!p.test_detached(&"user-01"));
    }

    #[test]
    fn email() {
        let p = rule("email");
        assert!(p.test_detached(&"user@example.com"));
        assert!(p.test_detached(&"USER@EXAMPLE.CO.UK"));
        assert!(p.test_detached(&""));
        assert!(!p.test_detached(&"invalid"));
        assert!(!p.test_detached(&"a@b"));
        assert!(!p.test_detached(&"a b@example.com"));
    }

    #[test]
    fn checked_and_required() {
        let checked = rule("checked");
        let required = rule("required");

        assert!(checked.test_detached(&Field::checkbox(true)));
        assert!(!checked.test_detached(&Field::checkbox(false)));
        assert!(!checked.test_detached(&"on"));

        assert!(required.test_detached(&"x"));
        assert!(!required.test_detached(&""));
        assert!(!required.test_detached(&Field::new()));
        assert!(required.test_detached(&Field::checkbox(true)));
    }

    #[test]
    fn empty() {
        let p = rule("empty");
        assert!(p.test_detached(&Field::new()));
        assert!(p.test_detached(&""));
        assert!(!p.test_detached(&" "));
    }

    #[test]
    fn enabled() {
        let p = rule("enabled");
        assert!(p.test_detached(&Field::text("x")));
        assert!(!p.test_detached(&Field::text("x").with_disabled(true)));
        assert!(!p.test_detached(&Field::text("x").with_kind("hidden")));
    }
}
