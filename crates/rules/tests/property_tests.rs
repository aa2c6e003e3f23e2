//! Property-based tests for greenlight-rules.

use greenlight_rules::prelude::*;
use proptest::prelude::*;

fn constant(value: bool) -> Predicate {
    if value {
        Predicate::always()
    } else {
        Predicate::never()
    }
}

// ============================================================================
// IDEMPOTENCY: test(x) == test(x)
// ============================================================================

proptest! {
    #[test]
    fn email_idempotent(s in ".*") {
        let email = RuleRegistry::new().lookup("email").unwrap();
        prop_assert_eq!(email.test_detached(&s.as_str()), email.test_detached(&s.as_str()));
    }

    #[test]
    fn length_idempotent(s in ".{0,40}") {
        let p = length(3, 10).unwrap();
        prop_assert_eq!(p.test_detached(&s.as_str()), p.test_detached(&s.as_str()));
    }
}

// ============================================================================
// NEGATION: not(not(p)) == p
// ============================================================================

proptest! {
    #[test]
    fn double_negation_is_identity(s in ".{0,20}") {
        let registry = RuleRegistry::new();
        for rule in ["alpha", "alphanumeric", "email", "empty", "required"] {
            let p = registry.lookup(rule).unwrap();
            let nn = not(&registry, not(&registry, rule).unwrap()).unwrap();
            prop_assert_eq!(p.test_detached(&s.as_str()), nn.test_detached(&s.as_str()));
        }
    }
}

// ============================================================================
// FOLD LAWS
// ============================================================================

proptest! {
    #[test]
    fn and_holds_iff_all_hold(values in prop::collection::vec(any::<bool>(), 0..8)) {
        let registry = RuleRegistry::empty();
        let operands: Vec<Predicate> = values.iter().copied().map(constant).collect();
        let p = and(&registry, operands).unwrap();
        prop_assert_eq!(p.test_detached(&""), values.iter().all(|&v| v));
    }

    #[test]
    fn or_holds_iff_any_holds(values in prop::collection::vec(any::<bool>(), 0..8)) {
        let registry = RuleRegistry::empty();
        let operands: Vec<Predicate> = values.iter().copied().map(constant).collect();
        let p = or(&registry, operands).unwrap();
        prop_assert_eq!(p.test_detached(&""), values.iter().any(|&v| v));
    }

    #[test]
    fn xor_is_parity(values in prop::collection::vec(any::<bool>(), 0..8)) {
        let registry = RuleRegistry::empty();
        let operands: Vec<Predicate> = values.iter().copied().map(constant).collect();
        let p = xor(&registry, operands).unwrap();
        let odd = values.iter().filter(|&&v| v).count() % 2 == 1;
        prop_assert_eq!(p.test_detached(&""), odd);
    }

    #[test]
    fn implies_is_left_fold(values in prop::collection::vec(any::<bool>(), 1..8)) {
        let registry = RuleRegistry::empty();
        let operands: Vec<Predicate> = values.iter().copied().map(constant).collect();
        let p = implies(&registry, operands).unwrap();
        let expected = values[1..].iter().fold(values[0], |acc, &v| !acc || v);
        prop_assert_eq!(p.test_detached(&""), expected);
    }

    #[test]
    fn sequence_equals_and(values in prop::collection::vec(any::<bool>(), 0..8)) {
        let registry = RuleRegistry::empty();
        let operands: Vec<Predicate> = values.iter().copied().map(constant).collect();
        let sequence = registry.to_predicate(operands.clone()).unwrap();
        let conjunction = and(&registry, operands).unwrap();
        prop_assert_eq!(sequence.test_detached(&""), conjunction.test_detached(&""));
    }
}

// ============================================================================
// VALUE COMBINATORS
// ============================================================================

proptest! {
    #[test]
    fn less_than_agrees_with_float_compare(n in -1000i32..1000, bound in -1000i32..1000) {
        let p = less_than(bound).unwrap();
        prop_assert_eq!(p.test_detached(&n.to_string().as_str()), n < bound);
    }

    #[test]
    fn length_agrees_with_char_count(s in ".{0,30}", min in 0usize..10, extra in 0usize..10) {
        let max = min + extra;
        let p = length(min, max).unwrap();
        let len = s.chars().count();
        prop_assert_eq!(p.test_detached(&s.as_str()), (min..=max).contains(&len));
    }

    #[test]
    fn starts_with_agrees_with_str(prefix in "[a-z]{1,5}", rest in "[a-z]{0,5}") {
        let p = starts_with([prefix.as_str()]).unwrap();
        let value = format!("{prefix}{rest}");
        prop_assert!(p.test_detached(&value.as_str()));
        prop_assert!(p.test_detached(&value.to_uppercase().as_str()));
    }

    #[test]
    fn alpha_never_accepts_digits(s in "[a-zA-Z]{0,10}[0-9][a-zA-Z0-9]{0,10}") {
        let alpha = RuleRegistry::new().lookup("alpha").unwrap();
        prop_assert!(!alpha.test_detached(&s.as_str()));
    }
}
