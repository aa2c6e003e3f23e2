//! Prefix, suffix, and file-extension checks.
//!
//! Each combinator takes a list of literals, escapes them, and joins them
//! into one case-insensitive alternation.

use regex::RegexBuilder;

use crate::error::{ConstraintError, ConstraintResult};
use crate::predicate::Predicate;
use crate::resolve::pattern_predicate;

/// The subject's value starts with any of `prefixes`, ignoring case.
///
/// ```
/// use greenlight_rules::combinators::starts_with;
///
/// let p = starts_with(["http://", "https://"]).unwrap();
/// assert!(p.test_detached(&"HTTPS://example.com"));
/// assert!(!p.test_detached(&"ftp://example.com"));
/// ```
pub fn starts_with<I, S>(prefixes: I) -> ConstraintResult<Predicate>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    affix("starts_with", prefixes, |alternation| format!("^(?:{alternation})"))
}

/// The subject's value ends with any of `suffixes`, ignoring case.
pub fn ends_with<I, S>(suffixes: I) -> ConstraintResult<Predicate>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    affix("ends_with", suffixes, |alternation| format!("(?:{alternation})$"))
}

/// The subject's value looks like a file name with one of `extensions`.
///
/// Extensions are given without the dot. At least one character must come
/// before the dot, so `".png"` alone is not accepted.
pub fn accept<I, S>(extensions: I) -> ConstraintResult<Predicate>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    affix("accept", extensions, |alternation| {
        format!(r".+\.(?:{alternation})$")
    })
}

fn affix<I, S>(
    combinator: &'static str,
    literals: I,
    wrap: impl FnOnce(&str) -> String,
) -> ConstraintResult<Predicate>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let escaped: Vec<String> = literals
        .into_iter()
        .map(|literal| regex::escape(literal.as_ref()))
        .collect();
    if escaped.is_empty() {
        return Err(ConstraintError::invalid_argument(
            combinator,
            "at least one literal is required",
        ));
    }

    let source = wrap(&escaped.join("|"));
    tracing::trace!(combinator, pattern = %source, "compiled affix pattern");
    let pattern = RegexBuilder::new(&source)
        .case_insensitive(true)
        .build()
        .map_err(|e| ConstraintError::invalid_argument(combinator, e.to_string()))?;
    Ok(pattern_predicate(pattern))
}
