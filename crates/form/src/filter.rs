//! Value filters, applied to a field's value before it is validated.
//!
//! A [`FilterChain`] applies its filters **last to first**: the chain
//! `"trim, lowercase"` lowercases first and trims second.
//!
//! ```
//! use greenlight_form::FilterChain;
//!
//! let chain = FilterChain::parse("uppercase trim").unwrap();
//! assert_eq!(chain.apply("  abc "), "ABC");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::error::FilterError;

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,\s]+").unwrap());

type FilterFn = dyn Fn(&str) -> String + Send + Sync;

/// A single string-to-string transformation.
#[derive(Clone)]
pub enum Filter {
    /// Strips leading and trailing whitespace.
    Trim,
    /// Lowercases.
    Lowercase,
    /// Uppercases.
    Uppercase,
    /// Replaces the first match, or every match when `all` is set.
    Replace {
        /// What to look for.
        pattern: Regex,
        /// Replacement text; `$1`-style group references are expanded.
        replacement: String,
        /// Replace every match instead of only the first.
        all: bool,
    },
    /// A caller-supplied transformation.
    Custom(Arc<FilterFn>),
}

impl Filter {
    /// Looks up a named filter, ignoring case.
    pub fn from_name(name: &str) -> Result<Self, FilterError> {
        match name.to_ascii_lowercase().as_str() {
            "trim" => Ok(Self::Trim),
            "lowercase" => Ok(Self::Lowercase),
            "uppercase" => Ok(Self::Uppercase),
            _ => Err(FilterError::UnknownFilter {
                name: name.to_owned(),
            }),
        }
    }

    /// Replaces the first match of `pattern` with `replacement`.
    pub fn replace(pattern: &str, replacement: impl Into<String>) -> Result<Self, FilterError> {
        Self::replacing(pattern, replacement.into(), false)
    }

    /// Replaces every match of `pattern` with `replacement`.
    pub fn replace_all(pattern: &str, replacement: impl Into<String>) -> Result<Self, FilterError> {
        Self::replacing(pattern, replacement.into(), true)
    }

    fn replacing(pattern: &str, replacement: String, all: bool) -> Result<Self, FilterError> {
        let pattern = Regex::new(pattern).map_err(|e| FilterError::InvalidPattern {
            reason: e.to_string(),
        })?;
        Ok(Self::Replace {
            pattern,
            replacement,
            all,
        })
    }

    /// Wraps a closure.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Applies the filter.
    #[must_use]
    pub fn apply(&self, value: &str) -> String {
        match self {
            Self::Trim => value.trim().to_owned(),
            Self::Lowercase => value.to_lowercase(),
            Self::Uppercase => value.to_uppercase(),
            Self::Replace {
                pattern,
                replacement,
                all: false,
            } => pattern.replace(value, replacement.as_str()).into_owned(),
            Self::Replace {
                pattern,
                replacement,
                all: true,
            } => pattern.replace_all(value, replacement.as_str()).into_owned(),
            Self::Custom(f) => f(value),
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trim => f.write_str("Trim"),
            Self::Lowercase => f.write_str("Lowercase"),
            Self::Uppercase => f.write_str("Uppercase"),
            Self::Replace {
                pattern,
                replacement,
                all,
            } => f
                .debug_struct("Replace")
                .field("pattern", &pattern.as_str())
                .field("replacement", replacement)
                .field("all", all)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

// ============================================================================
// CHAIN
// ============================================================================

/// An ordered list of filters, applied last to first.
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    filters: Vec<Filter>,
}

impl FilterChain {
    /// An empty chain, which leaves values unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a list of filter names separated by commas and/or whitespace.
    pub fn parse(spec: &str) -> Result<Self, FilterError> {
        let filters = SEPARATOR
            .split(spec)
            .filter(|name| !name.is_empty())
            .map(Filter::from_name)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { filters })
    }

    /// Appends a filter, builder style.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Appends a filter.
    pub fn push(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    /// Runs `value` through the chain, last filter first.
    #[must_use]
    pub fn apply(&self, value: &str) -> String {
        self.filters
            .iter()
            .rev()
            .fold(value.to_owned(), |acc, filter| filter.apply(&acc))
    }

    /// Number of filters in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns `true` if the chain has no filters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl FromStr for FilterChain {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Filter> for FilterChain {
    fn from(filter: Filter) -> Self {
        Self {
            filters: vec![filter],
        }
    }
}

impl FromIterator<Filter> for FilterChain {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("trim", "  Mixed Case  ", "Mixed Case")]
    #[case("LOWERCASE", "ABC", "abc")]
    #[case("uppercase", "abc", "ABC")]
    #[case("trim, lowercase", "  ABC  ", "abc")]
    #[case("trim,,  uppercase ", " x ", "X")]
    #[case("", " x ", " x ")]
    fn named_chains(#[case] spec: &str, #[case] input: &str, #[case] expected: &str) {
        assert_eq!(FilterChain::parse(spec).unwrap().apply(input), expected);
    }

    #[test]
    fn unknown_filter_is_rejected() {
        let err = FilterChain::parse("trim rot13").unwrap_err();
        assert_eq!(err, FilterError::UnknownFilter { name: "rot13".into() });
    }

    #[test]
    fn chain_runs_last_to_first() {
        let chain = FilterChain::new()
            .with(Filter::custom(|v| format!("{v}-a")))
            .with(Filter::custom(|v| format!("{v}-b")));
        assert_eq!(chain.apply("x"), "x-b-a");
    }

    #[test]
    fn replace_first_and_all() {
        let first = Filter::replace(r"\s", "").unwrap();
        let all = Filter::replace_all(r"\s", "").unwrap();
        assert_eq!(first.apply("a b c"), "ab c");
        assert_eq!(all.apply("a b c"), "abc");
    }

    #[test]
    fn replace_rejects_bad_pattern() {
        assert!(matches!(
            Filter::replace("(", ""),
            Err(FilterError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn from_str() {
        let chain: FilterChain = "trim uppercase".parse().unwrap();
        assert_eq!(chain.len(), 2);
        assert!(FilterChain::new().is_empty());
    }
}
