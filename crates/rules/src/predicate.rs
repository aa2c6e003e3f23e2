//! The resolved, evaluable form of every constraint.
//!
//! A [`Predicate`] is a shared, immutable function from a subject (and its
//! evaluation context) to `bool`. Cloning one is an `Arc` bump, so the same
//! predicate can be stored in a registry and in any number of composed
//! predicates at once.
//!
//! # Examples
//!
//! ```
//! use greenlight_rules::Predicate;
//!
//! let short = Predicate::on_value(|v| v.len() < 5);
//! assert!(short.test_detached(&"abc"));
//! assert!(!short.test_detached(&"abcdef"));
//! assert!(short.negate().test_detached(&"abcdef"));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::context::EvalContext;
use crate::subject::Subject;

type PredicateFn = dyn Fn(&dyn Subject, &EvalContext<'_>) -> bool + Send + Sync;

/// A pure function from subject to `bool`.
///
/// Evaluation never fails: construction is the only step that can reject
/// input, and it happens before a `Predicate` exists.
#[derive(Clone)]
pub struct Predicate {
    inner: Arc<PredicateFn>,
}

impl Predicate {
    /// Wraps a function of the subject and its evaluation context.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&dyn Subject, &EvalContext<'_>) -> bool + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Wraps a function of the subject's value alone.
    ///
    /// A subject with no value is passed as `""`.
    pub fn on_value<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::new(move |subject, _| f(&*subject.text()))
    }

    /// The constant-true predicate.
    #[must_use]
    pub fn always() -> Self {
        Self::new(|_, _| true)
    }

    /// The constant-false predicate.
    #[must_use]
    pub fn never() -> Self {
        Self::new(|_, _| false)
    }

    /// Evaluates the predicate against `subject` in context `cx`.
    #[inline]
    pub fn test(&self, subject: &dyn Subject, cx: &EvalContext<'_>) -> bool {
        (self.inner)(subject, cx)
    }

    /// Evaluates the predicate with no enclosing collection.
    #[inline]
    pub fn test_detached(&self, subject: &dyn Subject) -> bool {
        self.test(subject, &EvalContext::detached())
    }

    /// Logical negation.
    #[must_use]
    pub fn negate(&self) -> Self {
        let inner = self.clone();
        Self::new(move |subject, cx| !inner.test(subject, cx))
    }

    /// Returns `true` if both handles share the same underlying function.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("ptr", &Arc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}
