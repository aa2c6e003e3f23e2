//! Evaluation context threaded alongside the subject.

use std::fmt;

use crate::subject::{Siblings, Subject};

/// Context available to a predicate while it is evaluated.
///
/// Carries an optional reference to the collection the subject belongs to,
/// so predicates such as [`matches`](crate::combinators::matches) can look up
/// a sibling by name. A detached context has no siblings; sibling lookups in
/// it always miss.
#[derive(Clone, Copy, Default)]
pub struct EvalContext<'a> {
    siblings: Option<&'a dyn Siblings>,
}

impl<'a> EvalContext<'a> {
    /// A context with no enclosing collection.
    #[must_use]
    pub fn detached() -> Self {
        Self { siblings: None }
    }

    /// A context whose siblings are resolved through `siblings`.
    #[must_use]
    pub fn with_siblings(siblings: &'a dyn Siblings) -> Self {
        Self {
            siblings: Some(siblings),
        }
    }

    /// Looks up a sibling subject by name.
    #[must_use]
    pub fn lookup_sibling(&self, name: &str) -> Option<&'a dyn Subject> {
        self.siblings.and_then(|s| s.sibling(name))
    }

    /// Returns `true` if the context has an enclosing collection.
    #[must_use]
    pub fn has_siblings(&self) -> bool {
        self.siblings.is_some()
    }
}

impl fmt::Debug for EvalContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalContext")
            .field("has_siblings", &self.has_siblings())
            .finish()
    }
}
