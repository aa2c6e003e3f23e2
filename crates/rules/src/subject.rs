//! Subjects: the values predicates are evaluated against.
//!
//! The engine never looks at forms or DOM nodes. A predicate receives a
//! [`Subject`], which exposes the handful of properties the built-in rules
//! need (a string value, a checked state, a selection), and an
//! [`EvalContext`](crate::EvalContext) that can find sibling subjects by name.
//!
//! A subject with no extractable value is treated as the empty string by
//! every value-based predicate; see [`Subject::text`].
//!
//! # Examples
//!
//! ```
//! use greenlight_rules::{Field, Form, Subject};
//!
//! let form = Form::new()
//!     .with_field("email", Field::text("alice@example.com"))
//!     .with_field("terms", Field::checkbox(true));
//!
//! assert_eq!(form.get("email").unwrap().text(), "alice@example.com");
//! assert_eq!(form.get("terms").unwrap().checked(), Some(true));
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// SUBJECT TRAIT
// ============================================================================

/// Anything a predicate can be evaluated against.
///
/// Only [`value`](Subject::value) is required; the remaining accessors
/// default to "not applicable".
pub trait Subject {
    /// The subject's current string value, or `None` if it has none.
    fn value(&self) -> Option<Cow<'_, str>>;

    /// The boolean checked state, for subjects that have one.
    fn checked(&self) -> Option<bool> {
        None
    }

    /// Whether the subject is disabled.
    fn disabled(&self) -> bool {
        false
    }

    /// The subject's kind, e.g. `"text"`, `"checkbox"` or `"hidden"`.
    fn kind(&self) -> Option<&str> {
        None
    }

    /// Index of the currently selected option.
    fn selected_index(&self) -> Option<usize> {
        None
    }

    /// Value of the currently selected option.
    fn selected_value(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// An arbitrary named property.
    fn property(&self, _name: &str) -> Option<Value> {
        None
    }

    /// The value with the missing-value policy applied: no value reads as `""`.
    fn text(&self) -> Cow<'_, str> {
        self.value().unwrap_or_default()
    }
}

impl Subject for &str {
    fn value(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(*self))
    }
}

impl Subject for String {
    fn value(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl Subject for Value {
    fn value(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Object(map) => map.get("value").and_then(|v| v.value()),
            Value::Null | Value::Bool(_) | Value::Array(_) => None,
        }
    }

    fn checked(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Object(map) => map.get("checked").and_then(Value::as_bool),
            _ => None,
        }
    }

    fn disabled(&self) -> bool {
        self.get("disabled")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    fn kind(&self) -> Option<&str> {
        self.get("type").and_then(Value::as_str)
    }

    fn selected_index(&self) -> Option<usize> {
        self.get("selected_index")
            .and_then(Value::as_u64)
            .map(|i| i as usize)
    }

    fn selected_value(&self) -> Option<Cow<'_, str>> {
        let options = self.get("options")?.as_array()?;
        let index = self.selected_index()?;
        options.get(index).and_then(|v| v.value())
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

// ============================================================================
// SIBLINGS
// ============================================================================

/// A named collection of subjects, used to resolve sibling references.
pub trait Siblings {
    /// Looks up a sibling subject by name.
    fn sibling(&self, name: &str) -> Option<&dyn Subject>;
}

impl Siblings for Map<String, Value> {
    fn sibling(&self, name: &str) -> Option<&dyn Subject> {
        self.get(name).map(|v| v as &dyn Subject)
    }
}

impl Siblings for Value {
    fn sibling(&self, name: &str) -> Option<&dyn Subject> {
        self.as_object()?.sibling(name)
    }
}

impl<S: Subject> Siblings for HashMap<String, S> {
    fn sibling(&self, name: &str) -> Option<&dyn Subject> {
        self.get(name).map(|s| s as &dyn Subject)
    }
}

impl<S: Subject> Siblings for IndexMap<String, S> {
    fn sibling(&self, name: &str) -> Option<&dyn Subject> {
        self.get(name).map(|s| s as &dyn Subject)
    }
}

// ============================================================================
// FIELD
// ============================================================================

/// An in-memory form field.
///
/// Covers text inputs, checkboxes, and select lists. A select field without
/// an explicit value reports its selected option as its value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Field {
    value: Option<String>,
    checked: Option<bool>,
    disabled: bool,
    #[serde(alias = "type")]
    kind: Option<String>,
    options: Vec<String>,
    selected_index: Option<usize>,
    properties: Map<String, Value>,
}

impl Field {
    /// Creates a field with no value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a text field holding `value`.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            kind: Some("text".to_owned()),
            ..Self::default()
        }
    }

    /// Creates a checkbox.
    #[must_use]
    pub fn checkbox(checked: bool) -> Self {
        Self {
            checked: Some(checked),
            kind: Some("checkbox".to_owned()),
            ..Self::default()
        }
    }

    /// Creates a select list with the given option values.
    pub fn select<I, S>(options: I, selected: Option<usize>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: Some("select".to_owned()),
            options: options.into_iter().map(Into::into).collect(),
            selected_index: selected,
            ..Self::default()
        }
    }

    /// Sets the value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the checked state.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    /// Sets the disabled flag.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Sets the kind.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Adds an extra named property.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Replaces the value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// Replaces the checked state.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = Some(checked);
    }

    /// Selects the option at `index`.
    pub fn select_index(&mut self, index: Option<usize>) {
        self.selected_index = index;
    }

    /// The option values of a select field.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    fn selected_option(&self) -> Option<&str> {
        self.selected_index
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }
}

impl Subject for Field {
    fn value(&self) -> Option<Cow<'_, str>> {
        self.value
            .as_deref()
            .or_else(|| self.selected_option())
            .map(Cow::Borrowed)
    }

    fn checked(&self) -> Option<bool> {
        self.checked
    }

    fn disabled(&self) -> bool {
        self.disabled
    }

    fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    fn selected_value(&self) -> Option<Cow<'_, str>> {
        self.selected_option().map(Cow::Borrowed)
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "value" => self.value().map(|v| Value::String(v.into_owned())),
            "checked" => self.checked.map(Value::Bool),
            "disabled" => Some(Value::Bool(self.disabled)),
            "type" | "kind" => self.kind.clone().map(Value::String),
            "selected_index" => self.selected_index.map(Value::from),
            _ => self.properties.get(name).cloned(),
        }
    }
}

// ============================================================================
// FORM
// ============================================================================

/// An ordered collection of named fields.
///
/// Serializes as a plain JSON object of `name -> field`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Form {
    fields: IndexMap<String, Field>,
}

impl Form {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, builder style.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Inserts a field, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, field: Field) -> Option<Field> {
        self.fields.insert(name.into(), field)
    }

    /// Returns the field called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Returns the field called `name` mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.get_mut(name)
    }

    /// Sets the value of an existing field. Returns `false` if there is no such field.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.get_mut(name) {
            Some(field) => {
                field.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if the form has a field called `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates over `(name, field)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the form has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Siblings for Form {
    fn sibling(&self, name: &str) -> Option<&dyn Subject> {
        self.fields.get(name).map(|f| f as &dyn Subject)
    }
}
