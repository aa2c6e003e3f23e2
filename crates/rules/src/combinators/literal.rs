//! Loosely-typed combinator arguments.

use std::fmt;

use serde_json::Value;

/// An argument to a value combinator.
///
/// Combinators such as [`less_than`](super::less_than) and
/// [`selected`](super::selected) accept several argument shapes and reject the
/// rest at construction time. `Literal` carries the shape so the rejection can
/// name what it got.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A string.
    Text(String),
    /// A number.
    Number(f64),
    /// A boolean.
    Bool(bool),
    /// No argument was supplied.
    Missing,
    /// A JSON array or object.
    Structured(Value),
}

impl Literal {
    /// Short name of the argument's type, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Missing => "missing",
            Self::Structured(Value::Array(_)) => "array",
            Self::Structured(_) => "object",
        }
    }

    /// The text, if this is a [`Literal::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The number, if this is a [`Literal::Number`].
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text:?}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Missing => f.write_str("<missing>"),
            Self::Structured(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Literal {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Literal {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for Literal {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<f32> for Literal {
    fn from(n: f32) -> Self {
        Self::Number(f64::from(n))
    }
}

macro_rules! literal_from_int {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Literal {
                fn from(n: $ty) -> Self {
                    Self::Number(n as f64)
                }
            }
        )+
    };
}

literal_from_int!(i32, i64, u32, u64, usize);

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

impl From<Value> for Literal {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n.as_f64().map_or(Self::Missing, Self::Number),
            Value::String(s) => Self::Text(s),
            structured @ (Value::Array(_) | Value::Object(_)) => Self::Structured(structured),
        }
    }
}
