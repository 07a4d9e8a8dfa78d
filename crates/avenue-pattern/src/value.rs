//! Parameter values fed to (and produced by) patterns.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Parameter values keyed by parameter name, in insertion order.
pub type ParamValues = IndexMap<String, ParamValue>;

/// The value of one parameter.
///
/// Repeating parameters (`:path+`, `:path*`, `*`) carry a sequence of
/// segments; everything else carries a single string. Serializes untagged,
/// so a sequence shows up as a JSON array.
///
/// # Example
///
/// ```rust
/// use avenue_pattern::ParamValue;
///
/// let single = ParamValue::from("hello");
/// let many = ParamValue::from(vec!["docs", "intro"]);
///
/// assert_eq!(single.as_single(), Some("hello"));
/// assert_eq!(many.joined(), "docs/intro");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// One value.
    Single(String),
    /// Several segments of a repeating parameter.
    Sequence(Vec<String>),
}

impl ParamValue {
    /// Returns the value if it is a single string.
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Sequence(_) => None,
        }
    }

    /// Returns the segments if this is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[String]> {
        match self {
            Self::Single(_) => None,
            Self::Sequence(values) => Some(values),
        }
    }

    /// Returns the value with sequence segments joined by `/`.
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            Self::Single(value) => value.clone(),
            Self::Sequence(values) => values.join("/"),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Single(value.clone())
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Single(value.to_string())
                }
            }
        )*
    };
}

impl_from_number!(i32, i64, u16, u32, u64, usize);

impl<T: ToString> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        Self::Sequence(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString, const N: usize> From<[T; N]> for ParamValue {
    fn from(values: [T; N]) -> Self {
        Self::Sequence(values.iter().map(ToString::to_string).collect())
    }
}
