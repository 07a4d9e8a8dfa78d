//! Raw values captured by a successful match.
//!
//! Captured values are positional: slot `i` belongs to the `i`-th key of the
//! pattern that produced them. Storage uses a small-vector so the common
//! case of a handful of parameters stays on the stack.

use smallvec::SmallVec;

/// Maximum number of captures stored inline (stack allocated).
const INLINE_CAPTURES: usize = 4;

/// Captured raw values, aligned with a pattern's keys.
///
/// A slot is `None` when its key took part in the match without capturing
/// anything (an absent optional parameter, or an empty catch-all).
///
/// # Example
///
/// ```rust
/// use avenue_pattern::Captures;
///
/// let mut captures = Captures::new();
/// captures.push(Some("123".to_string()));
/// captures.push(None);
///
/// assert_eq!(captures.get(0), Some("123"));
/// assert_eq!(captures.get(1), None);
/// assert_eq!(captures.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Captures {
    inner: SmallVec<[Option<String>; INLINE_CAPTURES]>,
}

impl Captures {
    /// Creates an empty capture set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a capture set with the given capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: SmallVec::with_capacity(capacity),
        }
    }

    /// Appends the value for the next key.
    pub fn push(&mut self, value: Option<String>) {
        self.inner.push(value);
    }

    /// Returns the captured value for the key at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.inner.get(index).and_then(|value| value.as_deref())
    }

    /// Returns true if no slot was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of slots (one per key).
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns an iterator over the slots in key order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
        self.inner.iter().map(|value| value.as_deref())
    }
}

impl IntoIterator for Captures {
    type Item = Option<String>;
    type IntoIter = smallvec::IntoIter<[Option<String>; INLINE_CAPTURES]>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl FromIterator<Option<String>> for Captures {
    fn from_iter<I: IntoIterator<Item = Option<String>>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}
