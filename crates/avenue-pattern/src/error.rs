//! Pattern error types.

use thiserror::Error;

/// Errors raised while parsing a template or generating a concrete value from it.
#[derive(Error, Debug)]
pub enum PatternError {
    /// A `(` group was opened but never closed, or groups were nested.
    #[error("unbalanced group at offset {offset} in template {template:?}")]
    UnbalancedGroup {
        /// The offending template.
        template: String,
        /// Byte offset of the group opening.
        offset: usize,
    },

    /// A `(` group contained nothing.
    #[error("empty group at offset {offset} in template {template:?}")]
    EmptyGroup {
        /// The offending template.
        template: String,
        /// Byte offset of the group opening.
        offset: usize,
    },

    /// A template ended in a dangling escape character.
    #[error("dangling escape at the end of template {template:?}")]
    DanglingEscape {
        /// The offending template.
        template: String,
    },

    /// The tokens did not form a valid regular expression (usually a bad custom group).
    #[error("invalid parameter pattern: {0}")]
    Regex(#[from] regex::Error),

    /// A required parameter was not supplied to the generator.
    #[error("expected {name:?} to be defined")]
    MissingValue {
        /// Parameter name.
        name: String,
    },

    /// A sequence was supplied for a parameter that does not repeat.
    #[error("expected {name:?} to not repeat, but received a sequence")]
    UnexpectedSequence {
        /// Parameter name.
        name: String,
    },

    /// An empty sequence was supplied for a required repeating parameter.
    #[error("expected {name:?} to not be empty")]
    EmptySequence {
        /// Parameter name.
        name: String,
    },

    /// An encoded value does not satisfy the parameter's pattern.
    #[error("expected {name:?} to match {pattern:?}, but received {value:?}")]
    InvalidValue {
        /// Parameter name.
        name: String,
        /// The parameter's pattern.
        pattern: String,
        /// The encoded value that was rejected.
        value: String,
    },
}

impl PatternError {
    /// Create a new missing value error.
    pub fn missing_value(name: impl Into<String>) -> Self {
        Self::MissingValue { name: name.into() }
    }

    /// Create a new invalid value error.
    pub fn invalid_value(
        name: impl Into<String>,
        pattern: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            name: name.into(),
            pattern: pattern.into(),
            value: value.into(),
        }
    }
}
