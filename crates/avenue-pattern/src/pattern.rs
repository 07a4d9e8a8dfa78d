//! Compiled patterns.
//!
//! A [`Pattern`] owns the token list of its template together with the two
//! things derived from it: a regular expression that matches concrete input,
//! and a generator that rebuilds concrete input from parameter values.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::{Regex, RegexBuilder};

use crate::captures::Captures;
use crate::token::{tokenize, Key, Token, DEFAULT_DELIMITER};
use crate::value::{ParamValue, ParamValues};
use crate::PatternError;

/// Characters escaped when a value is written into a segment.
///
/// Matches `encodeURIComponent`: everything but alphanumerics and `-_.!~*'()`.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Catch-all values keep their slashes.
const CATCH_ALL: &AsciiSet = &SEGMENT.remove(b'/');

/// Percent-encodes `value` the way `encodeURIComponent` does.
///
/// ```
/// assert_eq!(avenue_pattern::encode_component("a b/c!"), "a%20b%2Fc!");
/// ```
#[must_use]
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// Options applied when a template is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternOptions {
    /// Match literal text case-sensitively.
    pub case_sensitive: bool,
    /// Disallow a single trailing delimiter on matched input.
    pub strict: bool,
}

/// A compiled template.
///
/// # Example
///
/// ```rust
/// use avenue_pattern::{ParamValues, Pattern, PatternOptions};
///
/// let pattern = Pattern::parse("/home/:slug", PatternOptions::default()).unwrap();
///
/// let captures = pattern.captures("/home/hello").unwrap();
/// assert_eq!(captures.get(0), Some("hello"));
///
/// let values = ParamValues::from([("slug".to_string(), "world".into())]);
/// assert_eq!(pattern.compile(&values).unwrap(), "/home/world");
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    template: String,
    tokens: Vec<Token>,
    keys: Vec<Key>,
    matcher: Regex,
    /// One anchored validator per key, used by the generator.
    validators: Vec<Regex>,
}

impl Pattern {
    /// Tokenizes `template` and builds its matcher.
    pub fn parse(template: &str, options: PatternOptions) -> Result<Self, PatternError> {
        let tokens = tokenize(template)?;
        let keys: Vec<Key> = tokens
            .iter()
            .filter_map(|token| match token {
                Token::Param(key) => Some(key.clone()),
                Token::Literal(_) => None,
            })
            .collect();

        let matcher = RegexBuilder::new(&Self::matcher_source(&tokens, options))
            .case_insensitive(!options.case_sensitive)
            .build()?;

        let validators = keys
            .iter()
            .map(|key| Regex::new(&format!("^(?:{})$", key.pattern)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            template: template.to_string(),
            tokens,
            keys,
            matcher,
            validators,
        })
    }

    /// Returns the template this pattern was built from.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the tokens of the template.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the declared parameters in template order.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Returns true if the template declares no parameters.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.keys.is_empty()
    }

    /// Matches `input` against the pattern.
    ///
    /// Returns one slot per key; an empty capture is reported as `None`.
    #[must_use]
    pub fn captures(&self, input: &str) -> Option<Captures> {
        let found = self.matcher.captures(input)?;
        let captures = (0..self.keys.len())
            .map(|index| {
                found
                    .name(&Self::group_name(index))
                    .map(|m| m.as_str())
                    .filter(|value| !value.is_empty())
                    .map(str::to_string)
            })
            .collect();
        Some(captures)
    }

    /// Returns true if `input` matches the pattern.
    #[must_use]
    pub fn is_match(&self, input: &str) -> bool {
        self.matcher.is_match(input)
    }

    /// Builds concrete input from parameter values.
    ///
    /// Values are percent-encoded; the catch-all keeps its slashes. A
    /// missing optional parameter is skipped along with its prefix.
    pub fn compile(&self, values: &ParamValues) -> Result<String, PatternError> {
        let mut output = String::new();
        let mut index = 0;

        for token in &self.tokens {
            let key = match token {
                Token::Literal(text) => {
                    output.push_str(text);
                    continue;
                }
                Token::Param(key) => key,
            };
            let validator = &self.validators[index];
            index += 1;

            match values.get(&key.name) {
                None if key.optional => {}
                None => return Err(PatternError::missing_value(&key.name)),
                Some(ParamValue::Sequence(_)) if !key.repeat => {
                    return Err(PatternError::UnexpectedSequence {
                        name: key.name.clone(),
                    });
                }
                Some(ParamValue::Sequence(segments)) if segments.is_empty() => {
                    if !key.optional {
                        return Err(PatternError::EmptySequence {
                            name: key.name.clone(),
                        });
                    }
                }
                Some(ParamValue::Sequence(segments)) => {
                    for (position, segment) in segments.iter().enumerate() {
                        let encoded = Self::encode(key, segment, validator)?;
                        let separator = if position == 0 {
                            key.prefix
                        } else {
                            Some(key.delimiter)
                        };
                        output.extend(separator);
                        output.push_str(&encoded);
                    }
                }
                Some(ParamValue::Single(value)) => {
                    let encoded = Self::encode(key, value, validator)?;
                    output.extend(key.prefix);
                    output.push_str(&encoded);
                }
            }
        }

        Ok(output)
    }

    fn encode(key: &Key, value: &str, validator: &Regex) -> Result<String, PatternError> {
        let set = if key.catch_all { CATCH_ALL } else { SEGMENT };
        let encoded = utf8_percent_encode(value, set).to_string();
        if !validator.is_match(&encoded) {
            return Err(PatternError::invalid_value(&key.name, &key.pattern, encoded));
        }
        Ok(encoded)
    }

    fn group_name(index: usize) -> String {
        format!("p{index}")
    }

    /// Builds the regular expression source for a token list.
    ///
    /// Parameters become named groups (`p0`, `p1`, ...) so capture groups
    /// inside custom patterns cannot shift the slot alignment.
    fn matcher_source(tokens: &[Token], options: PatternOptions) -> String {
        let mut source = String::from("^");
        let last = tokens.len().saturating_sub(1);
        let mut index = 0;

        for (position, token) in tokens.iter().enumerate() {
            match token {
                Token::Literal(text) => {
                    let text = if !options.strict && position == last {
                        text.strip_suffix(DEFAULT_DELIMITER).unwrap_or(text)
                    } else {
                        text.as_str()
                    };
                    source.push_str(&regex::escape(text));
                }
                Token::Param(key) => {
                    let prefix = key
                        .prefix
                        .map(|c| regex::escape(&c.to_string()))
                        .unwrap_or_default();
                    let mut capture = format!("(?:{})", key.pattern);
                    if key.repeat {
                        let delimiter = regex::escape(&key.delimiter.to_string());
                        capture = format!("{capture}(?:{delimiter}{capture})*");
                    }
                    let group = Self::group_name(index);
                    index += 1;
                    if key.optional {
                        source.push_str(&format!("(?:{prefix}(?P<{group}>{capture}))?"));
                    } else {
                        source.push_str(&format!("{prefix}(?P<{group}>{capture})"));
                    }
                }
            }
        }

        if !options.strict {
            source.push_str("/?");
        }
        source.push('$');
        source
    }
}
