//! Template tokenizer.
//!
//! A template is split into an ordered list of [`Token`]s. Both the matcher
//! and the generator in [`crate::Pattern`] are built from this one list.

use crate::PatternError;

/// Default delimiter between segments.
pub const DEFAULT_DELIMITER: char = '/';

/// A declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    /// Parameter name (ordinal for unnamed groups and the catch-all).
    pub name: String,
    /// The `/` or `.` immediately preceding the parameter, if any.
    pub prefix: Option<char>,
    /// Character separating repeated segments.
    pub delimiter: char,
    /// Whether the parameter (and its prefix) may be absent.
    pub optional: bool,
    /// Whether the parameter spans several delimited segments.
    pub repeat: bool,
    /// Whether this is the `*` catch-all.
    pub catch_all: bool,
    /// Regular expression a single segment must satisfy.
    pub pattern: String,
}

impl Key {
    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true for repeating parameters, whose value is a sequence.
    #[must_use]
    pub fn is_repeating(&self) -> bool {
        self.repeat
    }

    /// Returns true if the parameter may be omitted.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

/// One element of a tokenized template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text.
    Literal(String),
    /// A parameter.
    Param(Key),
}

/// Splits a template into tokens.
///
/// Recognized forms are `:name`, `:name(re)`, `(re)` and `*`; named and
/// grouped parameters accept one trailing modifier of `?`, `+` or `*`.
/// A backslash escapes the next character.
pub fn tokenize(template: &str) -> Result<Vec<Token>, PatternError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    // Whether the last character of `literal` came from an escape and so
    // cannot serve as a parameter prefix.
    let mut last_escaped = false;
    let mut ordinal = 0_usize;
    let mut chars = template.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            '\\' => {
                let (_, escaped) = chars.next().ok_or_else(|| PatternError::DanglingEscape {
                    template: template.to_string(),
                })?;
                literal.push(escaped);
                last_escaped = true;
                continue;
            }
            ':' if chars.peek().is_some_and(|(_, next)| is_name_char(*next)) => {
                let mut name = String::new();
                while let Some((_, next)) = chars.next_if(|(_, c)| is_name_char(*c)) {
                    name.push(next);
                }
                let custom = match chars.next_if(|(_, c)| *c == '(') {
                    Some((group_offset, _)) => Some(read_group(template, group_offset, &mut chars)?),
                    None => None,
                };
                let modifier = read_modifier(&mut chars);
                let prefix = take_prefix(&mut literal, last_escaped);
                flush(&mut tokens, &mut literal);
                tokens.push(Token::Param(make_key(name, prefix, custom, modifier, false)));
            }
            '(' => {
                let pattern = read_group(template, offset, &mut chars)?;
                let modifier = read_modifier(&mut chars);
                let prefix = take_prefix(&mut literal, last_escaped);
                flush(&mut tokens, &mut literal);
                let name = ordinal.to_string();
                ordinal += 1;
                tokens.push(Token::Param(make_key(name, prefix, Some(pattern), modifier, false)));
            }
            '*' => {
                let prefix = take_prefix(&mut literal, last_escaped);
                flush(&mut tokens, &mut literal);
                let name = ordinal.to_string();
                ordinal += 1;
                tokens.push(Token::Param(make_key(name, prefix, None, None, true)));
            }
            _ => literal.push(c),
        }
        last_escaped = false;
    }

    flush(&mut tokens, &mut literal);
    Ok(tokens)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Reads a group body up to its matching closing parenthesis. The opening
/// `(` has already been consumed; inner groups must balance.
fn read_group(
    template: &str,
    offset: usize,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) -> Result<String, PatternError> {
    let mut body = String::new();
    let mut depth = 0_usize;
    let unbalanced = || PatternError::UnbalancedGroup {
        template: template.to_string(),
        offset,
    };

    loop {
        match chars.next() {
            Some((_, '\\')) => {
                body.push('\\');
                let (_, escaped) = chars.next().ok_or_else(unbalanced)?;
                body.push(escaped);
            }
            Some((_, ')')) if depth == 0 => break,
            Some((_, c @ ')')) => {
                depth -= 1;
                body.push(c);
            }
            Some((_, c @ '(')) => {
                depth += 1;
                body.push(c);
            }
            Some((_, c)) => body.push(c),
            None => return Err(unbalanced()),
        }
    }

    if body.is_empty() {
        return Err(PatternError::EmptyGroup {
            template: template.to_string(),
            offset,
        });
    }
    Ok(body)
}

fn read_modifier(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> Option<char> {
    chars
        .next_if(|(_, c)| matches!(c, '?' | '+' | '*'))
        .map(|(_, c)| c)
}

fn take_prefix(literal: &mut String, last_escaped: bool) -> Option<char> {
    if last_escaped {
        return None;
    }
    match literal.chars().last() {
        Some(c @ ('/' | '.')) => {
            literal.pop();
            Some(c)
        }
        _ => None,
    }
}

fn flush(tokens: &mut Vec<Token>, literal: &mut String) {
    if !literal.is_empty() {
        tokens.push(Token::Literal(std::mem::take(literal)));
    }
}

fn make_key(
    name: String,
    prefix: Option<char>,
    custom: Option<String>,
    modifier: Option<char>,
    catch_all: bool,
) -> Key {
    let delimiter = prefix.unwrap_or(DEFAULT_DELIMITER);
    let pattern = match custom {
        Some(pattern) => pattern,
        None if catch_all => ".*".to_string(),
        None => format!("[^{}]+?", regex::escape(&delimiter.to_string())),
    };

    Key {
        name,
        prefix,
        delimiter,
        optional: matches!(modifier, Some('?' | '*')),
        repeat: catch_all || matches!(modifier, Some('+' | '*')),
        catch_all,
        pattern,
    }
}
