//! Query string serialization.
//!
//! Queries are ordered maps of [`ParamValue`]s. Sequences are written as a
//! single value joined by `/`, matching how repeating path parameters are
//! written, so `c=[1, 2, 3]` becomes `c=1%2F2%2F3`.

use avenue_pattern::{encode_component, ParamValue};
use indexmap::map::Entry;
use indexmap::IndexMap;

/// Query parameters in insertion order.
pub type QueryParams = IndexMap<String, ParamValue>;

/// Serializes a query as a `?`-prefixed string.
///
/// Keys and values are escaped like path segments, so a space becomes
/// `%20` and `!~*'()` pass through. An empty query serializes to `"?"`; callers that want no suffix at all
/// check [`IndexMap::is_empty`] first.
///
/// # Example
///
/// ```rust
/// use avenue_pattern::ParamValue;
/// use avenue_router::{to_querystring, QueryParams};
///
/// let mut query = QueryParams::new();
/// query.insert("a".to_string(), ParamValue::from("test"));
/// query.insert("c".to_string(), ParamValue::from(vec![1, 2, 3]));
///
/// assert_eq!(to_querystring(&query), "?a=test&c=1%2F2%2F3");
/// ```
#[must_use]
pub fn to_querystring(query: &QueryParams) -> String {
    let pairs: Vec<String> = query
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                encode_component(key),
                encode_component(&value.joined())
            )
        })
        .collect();
    format!("?{}", pairs.join("&"))
}

/// Parses a query string, with or without its leading `?`.
///
/// Keys that appear more than once collect into a
/// [`ParamValue::Sequence`]. Malformed input yields an empty query.
#[must_use]
pub fn parse_query(input: &str) -> QueryParams {
    let input = input.strip_prefix('?').unwrap_or(input);
    let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(input) {
        Ok(pairs) => pairs,
        Err(e) => {
            tracing::debug!(error = %e, query = %input, "Ignoring malformed query string");
            return QueryParams::new();
        }
    };

    let mut query = QueryParams::with_capacity(pairs.len());
    for (key, value) in pairs {
        match query.entry(key) {
            Entry::Occupied(mut entry) => {
                let slot = entry.get_mut();
                match slot {
                    ParamValue::Single(first) => {
                        let first = std::mem::take(first);
                        *slot = ParamValue::Sequence(vec![first, value]);
                    }
                    ParamValue::Sequence(values) => values.push(value),
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(ParamValue::Single(value));
            }
        }
    }
    query
}
