//! Path and domain template compiler for Avenue.
//!
//! This crate turns a route template such as `/blog/:slug` or a domain
//! template such as `:lang.example.com` into a [`Pattern`]: a matcher that
//! extracts raw parameter values from concrete input, and a generator that
//! rebuilds concrete input from parameter values.
//!
//! # Features
//!
//! - **Named parameters**: `/users/:id`
//! - **Optional parameters**: `/posts/:id?`
//! - **Repeating parameters**: `/docs/:path+`, `/docs/:path*`
//! - **Custom patterns**: `/posts/:id(\d+)`
//! - **Catch-all**: `/*`, captured as one repeating value
//! - **Domain templates**: `.` acts as the delimiter after a dot
//!
//! # Example
//!
//! ```rust
//! use avenue_pattern::{ParamValue, ParamValues, Pattern, PatternOptions};
//!
//! let pattern = Pattern::parse("/docs/:section/:page*", PatternOptions::default()).unwrap();
//!
//! // Match
//! let captures = pattern.captures("/docs/guide/setup/linux").unwrap();
//! assert_eq!(captures.get(0), Some("guide"));
//! assert_eq!(captures.get(1), Some("setup/linux"));
//!
//! // Generate
//! let mut values = ParamValues::new();
//! values.insert("section".to_string(), ParamValue::from("api"));
//! values.insert("page".to_string(), ParamValue::from(vec!["router", "match"]));
//! assert_eq!(pattern.compile(&values).unwrap(), "/docs/api/router/match");
//! ```
//!
//! # Architecture
//!
//! ```text
//!   template ──tokenize──▶ [Literal | Param(Key)]*
//!                               │
//!                 ┌─────────────┴─────────────┐
//!                 ▼                           ▼
//!          matcher (Regex)             generator (compile)
//!     input ─▶ Captures           ParamValues ─▶ concrete input
//! ```
//!
//! Both sides read the same token list, so they cannot drift apart.

mod captures;
mod error;
mod pattern;
mod token;
mod value;

pub use captures::Captures;
pub use error::PatternError;
pub use pattern::{encode_component, Pattern, PatternOptions};
pub use token::{tokenize, Key, Token, DEFAULT_DELIMITER};
pub use value::{ParamValue, ParamValues};

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(template: &str) -> Pattern {
        Pattern::parse(template, PatternOptions::default()).unwrap()
    }

    #[test]
    fn test_basic_matching() {
        let pattern = parse("/users/:id");
        assert_eq!(pattern.keys().len(), 1);
        assert_eq!(pattern.keys()[0].name(), "id");

        let captures = pattern.captures("/users/123").unwrap();
        assert_eq!(captures.get(0), Some("123"));
        assert!(pattern.captures("/posts/123").is_none());
    }

    #[test]
    fn test_multiple_params() {
        let pattern = parse("/orgs/:orgId/users/:userId");
        let captures = pattern.captures("/orgs/acme/users/123").unwrap();
        assert_eq!(captures.get(0), Some("acme"));
        assert_eq!(captures.get(1), Some("123"));
    }

    #[test]
    fn test_generate_matches_back() {
        let pattern = parse("/orgs/:orgId/users/:userId");
        let values = ParamValues::from([
            ("orgId".to_string(), ParamValue::from("acme")),
            ("userId".to_string(), ParamValue::from(7_u32)),
        ]);
        let url = pattern.compile(&values).unwrap();
        assert_eq!(url, "/orgs/acme/users/7");
        assert!(pattern.is_match(&url));
    }

    #[test]
    fn test_template_is_kept() {
        let pattern = parse("/a/:b");
        assert_eq!(pattern.template(), "/a/:b");
        assert_eq!(pattern.tokens().len(), 2);
    }
}
