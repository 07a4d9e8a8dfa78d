//! URL and host parsing for incoming requests.

use http::uri::{Authority, Uri};
use serde::Serialize;

use crate::query::{parse_query, QueryParams};

/// A URL split into the parts route matching needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedUrl {
    /// The URL as given.
    pub href: String,
    /// Path component, without query or fragment.
    pub pathname: String,
    /// Raw query string, without the leading `?`.
    pub search: Option<String>,
    /// Decoded query parameters.
    pub query: QueryParams,
}

impl ParsedUrl {
    /// Parses an absolute URL (`https://host/path?q`) or an origin-relative
    /// one (`/path?q`). Fragments are dropped.
    #[must_use]
    pub fn parse(url: &str) -> Self {
        let (pathname, search) = match url.parse::<Uri>() {
            Ok(uri) if uri.scheme().is_some() || url.starts_with('/') => (
                uri.path().to_string(),
                uri.query().map(str::to_string),
            ),
            _ => split_relative(url),
        };

        let query = search.as_deref().map(parse_query).unwrap_or_default();

        Self {
            href: url.to_string(),
            pathname,
            search,
            query,
        }
    }
}

fn split_relative(url: &str) -> (String, Option<String>) {
    let url = url.split_once('#').map_or(url, |(before, _)| before);
    match url.split_once('?') {
        Some((path, search)) => (path.to_string(), Some(search.to_string())),
        None => (url.to_string(), None),
    }
}

/// Splits a `Host` header value into host name and port.
///
/// Host names are case-insensitive and come back lowercased. An empty
/// header yields `(None, None)`. A value that is not a valid authority is
/// taken whole as the host name.
#[must_use]
pub fn split_host(host: &str) -> (Option<String>, Option<u16>) {
    if host.is_empty() {
        return (None, None);
    }

    match host.parse::<Authority>() {
        Ok(authority) => (
            Some(authority.host().to_ascii_lowercase()),
            authority.port_u16(),
        ),
        Err(_) => (Some(host.to_ascii_lowercase()), None),
    }
}

#[cfg(test)]
mod tests {
    use avenue_pattern::ParamValue;

    use super::*;

    #[test]
    fn test_parse_relative() {
        let url = ParsedUrl::parse("/home/hello?a=1&b=2");
        assert_eq!(url.pathname, "/home/hello");
        assert_eq!(url.search.as_deref(), Some("a=1&b=2"));
        assert_eq!(url.query.get("a"), Some(&ParamValue::from("1")));
        assert_eq!(url.href, "/home/hello?a=1&b=2");
    }

    #[test]
    fn test_parse_absolute() {
        let url = ParsedUrl::parse("https://shop.local:3000/cart?step=2");
        assert_eq!(url.pathname, "/cart");
        assert_eq!(url.query.get("step"), Some(&ParamValue::from("2")));
    }

    #[test]
    fn test_parse_absolute_without_path() {
        let url = ParsedUrl::parse("http://shop.local");
        assert_eq!(url.pathname, "/");
        assert!(url.search.is_none());
        assert!(url.query.is_empty());
    }

    #[test]
    fn test_parse_drops_fragment() {
        let url = ParsedUrl::parse("docs/intro?x=1#setup");
        assert_eq!(url.pathname, "docs/intro");
        assert_eq!(url.search.as_deref(), Some("x=1"));
    }

    #[test]
    fn test_split_host() {
        assert_eq!(
            split_host("local.test:3000"),
            (Some("local.test".to_string()), Some(3000))
        );
        assert_eq!(split_host("bla.test"), (Some("bla.test".to_string()), None));
        assert_eq!(split_host(""), (None, None));
    }

    #[test]
    fn test_split_host_lowercases() {
        assert_eq!(
            split_host("Example.FR:8080"),
            (Some("example.fr".to_string()), Some(8080))
        );
        assert_eq!(split_host("SHOP.Local"), (Some("shop.local".to_string()), None));
    }
}
