//! The per-request result of a successful match.

use avenue_pattern::ParamValue;
use serde::Serialize;

use crate::query::QueryParams;
use crate::route::{Resolution, Route, RouteData, RouteParams};
use crate::url::ParsedUrl;

/// A matched route together with everything extracted from the request.
///
/// `query` holds the URL's query parameters merged with the route's domain
/// parameters; a domain parameter wins over a query parameter of the same
/// name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRoute {
    /// Normalized path template of the route.
    pub path_template: String,
    /// Route name.
    pub name: String,
    /// Domain template of the route, if any.
    pub domain_template: Option<String>,
    /// Data attached to the route.
    pub data: Option<RouteData>,
    /// Page to render.
    pub page: String,
    /// Port from the request host.
    pub port: Option<u16>,
    /// The parsed request URL.
    pub parsed_url: ParsedUrl,
    /// Path the route matched.
    pub pathname: String,
    /// Query merged with domain parameters.
    pub query: QueryParams,
    /// Path parameters.
    pub params: RouteParams,
    /// Host name from the request.
    pub domain: Option<String>,
}

impl ResolvedRoute {
    pub(crate) fn new(
        route: &Route,
        resolution: Resolution,
        parsed_url: ParsedUrl,
        domain: Option<String>,
        port: Option<u16>,
    ) -> Self {
        let mut query = parsed_url.query.clone();
        for (key, value) in resolution.subdomains {
            match value {
                Some(value) => {
                    query.insert(key, ParamValue::Single(value));
                }
                None => {
                    query.shift_remove(&key);
                }
            }
        }

        let snapshot = route.snapshot();
        Self {
            path_template: snapshot.path_template,
            name: snapshot.name,
            domain_template: snapshot.domain_template,
            data: snapshot.data,
            page: snapshot.page,
            port,
            parsed_url,
            pathname: resolution.path,
            query,
            params: resolution.params,
            domain,
        }
    }

    /// A path parameter as a single string.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)?.as_ref()?.as_single()
    }
}
