//! A single page route: path template, optional domain template, page
//! reference, name and attached data.

use avenue_pattern::{Captures, Key, ParamValue, ParamValues, Pattern, PatternOptions};
use indexmap::IndexMap;
use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::context::NavigationContext;
use crate::error::{RouteError, RouteResult};
use crate::query::{to_querystring, QueryParams};

/// Free-form data attached to a route.
pub type RouteData = serde_json::Map<String, serde_json::Value>;

/// Path parameters extracted by a match. Optional parameters that were
/// absent map to `None`.
pub type RouteParams = IndexMap<String, Option<ParamValue>>;

/// Domain parameters extracted by a match.
pub type SubdomainParams = IndexMap<String, Option<String>>;

/// Identifies a route inside its [`RouteStore`](crate::RouteStore).
///
/// Ids stay valid after other routes are removed and are never handed out
/// twice by the same store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(pub(crate) usize);

impl RouteId {
    /// Registration ordinal of the route, counted over the store's lifetime.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The outcome of matching one route against a path and host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The matched path.
    pub path: String,
    /// Path parameters, in template order.
    pub params: RouteParams,
    /// Domain parameters, in template order.
    pub subdomains: SubdomainParams,
}

/// Overrides for [`Route::url`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlOptions {
    /// Protocol for absolute URLs; the context's protocol otherwise.
    pub protocol: Option<String>,
    /// Target domain; the compiled domain template otherwise.
    pub domain: Option<String>,
    /// Query appended to relative URLs.
    pub query: QueryParams,
}

impl UrlOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the protocol.
    #[must_use]
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Sets the target domain.
    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Sets the query.
    #[must_use]
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }
}

/// What a link component needs to navigate to a route.
///
/// `href` is the internal target (the page); `as_path` is the URL shown to
/// the user, present only for relative URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkProps {
    /// Internal navigation target.
    pub href: String,
    /// Displayed URL.
    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    pub as_path: Option<String>,
}

impl LinkProps {
    /// The URL the user ends up seeing.
    #[must_use]
    pub fn visible_path(&self) -> &str {
        self.as_path.as_deref().unwrap_or(&self.href)
    }
}

/// Serializable view of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSnapshot {
    /// Normalized path template.
    pub path_template: String,
    /// Route name.
    pub name: String,
    /// Domain template, if any.
    pub domain_template: Option<String>,
    /// Attached data.
    pub data: Option<RouteData>,
    /// Page reference.
    pub page: String,
}

/// A page route.
///
/// Routes are created through [`Router::add`](crate::Router::add) and
/// configured through the returned `&mut Route`:
///
/// ```rust
/// use avenue_router::Router;
///
/// let mut router = Router::new();
/// router
///     .add("/blog/:slug", "post")
///     .unwrap()
///     .named("blog.post")
///     .domain(":lang.example.com")
///     .unwrap();
///
/// let route = router.find("blog.post", None).unwrap();
/// assert_eq!(route.domain_template(), Some(":lang.example.com"));
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    id: RouteId,
    name: String,
    page: String,
    path: Pattern,
    domain: Option<Pattern>,
    data: Option<RouteData>,
    options: PatternOptions,
}

impl Route {
    pub(crate) fn new(template: &str, page: &str, options: PatternOptions) -> RouteResult<Self> {
        let template = normalize_path(template);
        let path = Pattern::parse(&template, options)
            .map_err(|source| RouteError::invalid_template(template.clone(), source))?;

        Ok(Self {
            id: RouteId(0),
            name: template,
            page: page.to_string(),
            path,
            domain: None,
            data: None,
            options,
        })
    }

    pub(crate) fn set_id(&mut self, id: RouteId) {
        self.id = id;
    }

    /// Id of the route in its store.
    #[must_use]
    pub const fn id(&self) -> RouteId {
        self.id
    }

    /// Route name. Defaults to the normalized path template.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Page reference.
    #[must_use]
    pub fn page(&self) -> &str {
        &self.page
    }

    /// Normalized path template.
    #[must_use]
    pub fn path_template(&self) -> &str {
        self.path.template()
    }

    /// Domain template, if any.
    #[must_use]
    pub fn domain_template(&self) -> Option<&str> {
        self.domain.as_ref().map(Pattern::template)
    }

    /// Path parameter keys, in template order.
    #[must_use]
    pub fn path_keys(&self) -> &[Key] {
        self.path.keys()
    }

    /// Domain parameter keys, in template order.
    #[must_use]
    pub fn domain_keys(&self) -> &[Key] {
        self.domain.as_ref().map_or(&[][..], Pattern::keys)
    }

    /// Attached data.
    #[must_use]
    pub fn attached_data(&self) -> Option<&RouteData> {
        self.data.as_ref()
    }

    /// Renames the route.
    pub fn named(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Prepends a path prefix.
    ///
    /// One leading and one trailing `/` are stripped from `prefix`. The
    /// root route `/` becomes the bare prefix. On error the route is left
    /// unchanged.
    pub fn prefix(&mut self, prefix: &str) -> RouteResult<&mut Self> {
        let clean = format!("/{}", trim_slashes(prefix));
        let template = if self.path.template() == "/" {
            clean
        } else {
            format!("{clean}{}", self.path.template())
        };

        self.path = Pattern::parse(&template, self.options)
            .map_err(|source| RouteError::invalid_template(template, source))?;
        Ok(self)
    }

    /// Restricts the route to hosts matching `template`.
    ///
    /// One leading and one trailing `/` are stripped. `:lang.example.com`
    /// captures `lang`; a `.` before a parameter acts as its prefix.
    pub fn domain(&mut self, template: &str) -> RouteResult<&mut Self> {
        let template = trim_slashes(template);
        let pattern = Pattern::parse(template, self.options)
            .map_err(|source| RouteError::invalid_domain(template, source))?;
        self.domain = Some(pattern);
        Ok(self)
    }

    /// Replaces the attached data.
    pub fn data(&mut self, data: RouteData) -> &mut Self {
        self.data = Some(data);
        self
    }

    /// Matches `path` and `host` against this route.
    ///
    /// A route with a domain template never matches without a host.
    #[must_use]
    pub fn resolve(&self, path: &str, host: Option<&str>) -> Option<Resolution> {
        let subdomains = match &self.domain {
            Some(domain) => {
                let captures = domain.captures(host?)?;
                domain
                    .keys()
                    .iter()
                    .zip(captures)
                    .map(|(key, value)| (key.name().to_string(), value))
                    .collect()
            }
            None => SubdomainParams::new(),
        };

        if self.path.is_literal() && self.path.template() == path {
            return Some(Resolution {
                path: path.to_string(),
                params: RouteParams::new(),
                subdomains,
            });
        }

        let captures = self.path.captures(path)?;
        Some(Resolution {
            path: path.to_string(),
            params: fold_params(self.path.keys(), captures),
            subdomains,
        })
    }

    /// Builds the path for `params`, without query or domain.
    pub fn path_for(&self, params: &ParamValues) -> RouteResult<String> {
        self.path
            .compile(params)
            .map_err(|source| RouteError::url_generation(self.name.clone(), source))
    }

    /// Builds a URL for this route.
    ///
    /// The result is absolute (`protocol://domain[:port]/path`, without
    /// query) when a target domain is known and differs from the context's
    /// domain. Otherwise it is the path followed by the query, if any.
    pub fn url(
        &self,
        context: &NavigationContext,
        params: &ParamValues,
        options: &UrlOptions,
    ) -> RouteResult<String> {
        let compiled_domain = match &self.domain {
            Some(domain) => Some(
                domain
                    .compile(params)
                    .map_err(|source| RouteError::url_generation(self.name.clone(), source))?,
            ),
            None => None,
        };
        let path = self.path_for(params)?;

        match options.domain.clone().or(compiled_domain) {
            Some(domain)
                if !context
                    .domain
                    .as_deref()
                    .is_some_and(|current| current.eq_ignore_ascii_case(&domain)) =>
            {
                let protocol = options.protocol.as_deref().unwrap_or(&context.protocol);
                let port = context.port.map(|port| format!(":{port}")).unwrap_or_default();
                Ok(format!("{protocol}://{domain}{port}{path}"))
            }
            _ if options.query.is_empty() => Ok(path),
            _ => Ok(format!("{path}{}", to_querystring(&options.query))),
        }
    }

    /// Builds link props for this route.
    ///
    /// Relative URLs navigate internally to `/<page>` and display the URL;
    /// absolute URLs are used directly.
    pub fn link_props(
        &self,
        context: &NavigationContext,
        params: &ParamValues,
        options: &UrlOptions,
    ) -> RouteResult<LinkProps> {
        let url = self.url(context, params, options)?;

        if url.starts_with('/') {
            Ok(LinkProps {
                href: format!("/{}", self.page.trim_start_matches('/')),
                as_path: Some(url),
            })
        } else {
            Ok(LinkProps {
                href: url,
                as_path: None,
            })
        }
    }

    /// Serializable view of the route.
    #[must_use]
    pub fn snapshot(&self) -> RouteSnapshot {
        RouteSnapshot {
            path_template: self.path.template().to_string(),
            name: self.name.clone(),
            domain_template: self.domain_template().map(str::to_string),
            data: self.data.clone(),
            page: self.page.clone(),
        }
    }
}

fn fold_params(keys: &[Key], captures: Captures) -> RouteParams {
    keys.iter()
        .zip(captures)
        .map(|(key, raw)| {
            let value = raw.map(|raw| {
                if key.is_repeating() {
                    ParamValue::Sequence(raw.split(key.delimiter).map(decode).collect())
                } else {
                    ParamValue::Single(decode(&raw))
                }
            });
            (key.name().to_string(), value)
        })
        .collect()
}

/// Reverses the percent-encoding applied by [`Pattern::compile`].
fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Strips one leading and one trailing `/`.
fn trim_slashes(value: &str) -> &str {
    let value = value.strip_prefix('/').unwrap_or(value);
    value.strip_suffix('/').unwrap_or(value)
}

/// Normalizes a path template to exactly one leading `/`.
fn normalize_path(template: &str) -> String {
    format!("/{}", trim_slashes(template))
}
