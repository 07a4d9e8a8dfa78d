//! Page routing for server-rendered applications.
//!
//! Routes map a URL path template (and optionally a host template) to a
//! page. The router resolves incoming requests to pages, builds URLs and
//! link props for named routes, and drives client-side navigation.
//!
//! # Features
//!
//! - **Named routes**: link to `blog.post` instead of hard-coding `/blog/:slug`
//! - **Groups**: prefix, rename, restrict or annotate routes declared together
//! - **Domain routes**: literal hosts (`example.fr`) or host templates
//!   (`:tenant.example.com`) whose captures land in the query
//! - **First-match resolution**: routes are tried in registration order
//! - **Absolute URLs**: links to another domain carry protocol, host and port
//! - **Static export**: every concrete path and its page, for pre-rendering
//!
//! # Example
//!
//! ```rust
//! use avenue_pattern::{ParamValue, ParamValues};
//! use avenue_router::{Router, UrlOptions};
//!
//! let mut router = Router::new();
//! router.context_mut().domain = Some("local.test".to_string());
//!
//! router.add("/home/:slug", "homepage").unwrap().named("homepage");
//! router
//!     .add("/", "tenant")
//!     .unwrap()
//!     .named("tenant")
//!     .domain(":tenant.local.test")
//!     .unwrap();
//!
//! // Resolve
//! let resolved = router.match_route("/home/hello", "local.test").unwrap();
//! assert_eq!(resolved.page, "homepage");
//! assert_eq!(resolved.param("slug"), Some("hello"));
//!
//! // Link
//! let params = ParamValues::from([("tenant".to_string(), ParamValue::from("acme"))]);
//! let link = router.link("tenant", &params, &UrlOptions::new());
//! assert_eq!(link.props().unwrap().href, "http://acme.local.test/");
//! ```
//!
//! # Architecture
//!
//! ```text
//!   Router ──owns──▶ RouteStore ──holds──▶ [Route]*  (registration order)
//!     │                  │                    │
//!     │             breakpoint ──▶ Group      ├── path:   Pattern
//!     │                                       └── domain: Option<Pattern>
//!     ├── match_route ─▶ ResolvedRoute
//!     ├── link        ─▶ Link / LinkProps
//!     ├── push_route  ─▶ History           (client)
//!     └── handle_request ─▶ RequestHandler (server)
//! ```

mod config;
mod context;
mod error;
mod export;
mod group;
mod handler;
mod link;
mod navigation;
mod query;
mod resolved;
mod route;
mod router;
mod store;
mod url;

pub use config::RouterConfig;
pub use context::NavigationContext;
pub use error::{ConfigError, ErrorKind, RouteError, RouteResult};
pub use export::{ExportEntry, ExportMap, ParamEnumerator};
pub use group::Group;
pub use handler::{PageRequest, RequestHandler};
pub use link::Link;
pub use navigation::History;
pub use query::{parse_query, to_querystring, QueryParams};
pub use resolved::ResolvedRoute;
pub use route::{
    LinkProps, Resolution, Route, RouteData, RouteId, RouteParams, RouteSnapshot,
    SubdomainParams, UrlOptions,
};
pub use router::Router;
pub use store::RouteStore;
pub use url::{split_host, ParsedUrl};
