//! High-level router API.
//!
//! This module provides the main [`Router`] struct: the registry routes are
//! declared on, and the entry point for matching and URL generation.

use std::fmt;

use avenue_pattern::PatternOptions;

use crate::config::RouterConfig;
use crate::context::NavigationContext;
use crate::error::{RouteError, RouteResult};
use crate::group::Group;
use crate::navigation::History;
use crate::resolved::ResolvedRoute;
use crate::route::{Route, RouteId};
use crate::store::RouteStore;
use crate::url::{split_host, ParsedUrl};

/// A registry of page routes.
///
/// Routes are matched in registration order and the first match wins, so
/// specific routes must be added before generic ones.
///
/// # Example
///
/// ```rust
/// use avenue_router::Router;
///
/// let mut router = Router::new();
/// router.add("/home/:slug", "homepage").unwrap().named("homepage");
///
/// let resolved = router.match_route("/home/hello", "local.test").unwrap();
/// assert_eq!(resolved.page, "homepage");
/// assert_eq!(resolved.param("slug"), Some("hello"));
///
/// assert!(router.match_route("/missing", "local.test").is_none());
/// ```
pub struct Router {
    store: RouteStore,
    context: NavigationContext,
    options: PatternOptions,
    pub(crate) history: Option<Box<dyn History>>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("store", &self.store)
            .field("context", &self.context)
            .field("options", &self.options)
            .field("client", &self.history.is_some())
            .finish()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Creates an empty server-side router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: RouteStore::new(),
            context: NavigationContext::default(),
            options: PatternOptions::default(),
            history: None,
        }
    }

    /// Creates an empty router from configuration.
    #[must_use]
    pub fn with_config(config: &RouterConfig) -> Self {
        Self {
            store: RouteStore::new(),
            context: NavigationContext::from_config(config),
            options: config.pattern_options(),
            history: None,
        }
    }

    /// Creates an empty client-side router for a page loaded at `location`.
    ///
    /// Navigation helpers such as [`Router::push_route`] hand their targets
    /// to `history`.
    #[must_use]
    pub fn client(location: &str, history: impl History + 'static) -> Self {
        Self {
            store: RouteStore::new(),
            context: NavigationContext::from_location(location),
            options: PatternOptions::default(),
            history: Some(Box::new(history)),
        }
    }

    /// Whether the router runs in a client context.
    #[must_use]
    pub fn is_client(&self) -> bool {
        self.history.is_some()
    }

    /// Registers a route for `template` rendering `page`.
    ///
    /// The route is named after its normalized template until renamed.
    pub fn add(&mut self, template: &str, page: &str) -> RouteResult<&mut Route> {
        let route = Route::new(template, page, self.options)?;
        tracing::debug!(
            template = %route.path_template(),
            page = %page,
            "Registered route"
        );
        Ok(self.store.add(route))
    }

    /// Declares a group of routes.
    ///
    /// Routes added to the router inside `callback`, and only those, form
    /// the returned [`Group`]. With a name, the group's routes are renamed
    /// to `name.route`. Groups do not nest: opening a group inside another
    /// fails with [`RouteError::NestedGroup`], and both groups are closed.
    ///
    /// An error returned by `callback` closes the group and is passed on.
    pub fn group<F>(&mut self, name: Option<&str>, callback: F) -> RouteResult<Group<'_>>
    where
        F: FnOnce(&mut Self) -> RouteResult<()>,
    {
        if self.store.has_breakpoint() {
            self.store.release_breakpoint();
            tracing::warn!(group = ?name, "Attempted to open a nested route group");
            return Err(RouteError::NestedGroup);
        }

        self.store.breakpoint(name)?;
        if let Err(e) = callback(self) {
            self.store.release_breakpoint();
            return Err(e);
        }
        let ids = self.store.release_breakpoint();

        tracing::debug!(group = ?name, routes = ids.len(), "Declared route group");

        let group = Group::new(&mut self.store, ids);
        Ok(match name {
            Some(name) => group.named(name),
            None => group,
        })
    }

    /// Resolves a request URL and `Host` header value.
    ///
    /// `url` may be origin-relative or absolute. `host` may carry a port and
    /// may be empty. Returns `None` when no route matches.
    #[must_use]
    pub fn match_route(&self, url: &str, host: &str) -> Option<ResolvedRoute> {
        let (domain, port) = split_host(host);
        let parsed = ParsedUrl::parse(url);

        let Some((route, resolution)) = self.store.resolve(&parsed.pathname, domain.as_deref())
        else {
            tracing::trace!(path = %parsed.pathname, host = %host, "No route matched");
            return None;
        };

        tracing::trace!(
            path = %parsed.pathname,
            route = %route.name(),
            page = %route.page(),
            "Route matched"
        );
        Some(ResolvedRoute::new(route, resolution, parsed, domain, port))
    }

    /// Resolves the page currently shown, as recorded in the navigation
    /// context.
    #[must_use]
    pub fn current_route(&self) -> Option<ResolvedRoute> {
        let url = self.context.current_url.as_deref()?;
        let host = self.context.current_host.as_deref().unwrap_or_default();
        self.match_route(url, host)
    }

    /// Finds a route by name or path template. See [`RouteStore::find`].
    #[must_use]
    pub fn find(&self, name_or_path: &str, domain: Option<&str>) -> Option<&Route> {
        self.store.find(name_or_path, domain)
    }

    /// Route by id.
    #[must_use]
    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.store.get(id)
    }

    /// Mutable route by id.
    pub fn route_mut(&mut self, id: RouteId) -> Option<&mut Route> {
        self.store.get_mut(id)
    }

    /// Removes a route, keeping the positions of the others.
    pub fn remove(&mut self, id: RouteId) -> Option<Route> {
        self.store.remove(id)
    }

    /// All route slots in registration order, holes included.
    #[must_use]
    pub fn list(&self) -> &[Option<Route>] {
        self.store.list()
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &RouteStore {
        &self.store
    }

    /// The underlying store, mutably.
    pub fn store_mut(&mut self) -> &mut RouteStore {
        &mut self.store
    }

    /// The navigation context.
    #[must_use]
    pub const fn context(&self) -> &NavigationContext {
        &self.context
    }

    /// The navigation context, mutably.
    pub fn context_mut(&mut self) -> &mut NavigationContext {
        &mut self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_new() {
        let router = Router::new();
        assert!(router.store().is_empty());
        assert!(!router.is_client());
        assert_eq!(router.context().protocol, "http");
    }

    #[test]
    fn test_add_and_match() {
        let mut router = Router::new();
        router.add("/users/:id", "user").unwrap();

        let resolved = router.match_route("/users/7?tab=posts", "").unwrap();
        assert_eq!(resolved.page, "user");
        assert_eq!(resolved.name, "/users/:id");
        assert_eq!(resolved.pathname, "/users/7");
        assert_eq!(resolved.param("id"), Some("7"));
        assert_eq!(
            resolved.query.get("tab").and_then(|v| v.as_single()),
            Some("posts")
        );
        assert!(resolved.domain.is_none());
    }

    #[test]
    fn test_match_reads_port() {
        let mut router = Router::new();
        router.add("/", "index").unwrap();

        let resolved = router.match_route("/", "local.test:3000").unwrap();
        assert_eq!(resolved.domain.as_deref(), Some("local.test"));
        assert_eq!(resolved.port, Some(3000));
    }

    #[test]
    fn test_add_invalid_template() {
        let mut router = Router::new();
        let err = router.add("/a/(b", "p").unwrap_err();
        assert!(matches!(err, RouteError::InvalidTemplate { .. }));
        assert!(router.store().is_empty());
    }

    #[test]
    fn test_with_config_case_sensitive() {
        let config = RouterConfig {
            case_sensitive: true,
            ..RouterConfig::default()
        };
        let mut router = Router::with_config(&config);
        router.add("/About", "about").unwrap();
        assert!(router.match_route("/About", "").is_some());
        assert!(router.match_route("/about", "").is_none());

        let mut relaxed = Router::new();
        relaxed.add("/About", "about").unwrap();
        assert!(relaxed.match_route("/about", "").is_some());
    }

    #[test]
    fn test_with_config_strict() {
        let config = RouterConfig {
            strict: true,
            ..RouterConfig::default()
        };
        let mut router = Router::with_config(&config);
        router.add("/users/:id", "user").unwrap();
        assert!(router.match_route("/users/1", "").is_some());
        assert!(router.match_route("/users/1/", "").is_none());
    }

    #[test]
    fn test_current_route() {
        let mut router = Router::new();
        router.add("/cart", "cart").unwrap();
        assert!(router.current_route().is_none());

        router.context_mut().current_url = Some("/cart".to_string());
        assert_eq!(router.current_route().map(|r| r.page), Some("cart".to_string()));
    }

    #[test]
    fn test_remove_route() {
        let mut router = Router::new();
        let id = router.add("/a", "a").unwrap().id();
        router.add("/b", "b").unwrap();

        assert_eq!(router.remove(id).map(|r| r.page().to_string()), Some("a".to_string()));
        assert!(router.match_route("/a", "").is_none());
        assert!(router.route(id).is_none());
        assert_eq!(router.list().len(), 2);
    }
}
