//! Ordered route registry.
//!
//! The store keeps routes in registration order, which is also match
//! priority. Removing a route leaves a hole so every [`RouteId`] stays
//! valid. Ids are never reused, not even after [`RouteStore::clear`]. While a group is being declared, the store records the ids of new
//! routes in a single-slot buffer (the breakpoint).

use crate::error::{RouteError, RouteResult};
use crate::route::{Resolution, Route, RouteId};

#[derive(Debug, Default)]
struct Breakpoint {
    name: Option<String>,
    routes: Vec<RouteId>,
}

/// Ordered collection of routes.
#[derive(Debug, Default)]
pub struct RouteStore {
    routes: Vec<Option<Route>>,
    /// Id of the first slot in `routes`; advanced by `clear`.
    base: usize,
    breakpoint: Option<Breakpoint>,
}

impl RouteStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a route and returns it with its id assigned.
    ///
    /// If a breakpoint is open, the route is also recorded there.
    pub fn add(&mut self, mut route: Route) -> &mut Route {
        let slot = self.routes.len();
        let id = RouteId(self.base + slot);
        route.set_id(id);

        if let Some(breakpoint) = &mut self.breakpoint {
            breakpoint.routes.push(id);
        }

        self.routes.push(None);
        self.routes[slot].insert(route)
    }

    fn slot(&self, id: RouteId) -> Option<usize> {
        id.0.checked_sub(self.base)
    }

    /// Opens a breakpoint. Fails if one is already open.
    pub fn breakpoint(&mut self, name: Option<&str>) -> RouteResult<()> {
        if self.breakpoint.is_some() {
            return Err(RouteError::NestedGroup);
        }
        self.breakpoint = Some(Breakpoint {
            name: name.map(str::to_string),
            routes: Vec::new(),
        });
        Ok(())
    }

    /// Whether a breakpoint is open.
    #[must_use]
    pub const fn has_breakpoint(&self) -> bool {
        self.breakpoint.is_some()
    }

    /// Name given to the open breakpoint.
    #[must_use]
    pub fn breakpoint_name(&self) -> Option<&str> {
        self.breakpoint.as_ref().and_then(|bp| bp.name.as_deref())
    }

    /// Ids recorded by the open breakpoint, in registration order.
    #[must_use]
    pub fn breakpoint_routes(&self) -> &[RouteId] {
        self.breakpoint.as_ref().map_or(&[][..], |bp| &bp.routes)
    }

    /// Closes the breakpoint and returns the ids it recorded that still
    /// refer to a route. Closing without an open breakpoint returns nothing.
    pub fn release_breakpoint(&mut self) -> Vec<RouteId> {
        let Some(breakpoint) = self.breakpoint.take() else {
            return Vec::new();
        };
        breakpoint
            .routes
            .into_iter()
            .filter(|id| self.get(*id).is_some())
            .collect()
    }

    /// Removes a route, leaving a hole at its position.
    pub fn remove(&mut self, id: RouteId) -> Option<Route> {
        let slot = self.slot(id)?;
        let removed = self.routes.get_mut(slot)?.take();
        if removed.is_some() {
            tracing::debug!(route = id.0, "Removed route");
        }
        removed
    }

    /// Removes every route. Ids handed out earlier no longer resolve.
    pub fn clear(&mut self) {
        self.base += self.routes.len();
        self.routes.clear();
        if let Some(breakpoint) = &mut self.breakpoint {
            breakpoint.routes.clear();
        }
    }

    /// Route by id.
    #[must_use]
    pub fn get(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(self.slot(id)?).and_then(Option::as_ref)
    }

    /// Mutable route by id.
    pub fn get_mut(&mut self, id: RouteId) -> Option<&mut Route> {
        let slot = self.slot(id)?;
        self.routes.get_mut(slot).and_then(Option::as_mut)
    }

    /// All slots in registration order, holes included.
    #[must_use]
    pub fn list(&self) -> &[Option<Route>] {
        &self.routes
    }

    /// Live routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().flatten()
    }

    /// Number of live routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether the store has no live routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Finds a route by name or path template.
    ///
    /// A route whose domain template is a plain host (no parameters) only
    /// matches when `domain` equals that host. Routes without a domain
    /// template and routes with domain parameters match for any `domain`.
    #[must_use]
    pub fn find(&self, name_or_path: &str, domain: Option<&str>) -> Option<&Route> {
        self.iter().find(|route| {
            if route.name() != name_or_path && route.path_template() != name_or_path {
                return false;
            }
            match route.domain_template() {
                Some(literal) if !literal.is_empty() && route.domain_keys().is_empty() => {
                    domain.is_some_and(|domain| domain.eq_ignore_ascii_case(literal))
                }
                _ => true,
            }
        })
    }

    /// Resolves `path` and `host` against the live routes; the first route
    /// that matches wins.
    #[must_use]
    pub fn resolve(&self, path: &str, host: Option<&str>) -> Option<(&Route, Resolution)> {
        self.iter()
            .find_map(|route| route.resolve(path, host).map(|resolution| (route, resolution)))
    }
}

#[cfg(test)]
mod tests {
    use avenue_pattern::PatternOptions;

    use super::*;

    fn route(template: &str, page: &str) -> Route {
        Route::new(template, page, PatternOptions::default()).unwrap()
    }

    #[test]
    fn test_add_assigns_ids() {
        let mut store = RouteStore::new();
        let first = store.add(route("/a", "a")).id();
        let second = store.add(route("/b", "b")).id();

        assert_eq!(first.index(), 0);
        assert_eq!(second.index(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(second).map(Route::page), Some("b"));
    }

    #[test]
    fn test_remove_leaves_hole() {
        let mut store = RouteStore::new();
        let first = store.add(route("/a", "a")).id();
        let second = store.add(route("/b", "b")).id();

        let removed = store.remove(first).unwrap();
        assert_eq!(removed.page(), "a");
        assert!(store.remove(first).is_none());

        assert_eq!(store.list().len(), 2);
        assert!(store.list()[0].is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(second).map(Route::page), Some("b"));
    }

    #[test]
    fn test_clear() {
        let mut store = RouteStore::new();
        store.add(route("/a", "a"));
        store.clear();
        assert!(store.is_empty());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let mut store = RouteStore::new();
        let stale = store.add(route("/a", "a")).id();
        store.add(route("/b", "b"));
        store.clear();

        let fresh = store.add(route("/c", "c")).id();
        assert_ne!(fresh, stale);
        assert_eq!(fresh.index(), 2);
        assert!(store.get(stale).is_none());
        assert!(store.get_mut(stale).is_none());
        assert!(store.remove(stale).is_none());
        assert_eq!(store.get(fresh).map(Route::page), Some("c"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_breakpoint_records_routes() {
        let mut store = RouteStore::new();
        store.add(route("/before", "before"));

        store.breakpoint(Some("g")).unwrap();
        assert!(store.has_breakpoint());
        assert_eq!(store.breakpoint_name(), Some("g"));

        let a = store.add(route("/a", "a")).id();
        let b = store.add(route("/b", "b")).id();
        assert_eq!(store.breakpoint_routes(), &[a, b]);

        assert_eq!(store.release_breakpoint(), vec![a, b]);
        assert!(!store.has_breakpoint());
        assert!(store.breakpoint_routes().is_empty());

        store.add(route("/after", "after"));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_breakpoint_single_slot() {
        let mut store = RouteStore::new();
        store.breakpoint(None).unwrap();
        assert!(matches!(store.breakpoint(None), Err(RouteError::NestedGroup)));
        store.release_breakpoint();
        store.breakpoint(None).unwrap();
    }

    #[test]
    fn test_release_skips_removed_routes() {
        let mut store = RouteStore::new();
        store.breakpoint(None).unwrap();
        let a = store.add(route("/a", "a")).id();
        let b = store.add(route("/b", "b")).id();
        store.remove(a);
        assert_eq!(store.release_breakpoint(), vec![b]);
    }

    #[test]
    fn test_find_by_name_or_path() {
        let mut store = RouteStore::new();
        store.add(route("/home/:slug", "homepage")).named("homepage");

        assert!(store.find("homepage", None).is_some());
        assert!(store.find("/home/:slug", None).is_some());
        assert!(store.find("/home/hello", None).is_none());
    }

    #[test]
    fn test_find_literal_domain_tie_break() {
        let mut store = RouteStore::new();
        store
            .add(route("/about", "about-en"))
            .named("about")
            .domain("example.com")
            .unwrap();
        store
            .add(route("/a-propos", "about-fr"))
            .named("about")
            .domain("example.fr")
            .unwrap();

        let en = store.find("about", Some("example.com")).unwrap();
        assert_eq!(en.page(), "about-en");
        let fr = store.find("about", Some("example.fr")).unwrap();
        assert_eq!(fr.page(), "about-fr");
        let mixed = store.find("about", Some("Example.FR")).unwrap();
        assert_eq!(mixed.page(), "about-fr");
        assert!(store.find("about", None).is_none());
    }

    #[test]
    fn test_find_subdomain_route_ignores_domain() {
        let mut store = RouteStore::new();
        store
            .add(route("/", "tenant"))
            .named("tenant")
            .domain(":tenant.example.com")
            .unwrap();

        assert!(store.find("tenant", Some("anything.else")).is_some());
        assert!(store.find("tenant", None).is_some());
    }

    #[test]
    fn test_resolve_first_match() {
        let mut store = RouteStore::new();
        store.add(route("/posts/new", "new-post"));
        store.add(route("/posts/:id", "post"));

        let (route, _) = store.resolve("/posts/new", None).unwrap();
        assert_eq!(route.page(), "new-post");
        let (route, resolution) = store.resolve("/posts/42", None).unwrap();
        assert_eq!(route.page(), "post");
        assert_eq!(resolution.path, "/posts/42");
    }
}
