//! Batch configuration of routes declared together.

use crate::error::RouteResult;
use crate::route::{Route, RouteData, RouteId};
use crate::store::RouteStore;

/// The routes declared inside one [`Router::group`](crate::Router::group)
/// callback.
///
/// Every mutator applies to each route in declaration order and returns the
/// group, so calls chain:
///
/// ```rust
/// use avenue_router::Router;
///
/// let mut router = Router::new();
/// router
///     .group(Some("admin"), |r| {
///         r.add("/users", "admin-users")?.named("users");
///         r.add("/", "admin-home")?.named("home");
///         Ok(())
///     })
///     .unwrap()
///     .prefix("admin")
///     .unwrap();
///
/// assert_eq!(router.find("admin.users", None).unwrap().path_template(), "/admin/users");
/// assert_eq!(router.find("admin.home", None).unwrap().path_template(), "/admin");
/// ```
#[derive(Debug)]
pub struct Group<'a> {
    store: &'a mut RouteStore,
    ids: Vec<RouteId>,
}

impl<'a> Group<'a> {
    pub(crate) fn new(store: &'a mut RouteStore, ids: Vec<RouteId>) -> Self {
        Self { store, ids }
    }

    /// Ids of the grouped routes, in declaration order.
    #[must_use]
    pub fn ids(&self) -> &[RouteId] {
        &self.ids
    }

    /// The grouped routes, in declaration order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.ids.iter().filter_map(|id| self.store.get(*id))
    }

    /// Number of grouped routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the group captured no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Prefixes every non-empty route name with `name.`.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.for_each(|route| {
            if !route.name().is_empty() {
                let qualified = format!("{name}.{}", route.name());
                route.named(qualified);
            }
        });
        self
    }

    /// Prepends `prefix` to every route path.
    ///
    /// Stops at the first route whose new template fails to compile; routes
    /// before it keep the prefix.
    pub fn prefix(mut self, prefix: &str) -> RouteResult<Self> {
        self.try_for_each(|route| route.prefix(prefix).map(|_| ()))?;
        Ok(self)
    }

    /// Restricts every route to `template`.
    pub fn domain(mut self, template: &str) -> RouteResult<Self> {
        self.try_for_each(|route| route.domain(template).map(|_| ()))?;
        Ok(self)
    }

    /// Attaches a copy of `data` to every route.
    #[must_use]
    pub fn data(mut self, data: RouteData) -> Self {
        self.for_each(|route| {
            route.data(data.clone());
        });
        self
    }

    fn for_each(&mut self, mut f: impl FnMut(&mut Route)) {
        for id in &self.ids {
            if let Some(route) = self.store.get_mut(*id) {
                f(route);
            }
        }
    }

    fn try_for_each(&mut self, mut f: impl FnMut(&mut Route) -> RouteResult<()>) -> RouteResult<()> {
        for id in &self.ids {
            if let Some(route) = self.store.get_mut(*id) {
                f(route)?;
            }
        }
        Ok(())
    }
}
