//! Link rendering.

use avenue_pattern::ParamValues;

use crate::route::{LinkProps, UrlOptions};
use crate::router::Router;

/// Props for a link to a named route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    /// The route was found and its URL built.
    Route(LinkProps),
    /// No route could be used; render a plain link instead.
    Fallback,
}

impl Link {
    /// The props, if the route was found.
    #[must_use]
    pub const fn props(&self) -> Option<&LinkProps> {
        match self {
            Self::Route(props) => Some(props),
            Self::Fallback => None,
        }
    }

    /// Whether the caller should fall back to a plain link.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }
}

impl Router {
    /// Builds link props for the route named `name`.
    ///
    /// The route is looked up in `options.domain`, or the context's domain
    /// when no domain is given. A missing route, or parameters the route
    /// cannot be built from, yield [`Link::Fallback`].
    #[must_use]
    pub fn link(&self, name: &str, params: &ParamValues, options: &UrlOptions) -> Link {
        let domain = options
            .domain
            .as_deref()
            .or(self.context().domain.as_deref());

        let Some(route) = self.find(name, domain) else {
            tracing::debug!(route = %name, domain = ?domain, "Link target not found");
            return Link::Fallback;
        };

        match route.link_props(self.context(), params, options) {
            Ok(props) => Link::Route(props),
            Err(e) => {
                tracing::debug!(route = %name, error = %e, "Cannot build link");
                Link::Fallback
            }
        }
    }
}
