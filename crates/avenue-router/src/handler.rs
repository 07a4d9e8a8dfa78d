//! Server-side request handling.
//!
//! [`Router::handle_request`] resolves an incoming request and hands the
//! result to a [`RequestHandler`], the rendering layer of the host
//! application. Requests that match no route go to the handler's fallback
//! untouched.

use crate::resolved::ResolvedRoute;
use crate::router::Router;
use crate::url::{split_host, ParsedUrl};

/// The parts of an incoming request routing looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<'a> {
    /// Request target, origin-relative or absolute.
    pub url: &'a str,
    /// `Host` header value.
    pub host: &'a str,
    /// `Referer` header value.
    pub referer: Option<&'a str>,
}

impl<'a> PageRequest<'a> {
    /// A request without a referer.
    #[must_use]
    pub const fn new(url: &'a str, host: &'a str) -> Self {
        Self {
            url,
            host,
            referer: None,
        }
    }

    /// Sets the referer.
    #[must_use]
    pub fn with_referer(mut self, referer: &'a str) -> Self {
        self.referer = Some(referer);
        self
    }

    /// Protocol taken from the referer, `http` when there is none.
    #[must_use]
    pub fn protocol(&self) -> &'a str {
        self.referer
            .and_then(|referer| referer.split_once("://"))
            .map(|(scheme, _)| scheme)
            .filter(|scheme| !scheme.is_empty())
            .unwrap_or("http")
    }
}

/// Renders pages for resolved requests.
pub trait RequestHandler {
    /// What rendering produces.
    type Output;

    /// Renders `route.page` with `route.query`.
    fn render(&mut self, route: &ResolvedRoute) -> Self::Output;

    /// Handles a request no route matched.
    fn fallback(&mut self, url: &ParsedUrl) -> Self::Output;
}

impl Router {
    /// Resolves `request` and dispatches it to `handler`.
    ///
    /// The navigation context is updated from the request first, so
    /// [`Router::current_route`] and URL generation during rendering see the
    /// request's host, port and protocol.
    pub fn handle_request<H: RequestHandler>(
        &mut self,
        request: &PageRequest<'_>,
        handler: &mut H,
    ) -> H::Output {
        let (domain, port) = split_host(request.host);
        {
            let context = self.context_mut();
            context.current_url = Some(request.url.to_string());
            context.current_host = Some(request.host.to_string());
            context.protocol = request.protocol().to_string();
            context.domain = domain;
            context.port = port;
        }

        match self.match_route(request.url, request.host) {
            Some(route) => {
                tracing::debug!(url = %request.url, page = %route.page, "Rendering page");
                handler.render(&route)
            }
            None => {
                tracing::debug!(url = %request.url, "No route for request; using fallback");
                handler.fallback(&ParsedUrl::parse(request.url))
            }
        }
    }
}
