//! Client-side navigation.
//!
//! A client router is built with [`Router::client`] and a [`History`]
//! implementation. The navigation helpers look a route up by name in the
//! current domain, build its link props and hand the internal target and
//! the visible URL to the history.

use avenue_pattern::ParamValues;

use crate::error::{RouteError, RouteResult};
use crate::query::QueryParams;
use crate::route::{LinkProps, UrlOptions};
use crate::router::Router;

/// The navigation mechanism of the host application.
pub trait History {
    /// Navigates to `href`, showing `as_path`, and adds a history entry.
    fn push(&mut self, href: &str, as_path: &str);

    /// Navigates to `href`, showing `as_path`, replacing the current entry.
    fn replace(&mut self, href: &str, as_path: &str);

    /// Loads `href` ahead of navigation.
    fn prefetch(&mut self, href: &str);
}

impl Router {
    /// Navigates to the route named `name`, adding a history entry.
    pub fn push_route(
        &mut self,
        name: &str,
        params: &ParamValues,
        query: &QueryParams,
    ) -> RouteResult<()> {
        let props = self.navigation_target("push_route", name, params, query)?;
        let visible = props.visible_path().to_string();
        if let Some(history) = &mut self.history {
            history.push(&props.href, &visible);
        }
        self.record_navigation(&visible);
        Ok(())
    }

    /// Navigates to the route named `name`, replacing the current entry.
    pub fn replace_route(
        &mut self,
        name: &str,
        params: &ParamValues,
        query: &QueryParams,
    ) -> RouteResult<()> {
        let props = self.navigation_target("replace_route", name, params, query)?;
        let visible = props.visible_path().to_string();
        if let Some(history) = &mut self.history {
            history.replace(&props.href, &visible);
        }
        self.record_navigation(&visible);
        Ok(())
    }

    /// Prefetches the page of the route named `name`.
    pub fn prefetch_route(
        &mut self,
        name: &str,
        params: &ParamValues,
        query: &QueryParams,
    ) -> RouteResult<()> {
        let props = self.navigation_target("prefetch_route", name, params, query)?;
        if let Some(history) = &mut self.history {
            history.prefetch(&props.href);
        }
        Ok(())
    }

    /// Records a completed navigation so [`Router::current_route`] resolves
    /// the new page. The query string of `href` is dropped.
    pub fn record_navigation(&mut self, href: &str) {
        let path = href.split_once('?').map_or(href, |(path, _)| path);
        tracing::debug!(path = %path, "Recorded navigation");
        self.context_mut().current_url = Some(path.to_string());
    }

    fn navigation_target(
        &self,
        operation: &'static str,
        name: &str,
        params: &ParamValues,
        query: &QueryParams,
    ) -> RouteResult<LinkProps> {
        if !self.is_client() {
            tracing::warn!(operation, route = %name, "Navigation helper used outside a client context");
            return Err(RouteError::NotClientContext { operation });
        }

        let domain = self.context().domain.as_deref();
        let route = self
            .find(name, domain)
            .ok_or_else(|| RouteError::route_not_found(name, domain.map(str::to_string)))?;

        let options = UrlOptions {
            query: query.clone(),
            ..UrlOptions::default()
        };
        route.link_props(self.context(), params, &options)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use avenue_pattern::ParamValue;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Push(String, String),
        Replace(String, String),
        Prefetch(String),
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Call>>>);

    impl History for Recorder {
        fn push(&mut self, href: &str, as_path: &str) {
            self.0
                .borrow_mut()
                .push(Call::Push(href.to_string(), as_path.to_string()));
        }

        fn replace(&mut self, href: &str, as_path: &str) {
            self.0
                .borrow_mut()
                .push(Call::Replace(href.to_string(), as_path.to_string()));
        }

        fn prefetch(&mut self, href: &str) {
            self.0.borrow_mut().push(Call::Prefetch(href.to_string()));
        }
    }

    fn client() -> (Router, Recorder) {
        let recorder = Recorder::default();
        let mut router = Router::client("http://local.test/", recorder.clone());
        router
            .add("/p/first", "named-route-internal")
            .unwrap()
            .named("named-route");
        (router, recorder)
    }

    fn query_a() -> QueryParams {
        QueryParams::from([("a".to_string(), ParamValue::from("a"))])
    }

    #[test]
    fn test_push_route() {
        let (mut router, recorder) = client();
        router
            .push_route("named-route", &ParamValues::new(), &query_a())
            .unwrap();

        assert_eq!(
            recorder.0.borrow().as_slice(),
            &[Call::Push(
                "/named-route-internal".to_string(),
                "/p/first?a=a".to_string()
            )]
        );
        assert_eq!(router.context().current_url.as_deref(), Some("/p/first"));
    }

    #[test]
    fn test_replace_and_prefetch() {
        let (mut router, recorder) = client();
        router
            .replace_route("named-route", &ParamValues::new(), &QueryParams::new())
            .unwrap();
        router
            .prefetch_route("named-route", &ParamValues::new(), &QueryParams::new())
            .unwrap();

        assert_eq!(
            recorder.0.borrow().as_slice(),
            &[
                Call::Replace("/named-route-internal".to_string(), "/p/first".to_string()),
                Call::Prefetch("/named-route-internal".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_route() {
        let (mut router, recorder) = client();
        let err = router
            .push_route("missing", &ParamValues::new(), &QueryParams::new())
            .unwrap_err();
        assert!(matches!(err, RouteError::RouteNotFound { .. }));
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn test_server_router_cannot_navigate() {
        let mut router = Router::new();
        router.add("/p/first", "page").unwrap().named("named-route");

        let err = router
            .push_route("named-route", &ParamValues::new(), &QueryParams::new())
            .unwrap_err();
        assert!(matches!(
            err,
            RouteError::NotClientContext {
                operation: "push_route"
            }
        ));
    }

    #[test]
    fn test_record_navigation() {
        let (mut router, _) = client();
        router.record_navigation("/p/first?x=1");
        let current = router.current_route().unwrap();
        assert_eq!(current.page, "named-route-internal");
    }
}
