//! Navigation state shared by URL generation and current-route lookup.

use http::uri::Uri;

use crate::config::RouterConfig;

/// Where the application currently is.
///
/// `protocol`, `domain` and `port` decide whether a generated URL can stay
/// relative or must be absolute. `current_url` and `current_host` feed
/// [`Router::current_route`](crate::Router::current_route); they are set by
/// the request handler on the server and by navigation on the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationContext {
    /// Protocol used for absolute URLs.
    pub protocol: String,
    /// Domain the application is served on.
    pub domain: Option<String>,
    /// Port appended to absolute URLs.
    pub port: Option<u16>,
    /// URL of the page being shown.
    pub current_url: Option<String>,
    /// Host (with port) of the page being shown.
    pub current_host: Option<String>,
}

impl Default for NavigationContext {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            domain: None,
            port: None,
            current_url: None,
            current_host: None,
        }
    }
}

impl NavigationContext {
    /// Seeds a context from configuration.
    #[must_use]
    pub fn from_config(config: &RouterConfig) -> Self {
        Self {
            protocol: config.protocol.clone(),
            domain: config.domain.clone(),
            port: config.port,
            ..Self::default()
        }
    }

    /// Seeds a context from the absolute location of a loaded page.
    ///
    /// Parts missing from `location` keep their defaults.
    #[must_use]
    pub fn from_location(location: &str) -> Self {
        let mut context = Self {
            current_url: Some(location.to_string()),
            ..Self::default()
        };

        if let Ok(uri) = location.parse::<Uri>() {
            if let Some(scheme) = uri.scheme_str() {
                context.protocol = scheme.to_string();
            }
            if let Some(authority) = uri.authority() {
                context.domain = Some(authority.host().to_ascii_lowercase());
                context.port = authority.port_u16();
                context.current_host = Some(authority.as_str().to_string());
            }
        }

        context
    }
}
