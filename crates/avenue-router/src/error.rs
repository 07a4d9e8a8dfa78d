//! Error types for route declaration, URL synthesis and navigation.
//!
//! Errors fall into a small taxonomy (see [`ErrorKind`]):
//!
//! | Kind | Raised by | Meaning |
//! |---|---|---|
//! | `Validation` | [`Router::add`](crate::Router::add), `prefix`, `domain` | a template cannot be compiled |
//! | `Protocol` | [`Router::group`](crate::Router::group), navigation helpers | the API was used out of order |
//! | `Generation` | [`Route::url`](crate::Route::url) | parameter values do not fit the template |
//! | `Lookup` | navigation helpers | a named route does not exist |
//!
//! A plain lookup miss from [`Router::match_route`](crate::Router::match_route)
//! or [`RouteStore::find`](crate::RouteStore::find) is not an error; it is
//! reported as `None`.

use std::path::PathBuf;

use avenue_pattern::PatternError;
use thiserror::Error;

/// Result type alias using [`RouteError`].
pub type RouteResult<T> = Result<T, RouteError>;

/// Errors that can occur while loading a [`RouterConfig`](crate::RouterConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Invalid configuration value.
    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// The field with the invalid value.
        field: String,
        /// Explanation of why the value is invalid.
        reason: String,
    },

    /// Environment variable parsing error.
    #[error("failed to parse environment variable {var}: {reason}")]
    EnvParseError {
        /// The environment variable name.
        var: String,
        /// Explanation of the parse failure.
        reason: String,
    },
}

impl ConfigError {
    /// Create a new invalid value error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a new environment parse error.
    pub fn env_parse_error(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvParseError {
            var: var.into(),
            reason: reason.into(),
        }
    }
}

/// Classification of a [`RouteError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A route or domain template is invalid.
    Validation,
    /// The routing API was used out of order.
    Protocol,
    /// A URL could not be built from the given parameters.
    Generation,
    /// A named route does not exist.
    Lookup,
}

/// Errors raised by the router.
#[derive(Error, Debug)]
pub enum RouteError {
    /// A path template could not be compiled.
    #[error("cannot instantiate route without a valid url template for {template:?}")]
    InvalidTemplate {
        /// The offending template.
        template: String,
        /// Underlying pattern error.
        #[source]
        source: PatternError,
    },

    /// A domain template could not be compiled.
    #[error("invalid domain template {template:?}")]
    InvalidDomain {
        /// The offending template.
        template: String,
        /// Underlying pattern error.
        #[source]
        source: PatternError,
    },

    /// A URL could not be generated for a route.
    #[error("cannot build url for route {route:?}")]
    UrlGeneration {
        /// Name of the route.
        route: String,
        /// Underlying pattern error.
        #[source]
        source: PatternError,
    },

    /// A group was opened while another group was still open.
    #[error("nested route groups are not allowed")]
    NestedGroup,

    /// A client-side navigation helper was called outside a client context.
    #[error("{operation} can only be used in a client context")]
    NotClientContext {
        /// The helper that was called.
        operation: &'static str,
    },

    /// No route with the given name exists for the domain.
    #[error("no route named {name:?} for domain {domain:?}")]
    RouteNotFound {
        /// Requested route name or path template.
        name: String,
        /// Domain used for the lookup.
        domain: Option<String>,
    },
}

impl RouteError {
    /// Create a new invalid template error.
    pub fn invalid_template(template: impl Into<String>, source: PatternError) -> Self {
        Self::InvalidTemplate {
            template: template.into(),
            source,
        }
    }

    /// Create a new invalid domain error.
    pub fn invalid_domain(template: impl Into<String>, source: PatternError) -> Self {
        Self::InvalidDomain {
            template: template.into(),
            source,
        }
    }

    /// Create a new url generation error.
    pub fn url_generation(route: impl Into<String>, source: PatternError) -> Self {
        Self::UrlGeneration {
            route: route.into(),
            source,
        }
    }

    /// Create a new route not found error.
    pub fn route_not_found(name: impl Into<String>, domain: Option<String>) -> Self {
        Self::RouteNotFound {
            name: name.into(),
            domain,
        }
    }

    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidTemplate { .. } | Self::InvalidDomain { .. } => ErrorKind::Validation,
            Self::UrlGeneration { .. } => ErrorKind::Generation,
            Self::NestedGroup | Self::NotClientContext { .. } => ErrorKind::Protocol,
            Self::RouteNotFound { .. } => ErrorKind::Lookup,
        }
    }
}
