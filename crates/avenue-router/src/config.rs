//! Router configuration.
//!
//! A [`RouterConfig`] seeds the [`NavigationContext`](crate::NavigationContext)
//! of a router and the options its templates are compiled with. It can be
//! built in code, read from TOML, and overridden from the environment.
//!
//! ```toml
//! protocol = "https"
//! domain = "shop.local"
//! port = 3000
//! case_sensitive = false
//! strict = false
//! ```
//!
//! Environment variables use the format `PREFIX__KEY`:
//!
//! - `AVENUE__PROTOCOL=https`
//! - `AVENUE__DOMAIN=shop.local`
//! - `AVENUE__PORT=3000`
//! - `AVENUE__CASE_SENSITIVE=true`

use std::env;
use std::path::Path;

use avenue_pattern::PatternOptions;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for a [`Router`](crate::Router).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RouterConfig {
    /// Protocol used for absolute URLs.
    pub protocol: String,

    /// Domain the application is currently served on.
    pub domain: Option<String>,

    /// Port appended to absolute URLs.
    pub port: Option<u16>,

    /// Match path and domain literals case-sensitively.
    pub case_sensitive: bool,

    /// Reject a trailing delimiter on matched input.
    pub strict: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            domain: None,
            port: None,
            case_sensitive: false,
            strict: false,
        }
    }
}

impl RouterConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loading router configuration");
        Self::from_toml_str(&content)
    }

    /// Applies overrides from process environment variables named
    /// `PREFIX__KEY`.
    pub fn with_env_prefix(self, prefix: &str) -> Result<Self, ConfigError> {
        self.with_env_vars(prefix, env::vars())
    }

    /// Applies overrides from an explicit set of variables named
    /// `PREFIX__KEY`. Variables without the prefix are ignored.
    pub fn with_env_vars<I>(mut self, prefix: &str, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            let Some(field) = key
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix("__"))
            else {
                continue;
            };

            match field {
                "PROTOCOL" => self.protocol = value,
                "DOMAIN" => {
                    self.domain = if value.is_empty() { None } else { Some(value) };
                }
                "PORT" => {
                    self.port = if value.eq_ignore_ascii_case("none") {
                        None
                    } else {
                        Some(value.parse().map_err(|_| {
                            ConfigError::env_parse_error(&key, "expected port number or 'none'")
                        })?)
                    };
                }
                "CASE_SENSITIVE" => {
                    self.case_sensitive = parse_bool(&value)
                        .ok_or_else(|| ConfigError::env_parse_error(&key, "expected boolean"))?;
                }
                "STRICT" => {
                    self.strict = parse_bool(&value)
                        .ok_or_else(|| ConfigError::env_parse_error(&key, "expected boolean"))?;
                }
                _ => {
                    tracing::warn!(var = %key, "Ignoring unknown router configuration variable");
                }
            }
        }

        self.validate()?;
        Ok(self)
    }

    /// Checks the configuration for values no URL could be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut chars = self.protocol.chars();
        let well_formed = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !well_formed {
            return Err(ConfigError::invalid_value(
                "protocol",
                format!("{:?} is not a URL scheme", self.protocol),
            ));
        }

        if let Some(domain) = &self.domain {
            if domain.is_empty() || domain.contains(['/', ':', '?', '#']) {
                return Err(ConfigError::invalid_value(
                    "domain",
                    format!("{domain:?} is not a bare host name"),
                ));
            }
        }

        if self.port == Some(0) {
            return Err(ConfigError::invalid_value("port", "must be non-zero"));
        }

        Ok(())
    }

    /// Options route templates are compiled with.
    #[must_use]
    pub const fn pattern_options(&self) -> PatternOptions {
        PatternOptions {
            case_sensitive: self.case_sensitive,
            strict: self.strict,
        }
    }
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = RouterConfig::default();
        assert_eq!(config.protocol, "http");
        assert!(config.domain.is_none());
        assert!(config.port.is_none());
        assert_eq!(config.pattern_options(), PatternOptions::default());
        config.validate().unwrap();
    }

    #[test]
    fn test_from_toml_str() {
        let config = RouterConfig::from_toml_str(
            r#"
            protocol = "https"
            domain = "shop.local"
            port = 3000
            "#,
        )
        .unwrap();
        assert_eq!(config.protocol, "https");
        assert_eq!(config.domain.as_deref(), Some("shop.local"));
        assert_eq!(config.port, Some(3000));
        assert!(!config.strict);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = RouterConfig::from_toml_str("hostname = \"x\"");
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "domain = \"local.test\"\ncase_sensitive = true").unwrap();

        let config = RouterConfig::from_file(file.path()).unwrap();
        assert_eq!(config.domain.as_deref(), Some("local.test"));
        assert!(config.pattern_options().case_sensitive);
    }

    #[test]
    fn test_from_missing_file() {
        let result = RouterConfig::from_file("/nonexistent/avenue.toml");
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let config = RouterConfig::default()
            .with_env_vars(
                "AVENUE",
                vars(&[
                    ("AVENUE__PROTOCOL", "https"),
                    ("AVENUE__DOMAIN", "local.test"),
                    ("AVENUE__PORT", "3000"),
                    ("AVENUE__STRICT", "yes"),
                    ("OTHER__PORT", "1"),
                ]),
            )
            .unwrap();
        assert_eq!(config.protocol, "https");
        assert_eq!(config.domain.as_deref(), Some("local.test"));
        assert_eq!(config.port, Some(3000));
        assert!(config.strict);
    }

    #[test]
    fn test_env_port_none() {
        let config = RouterConfig {
            port: Some(8080),
            ..RouterConfig::default()
        }
        .with_env_vars("AVENUE", vars(&[("AVENUE__PORT", "none")]))
        .unwrap();
        assert!(config.port.is_none());
    }

    #[test]
    fn test_env_invalid_values() {
        let result =
            RouterConfig::default().with_env_vars("AVENUE", vars(&[("AVENUE__PORT", "http")]));
        assert!(matches!(result, Err(ConfigError::EnvParseError { .. })));

        let result = RouterConfig::default()
            .with_env_vars("AVENUE", vars(&[("AVENUE__CASE_SENSITIVE", "maybe")]));
        assert!(matches!(result, Err(ConfigError::EnvParseError { .. })));
    }

    #[test]
    fn test_validate() {
        let bad_protocol = RouterConfig {
            protocol: "ht tp".to_string(),
            ..RouterConfig::default()
        };
        assert!(bad_protocol.validate().is_err());

        let bad_domain = RouterConfig {
            domain: Some("local.test/app".to_string()),
            ..RouterConfig::default()
        };
        assert!(bad_domain.validate().is_err());

        let bad_port = RouterConfig {
            port: Some(0),
            ..RouterConfig::default()
        };
        assert!(bad_port.validate().is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("ON"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("nope"), None);
    }
}
