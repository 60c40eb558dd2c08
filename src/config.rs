//! Settings file handling for vhostgen.
//! Loads the declarative site list (`defaults` plus one entry per site) and
//! writes a starter file on first run.

use crate::constants::{DEFAULTS_KEY, HOST_PLACEHOLDER};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global values every site falls back to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub local_http_port: u16,
    pub local_https_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub https_redirect: bool,
    /// Advisory only; certbot is never run by this tool.
    pub run_certbot: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            local_http_port: 80,
            local_https_port: 443,
            host: None,
            https_redirect: true,
            run_certbot: true,
        }
    }
}

/// Per-site entry. Every field left out falls back to [`Defaults`],
/// except `ip` and `port` which have nothing to fall back to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteOverrides {
    pub ip: Option<String>,
    pub port: Option<u16>,
    pub host: Option<String>,
    pub local_http_port: Option<u16>,
    pub local_https_port: Option<u16>,
    pub https_redirect: Option<bool>,
    pub run_certbot: Option<bool>,
}

impl SiteOverrides {
    /// Reads the overrides of one site from its raw settings entry.
    ///
    /// Ports may be written as numbers or as quoted numbers. A null entry has
    /// no overrides. Keys this tool does not know are ignored.
    ///
    /// # Errors
    /// * `Error::InvalidSite` if the entry is not a mapping or a field has the
    ///   wrong type or range
    pub fn from_value(site: &str, value: &serde_yaml::Value) -> Result<Self> {
        let entry = match value {
            serde_yaml::Value::Null => return Ok(Self::default()),
            serde_yaml::Value::Mapping(entry) => entry,
            _ => return Err(invalid(site, "expected a mapping of settings")),
        };
        let field = |key: &str| entry.get(key).filter(|v| !v.is_null());

        Ok(Self {
            ip: field("ip").map(|v| text_field(site, "ip", v)).transpose()?,
            port: field("port").map(|v| port_field(site, "port", v)).transpose()?,
            host: field("host").map(|v| text_field(site, "host", v)).transpose()?,
            local_http_port: field("local_http_port")
                .map(|v| port_field(site, "local_http_port", v))
                .transpose()?,
            local_https_port: field("local_https_port")
                .map(|v| port_field(site, "local_https_port", v))
                .transpose()?,
            https_redirect: field("https_redirect")
                .map(|v| bool_field(site, "https_redirect", v))
                .transpose()?,
            run_certbot: field("run_certbot")
                .map(|v| bool_field(site, "run_certbot", v))
                .transpose()?,
        })
    }
}

fn invalid(site: &str, reason: impl Into<String>) -> Error {
    Error::InvalidSite { site: site.to_string(), reason: reason.into() }
}

fn text_field(site: &str, key: &str, value: &serde_yaml::Value) -> Result<String> {
    match value {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        _ => Err(invalid(site, format!("field '{key}' must be a string"))),
    }
}

fn port_field(site: &str, key: &str, value: &serde_yaml::Value) -> Result<u16> {
    let port = match value {
        serde_yaml::Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        serde_yaml::Value::String(s) => s.trim().parse::<u16>().ok(),
        _ => None,
    };
    port.ok_or_else(|| invalid(site, format!("field '{key}' must be a port between 0 and 65535")))
}

fn bool_field(site: &str, key: &str, value: &serde_yaml::Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| invalid(site, format!("field '{key}' must be true or false")))
}

/// The parsed settings file. Sites keep their declaration order.
///
/// Site entries stay raw until they are merged so that one malformed site
/// cannot take the others down with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteConfig {
    pub defaults: Defaults,
    pub sites: IndexMap<String, serde_yaml::Value>,
}

/// Result of [`load_config`].
#[derive(Debug)]
pub enum ConfigState {
    /// No settings file existed; a starter one was written at this path.
    Created(PathBuf),
    /// The settings file was read and parsed.
    Loaded(SiteConfig),
}

#[derive(Serialize)]
struct StarterFile {
    defaults: Defaults,
}

/// Loads the settings file, writing a starter one when it does not exist yet.
///
/// # Errors
/// * `Error::IoError` if the file cannot be read or the starter cannot be written
/// * `Error::ConfigParseError` if the content is not a valid site list
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<ConfigState> {
    let config_path = config_path.as_ref();
    if !config_path.exists() {
        write_default_config(config_path)?;
        return Ok(ConfigState::Created(config_path.to_path_buf()));
    }

    debug!("Loading configuration from {}", config_path.display());
    let content = fs::read_to_string(config_path)?;
    parse_config(&content).map(ConfigState::Loaded)
}

/// Writes the starter settings file, creating its parent directories.
pub fn write_default_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config_path = config_path.as_ref();
    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let starter = StarterFile {
        defaults: Defaults { host: Some(HOST_PLACEHOLDER.to_string()), ..Defaults::default() },
    };
    let content = serde_yaml::to_string(&starter)
        .map_err(|e| Error::ConfigParseError(format!("Cannot serialize defaults: {e}")))?;

    debug!("Writing default configuration to {}", config_path.display());
    fs::write(config_path, content)?;
    Ok(())
}

/// Parses the settings file content.
///
/// The `defaults` key is optional; without it every site must carry its own
/// `host`. Site entries are only checked later, by [`SiteOverrides::from_value`].
///
/// # Errors
/// * `Error::ConfigParseError` if the document is not a mapping or the
///   `defaults` entry has the wrong shape
pub fn parse_config(content: &str) -> Result<SiteConfig> {
    if content.trim().is_empty() {
        return Err(Error::ConfigParseError("configuration is empty".to_string()));
    }

    let mut raw: IndexMap<String, serde_yaml::Value> = serde_yaml::from_str(content)
        .map_err(|e| Error::ConfigParseError(format!("Invalid configuration format: {e}")))?;

    let defaults = match raw.shift_remove(DEFAULTS_KEY) {
        Some(value) => from_entry(DEFAULTS_KEY, value)?,
        None => Defaults::default(),
    };

    Ok(SiteConfig { defaults, sites: raw })
}

fn from_entry(name: &str, value: serde_yaml::Value) -> Result<Defaults> {
    if value.is_null() {
        return Ok(Defaults::default());
    }
    serde_yaml::from_value(value)
        .map_err(|e| Error::ConfigParseError(format!("Invalid entry '{name}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(yaml: &str) -> Result<SiteOverrides> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        SiteOverrides::from_value("api", &value)
    }

    #[test]
    fn test_empty_site_body() {
        let config = parse_config("defaults:\n  host: example.com\nblog:\n").unwrap();
        let site = SiteOverrides::from_value("blog", &config.sites["blog"]).unwrap();
        assert_eq!(site, SiteOverrides::default());
    }

    #[test]
    fn test_missing_defaults_key() {
        let config = parse_config("blog:\n  ip: 10.0.0.5\n  port: 8080\n").unwrap();
        assert_eq!(config.defaults, Defaults::default());
        assert_eq!(config.sites.len(), 1);
    }

    #[test]
    fn test_quoted_port() {
        let site = overrides("ip: 10.0.0.9\nport: \"9090\"\n").unwrap();
        assert_eq!(site.port, Some(9090));
        assert_eq!(site.ip.as_deref(), Some("10.0.0.9"));
    }

    #[test]
    fn test_invalid_fields() {
        for yaml in ["port: 70000", "port: web", "https_redirect: maybe", "ip: [1, 2]", "3"] {
            assert!(
                matches!(overrides(yaml), Err(Error::InvalidSite { .. })),
                "Expected InvalidSite for {yaml:?}"
            );
        }
    }
}
