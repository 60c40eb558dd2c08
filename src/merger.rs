//! Overlays per-site settings on the global defaults.

use crate::config::{Defaults, SiteConfig, SiteOverrides};
use crate::error::{Error, Result};

/// Fully resolved settings of one site, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSite {
    pub name: String,
    pub ip: String,
    pub port: u16,
    pub host: String,
    pub local_http_port: u16,
    pub local_https_port: u16,
    pub https_redirect: bool,
    pub run_certbot: bool,
}

impl ResolvedSite {
    /// Domain served by this site, `<name>.<host>`.
    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.name, self.host)
    }
}

/// Checks that a site name can be used as a file name stem and a DNS label
/// prefix: not blank, no path separators, no `..`.
///
/// # Errors
/// * `Error::InvalidSite` if the name is rejected
pub fn check_site_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        "name is empty"
    } else if name.contains(['/', '\\', '\0']) {
        "name must not contain path separators"
    } else if name.contains("..") {
        "name must not contain '..'"
    } else {
        return Ok(());
    };
    Err(Error::InvalidSite { site: name.to_string(), reason: reason.to_string() })
}

/// Resolves one site. A site value always wins over the default one.
///
/// # Errors
/// * `Error::InvalidSite` if the site name cannot be used as a file name
/// * `Error::MissingRequiredField` naming the first of `ip`, `port`, `host`
///   that is absent after the merge
pub fn merge_site(name: &str, defaults: &Defaults, site: &SiteOverrides) -> Result<ResolvedSite> {
    check_site_name(name)?;
    let missing = |field| Error::MissingRequiredField { site: name.to_string(), field };

    // local_http_port always resolves: Defaults carries a fallback for it.
    let local_http_port = site.local_http_port.unwrap_or(defaults.local_http_port);
    let ip = site.ip.clone().ok_or_else(|| missing("ip"))?;
    let port = site.port.ok_or_else(|| missing("port"))?;
    let host = site
        .host
        .clone()
        .or_else(|| defaults.host.clone())
        .ok_or_else(|| missing("host"))?;

    Ok(ResolvedSite {
        name: name.to_string(),
        ip,
        port,
        host,
        local_http_port,
        local_https_port: site.local_https_port.unwrap_or(defaults.local_https_port),
        https_redirect: site.https_redirect.unwrap_or(defaults.https_redirect),
        run_certbot: site.run_certbot.unwrap_or(defaults.run_certbot),
    })
}

/// Resolves every declared site in declaration order. One failing site,
/// including one whose entry is malformed, does not affect the others.
pub fn merge_all(config: &SiteConfig) -> Vec<(String, Result<ResolvedSite>)> {
    config
        .sites
        .iter()
        .map(|(name, entry)| {
            let resolved = SiteOverrides::from_value(name, entry)
                .and_then(|site| merge_site(name, &config.defaults, &site));
            (name.clone(), resolved)
        })
        .collect()
}
