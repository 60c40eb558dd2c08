//! Virtual host rendering for vhostgen.
//! Turns one resolved site into Apache configuration text using MiniJinja.

use crate::constants::{CERT_LIVE_DIR, SSL_OPTIONS_FILE};
use crate::error::Result;
use crate::merger::ResolvedSite;
use log::debug;
use minijinja::{Environment, UndefinedBehavior};

const VHOST_TEMPLATE: &str = include_str!("templates/vhost.conf.j2");
const FORWARD_TEMPLATE: &str = include_str!("templates/forward.conf.j2");

/// Which virtual hosts are emitted for a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VHostMode {
    /// Plain HTTP vhost redirecting to HTTPS, plus a TLS vhost that forwards.
    Redirect,
    /// Single plain HTTP vhost that forwards.
    Forward,
}

impl From<&ResolvedSite> for VHostMode {
    fn from(site: &ResolvedSite) -> Self {
        if site.https_redirect {
            VHostMode::Redirect
        } else {
            VHostMode::Forward
        }
    }
}

/// Trait for virtual host rendering engines.
pub trait VHostRenderer {
    /// Renders the complete configuration text of a site.
    ///
    /// # Arguments
    /// * `site` - Resolved settings of the site
    ///
    /// # Returns
    /// * `Result<String>` - Configuration text, identical for identical input
    fn render(&self, site: &ResolvedSite) -> Result<String>;
}

/// MiniJinja-based virtual host renderer.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer with block trimming and strict undefined handling.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self { env }
    }

    /// Renders the rewrite rules proxying a request to the site backend.
    ///
    /// Websocket upgrades go to `ws://<ip>:<port>`, everything else to
    /// `http://<ip>:<port>`. The path after the root is carried over in both.
    pub fn render_forwarding(&self, site: &ResolvedSite) -> Result<String> {
        let context = serde_json::json!({
            "ip": site.ip,
            "port": site.port,
        });
        Ok(self.env.render_named_str("forward.conf", FORWARD_TEMPLATE, context)?)
    }

    /// Renders the site with an explicit mode, ignoring `https_redirect`.
    pub fn render_with_mode(&self, site: &ResolvedSite, mode: VHostMode) -> Result<String> {
        debug!("Rendering {} in {:?} mode", site.fqdn(), mode);
        let context = serde_json::json!({
            "fqdn": site.fqdn(),
            "local_http_port": site.local_http_port,
            "local_https_port": site.local_https_port,
            "redirect": mode == VHostMode::Redirect,
            "forwarding": self.render_forwarding(site)?,
            "cert_dir": CERT_LIVE_DIR,
            "ssl_options": SSL_OPTIONS_FILE,
        });
        Ok(self.env.render_named_str("vhost.conf", VHOST_TEMPLATE, context)?)
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl VHostRenderer for MiniJinjaRenderer {
    fn render(&self, site: &ResolvedSite) -> Result<String> {
        self.render_with_mode(site, VHostMode::from(site))
    }
}
