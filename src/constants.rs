//! Common constants used throughout vhostgen.

/// Settings file used when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "./config.yaml";

/// Apache directory whose `*.conf` files are included on startup
pub const DEFAULT_OUTPUT_DIR: &str = "/etc/apache2/sites-enabled";

/// Program queried for the list of loaded modules
pub const DEFAULT_APACHECTL: &str = "apache2ctl";

/// Reserved key of the settings file holding the global defaults
pub const DEFAULTS_KEY: &str = "defaults";

/// Placeholder written into a freshly generated settings file
pub const HOST_PLACEHOLDER: &str = "<hostname>";

/// Extension of every generated virtual host file
pub const CONF_EXTENSION: &str = "conf";

/// Mode of generated files before the umask is applied
pub const CONF_FILE_MODE: u32 = 0o644;

/// Where certbot keeps the live certificate of each domain
pub const CERT_LIVE_DIR: &str = "/etc/letsencrypt/live";

/// SSL options shipped by certbot's apache plugin
pub const SSL_OPTIONS_FILE: &str = "/etc/letsencrypt/options-ssl-apache.conf";

/// Modules the generated virtual hosts rely on
pub const REQUIRED_MODULES: [&str; 7] = [
    "proxy_module",
    "proxy_html_module",
    "proxy_http_module",
    "proxy_wstunnel_module",
    "rewrite_module",
    "ssl_module",
    "proxy_ajp_module",
];
