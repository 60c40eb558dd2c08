use vhostgen::merger::ResolvedSite;
use vhostgen::renderer::{MiniJinjaRenderer, VHostMode, VHostRenderer};

fn site(name: &str, ip: &str, port: u16, https_redirect: bool) -> ResolvedSite {
    ResolvedSite {
        name: name.to_string(),
        ip: ip.to_string(),
        port,
        host: "example.com".to_string(),
        local_http_port: 80,
        local_https_port: 443,
        https_redirect,
        run_certbot: true,
    }
}

fn vhost_count(text: &str) -> usize {
    text.matches("<VirtualHost ").count()
}

#[test]
fn test_forwarding_fragment() {
    let renderer = MiniJinjaRenderer::new();
    let fragment = renderer.render_forwarding(&site("api", "10.0.0.9", 9090, false)).unwrap();

    assert_eq!(
        fragment,
        "    RewriteCond %{HTTP:Upgrade} =websocket [NC]\n\
         \x20   RewriteRule /(.*)           ws://10.0.0.9:9090/$1 [P,L]\n\
         \x20   RewriteCond %{HTTP:Upgrade} !=websocket [NC]\n\
         \x20   RewriteRule /(.*)           http://10.0.0.9:9090/$1 [P,L]"
    );
}

#[test]
fn test_redirect_mode() {
    let renderer = MiniJinjaRenderer::new();
    let blog = site("blog", "10.0.0.5", 8080, true);
    let text = renderer.render(&blog).unwrap();

    assert_eq!(vhost_count(&text), 2);
    assert!(text.starts_with("<VirtualHost *:80>\n    ServerName blog.example.com\n"));
    assert!(text.contains("RewriteCond %{SERVER_NAME} =blog.example.com\n"));
    assert!(text.contains("RewriteRule ^ https://%{SERVER_NAME}%{REQUEST_URI} [END,NE,R=permanent]\n"));
    assert!(text.contains("<VirtualHost *:443>\n    ServerName blog.example.com\n"));
    assert!(text.contains(&renderer.render_forwarding(&blog).unwrap()));
    assert!(text.contains("SSLCertificateFile /etc/letsencrypt/live/blog.example.com/fullchain.pem\n"));
    assert!(text.contains("SSLCertificateKeyFile /etc/letsencrypt/live/blog.example.com/privkey.pem\n"));
    assert!(text.contains("Include /etc/letsencrypt/options-ssl-apache.conf\n"));
    assert!(text.ends_with("</VirtualHost>\n"));

    // The plain HTTP vhost only redirects.
    let (http_vhost, _) = text.split_once("</VirtualHost>").unwrap();
    assert!(!http_vhost.contains("http://10.0.0.5"));
}

#[test]
fn test_forward_mode() {
    let renderer = MiniJinjaRenderer::new();
    let text = renderer.render(&site("api", "10.0.0.9", 9090, false)).unwrap();

    assert_eq!(vhost_count(&text), 1);
    assert_eq!(
        text,
        "<VirtualHost *:80>\n\
         \x20   ServerName api.example.com\n\
         \n\
         \x20   RewriteEngine On\n\
         \x20   RewriteCond %{HTTP:Upgrade} =websocket [NC]\n\
         \x20   RewriteRule /(.*)           ws://10.0.0.9:9090/$1 [P,L]\n\
         \x20   RewriteCond %{HTTP:Upgrade} !=websocket [NC]\n\
         \x20   RewriteRule /(.*)           http://10.0.0.9:9090/$1 [P,L]\n\
         </VirtualHost>\n"
    );
    assert!(!text.contains("SSLCertificate"));
    assert!(!text.contains("letsencrypt"));
}

#[test]
fn test_explicit_mode_overrides_site_flag() {
    let renderer = MiniJinjaRenderer::new();
    let blog = site("blog", "10.0.0.5", 8080, true);

    assert_eq!(VHostMode::from(&blog), VHostMode::Redirect);
    let text = renderer.render_with_mode(&blog, VHostMode::Forward).unwrap();
    assert_eq!(vhost_count(&text), 1);
}

#[test]
fn test_render_is_deterministic() {
    let renderer = MiniJinjaRenderer::new();
    for redirect in [true, false] {
        let blog = site("blog", "10.0.0.5", 8080, redirect);
        assert_eq!(renderer.render(&blog).unwrap(), renderer.render(&blog).unwrap());
    }
}
