//! Builds the certbot command an operator runs after generation.

/// Returns the shell loop requesting a standalone certificate per domain,
/// or `None` when there is nothing to request.
pub fn certbot_hint<S: AsRef<str>>(domains: &[S]) -> Option<String> {
    if domains.is_empty() {
        return None;
    }
    let domains: Vec<&str> = domains.iter().map(AsRef::as_ref).collect();
    Some(format!(
        "you should execute\n\nfor domain in {}\ndo\n  certbot certonly --standalone -d $domain\ndone\n",
        domains.join(" ")
    ))
}

/// Prints the certbot hint to stdout.
pub fn print_hint<S: AsRef<str>>(domains: &[S]) {
    match certbot_hint(domains) {
        Some(hint) => println!("{hint}"),
        None => log::debug!("No domain needs a certificate"),
    }
}
