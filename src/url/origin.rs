use url::Url;

/// Returns the network location (host plus explicit port) of a URL
///
/// The host is lowercased by the URL parser. A port equal to the scheme's
/// default is dropped by the parser as well, so `https://example.com:443/`
/// and `https://example.com/` share a network location.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use content_agent::url::network_location;
///
/// let url = Url::parse("https://Example.com:8080/path").unwrap();
/// assert_eq!(network_location(&url), Some("example.com:8080".to_string()));
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(network_location(&url), Some("example.com".to_string()));
/// ```
pub fn network_location(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}

/// Checks whether `candidate` lives on the same network location as `origin`
///
/// URLs without a host never match.
pub fn is_same_site(origin: &Url, candidate: &Url) -> bool {
    match (network_location(origin), network_location(candidate)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
