use crate::UrlError;
use url::Url;

/// Normalizes a URL into a crawl target
///
/// # Normalization Steps
///
/// 1. Parse the URL with the WHATWG parser, which lowercases the scheme and
///    host, drops the scheme's default port and resolves dot segments
/// 2. Reject anything that is not http(s) or has no host
/// 3. Remove fragment (everything after #)
///
/// Query strings are kept: `?page=2` and `?page=3` are different pages.
///
/// # Examples
///
/// ```
/// use site_harvester::url::normalize_url;
///
/// let url = normalize_url("HTTP://Example.TEST:80/a/../b#top").unwrap();
/// assert_eq!(url.as_str(), "http://example.test/b");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize_parsed(url)
}

/// Normalizes an already-parsed URL (see [`normalize_url`])
pub fn normalize_parsed(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_removed() {
        let result = normalize_url("http://example.test/page#section").unwrap();
        assert_eq!(result.as_str(), "http://example.test/page");
    }

    #[test]
    fn test_query_preserved() {
        let result = normalize_url("http://example.test/list?page=2").unwrap();
        assert_eq!(result.as_str(), "http://example.test/list?page=2");
    }

    #[test]
    fn test_host_lowercased() {
        let result = normalize_url("https://EXAMPLE.test/Path").unwrap();
        assert_eq!(result.as_str(), "https://example.test/Path");
    }

    #[test]
    fn test_default_port_dropped() {
        let result = normalize_url("https://example.test:443/").unwrap();
        assert_eq!(result.as_str(), "https://example.test/");
        assert_eq!(result.port(), None);
    }

    #[test]
    fn test_explicit_port_kept() {
        let result = normalize_url("http://127.0.0.1:8080/x").unwrap();
        assert_eq!(result.port(), Some(8080));
    }

    #[test]
    fn test_dot_segments_resolved() {
        let result = normalize_url("http://example.test/a/./b/../c").unwrap();
        assert_eq!(result.as_str(), "http://example.test/a/c");
    }

    #[test]
    fn test_empty_path_becomes_root() {
        let result = normalize_url("http://example.test").unwrap();
        assert_eq!(result.as_str(), "http://example.test/");
    }

    #[test]
    fn test_equal_after_normalization() {
        let a = normalize_url("http://Example.test/a#one").unwrap();
        let b = normalize_url("http://example.test:80/a#two").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_non_http_rejected() {
        assert!(matches!(
            normalize_url("mailto:a@b.com"),
            Err(UrlError::InvalidScheme(_))
        ));
        assert!(matches!(
            normalize_url("ftp://example.test/file"),
            Err(UrlError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(normalize_url("not a url"), Err(UrlError::Parse(_))));
    }
}
