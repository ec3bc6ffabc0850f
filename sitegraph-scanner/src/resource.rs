use crate::error::{Result, ScanError};
use std::fmt;
use url::Url;

/// A crawlable page, identified by its absolute URL.
///
/// Equality and hashing only look at the URL, so two resources built from
/// different anchors pointing at the same address are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resource {
    url: Url,
}

impl Resource {
    /// Build a resource from an already absolute URL. The fragment is dropped.
    pub fn new(mut url: Url) -> Self {
        url.set_fragment(None);
        Self { url }
    }

    /// Parse the crawl root. A trailing `/` is appended when missing so that
    /// relative links on the root page resolve against the root itself.
    pub fn root(input: &str) -> Result<Self> {
        let input = input.trim();
        let normalized = if input.ends_with('/') {
            input.to_string()
        } else {
            format!("{}/", input)
        };

        let url = Url::parse(&normalized)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", input, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ScanError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                input,
                url.scheme()
            )));
        }
        if url.host_str().is_none() {
            return Err(ScanError::InvalidUrl(format!("{}: missing host", input)));
        }

        Ok(Self::new(url))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Path component, the key a page is stored under in the graph.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    /// Whether this resource lives on `host`, ignoring ASCII case.
    pub fn is_on_host(&self, host: &str) -> bool {
        self.host()
            .map(|h| h.eq_ignore_ascii_case(host))
            .unwrap_or(false)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_root_appends_trailing_slash() {
        let root = Resource::root("http://example.com/docs").unwrap();
        assert_eq!(root.as_str(), "http://example.com/docs/");
        assert_eq!(root.path(), "/docs/");
    }

    #[test]
    fn test_root_without_path() {
        let root = Resource::root("http://example.com").unwrap();
        assert_eq!(root.as_str(), "http://example.com/");
        assert_eq!(root.path(), "/");
    }

    #[test]
    fn test_root_rejects_garbage() {
        let err = Resource::root("not a url").unwrap_err();
        assert!(matches!(err, ScanError::InvalidUrl(_)));
    }

    #[test]
    fn test_root_rejects_non_http_scheme() {
        assert!(matches!(
            Resource::root("ftp://example.com"),
            Err(ScanError::InvalidUrl(_))
        ));
        assert!(matches!(
            Resource::root("mailto:someone@example.com"),
            Err(ScanError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_equality_ignores_fragment() {
        let a = Resource::new(Url::parse("http://example.com/page#top").unwrap());
        let b = Resource::new(Url::parse("http://example.com/page").unwrap());
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn test_query_is_part_of_identity() {
        let a = Resource::new(Url::parse("http://example.com/page?a=1").unwrap());
        let b = Resource::new(Url::parse("http://example.com/page?a=2").unwrap());
        assert_ne!(a, b);
        assert_eq!(a.path(), b.path());
    }

    #[test]
    fn test_is_on_host_case_insensitive() {
        let r = Resource::new(Url::parse("http://Example.COM/page").unwrap());
        assert!(r.is_on_host("example.com"));
        assert!(r.is_on_host("EXAMPLE.com"));
        assert!(!r.is_on_host("other.com"));
    }
}
