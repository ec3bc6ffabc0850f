use crate::error::{Result, ScanError};
use crate::resource::Resource;
use url::Url;

/// Resolve a raw `href` found on the page at `base` into an absolute resource.
///
/// Absolute, root-relative (`/x`) and relative (`x`, `../x`) references are
/// composed with the usual RFC 3986 rules. Empty and fragment-only hrefs, and
/// anything that does not land on an http(s) URL with a host, are rejected.
pub fn resolve(base: &Url, href: &str) -> Result<Resource> {
    let href = href.trim();
    let unresolvable = || ScanError::UnresolvableLink {
        base: base.to_string(),
        href: href.to_string(),
    };

    if href.is_empty() || href.starts_with('#') {
        return Err(unresolvable());
    }

    let resolved = base.join(href).map_err(|_| unresolvable())?;

    if !matches!(resolved.scheme(), "http" | "https") || resolved.host_str().is_none() {
        return Err(unresolvable());
    }

    Ok(Resource::new(resolved))
}
