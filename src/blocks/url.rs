//! Query-string blocks
//!
//! Field lookups follow `URLSearchParams`: keys and values are
//! percent-decoded, `+` reads as a space and the first occurrence wins.

use tracing::debug;
use url::Url;

fn parse(href: &str) -> Option<Url> {
    match Url::parse(href) {
        Ok(url) => Some(url),
        Err(e) => {
            debug!(href, error = %e, "current URL does not parse");
            None
        }
    }
}

/// Whether `field` appears in the query string of `href`
pub fn query_field_exists(href: &str, field: &str) -> bool {
    parse(href).is_some_and(|url| url.query_pairs().any(|(key, _)| key == field))
}

/// First value of `field` in the query string of `href`, or `""`
pub fn query_field_value(href: &str, field: &str) -> String {
    parse(href)
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == field)
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_default()
}
