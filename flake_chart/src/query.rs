use std::collections::HashMap;

use reqwest::Url;

/// Parameters of a page query, keyed by parameter name.
///
/// A value of `None` means the key appeared without a `=`.
pub type QueryParameters = HashMap<String, Option<String>>;

/// The filters a dashboard page is driven by.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedFilters {
    /// Selected test. `None` means no specific test was asked for, which is
    /// not the same as `Some("")`.
    pub test: Option<String>,
    pub environment: String,
    pub period: String,
}

/// Parse a URL query into its parameters.
///
/// A single leading `?` is stripped and empty segments are skipped. Keys and
/// values are percent-decoded independently and the last occurrence of a key
/// wins.
pub fn parse_url_query(query: &str) -> QueryParameters {
    let query = query.strip_prefix('?').unwrap_or(query);
    if query.is_empty() {
        return QueryParameters::new();
    }

    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut parts = segment.split('=');
            // split always yields at least one item
            let key = parts.next().unwrap_or_default();
            let value = parts.next();
            (percent_decode(key), value.map(percent_decode))
        })
        .collect()
}

/// Resolve the dashboard filters from a raw page query.
pub fn resolve(query: &str) -> ResolvedFilters {
    let mut params = parse_url_query(query);
    let mut take = |key: &str| params.remove(key).flatten();

    let filters = ResolvedFilters {
        test: take("test"),
        environment: take("env").unwrap_or_default(),
        period: take("period").unwrap_or_default(),
    };
    log::debug!("Resolved filters: {:?}", filters);
    filters
}

/// Extract the query part of a full page URL, or return the input when it is
/// not an absolute URL and therefore already a page query.
pub fn query_of(location: &str) -> String {
    match Url::parse(location) {
        Ok(url) if !url.cannot_be_a_base() => url
            .query()
            .map(|query| format!("?{}", query))
            .unwrap_or_default(),
        _ => location.to_string(),
    }
}

fn percent_decode(s: &str) -> String {
    match urlencoding::decode(s) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(s.as_bytes())).into_owned(),
    }
}
