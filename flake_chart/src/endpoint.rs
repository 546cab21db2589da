use std::fmt;

use crate::defaults::{ENVIRONMENT_ENDPOINT_PATH, TEST_ENDPOINT_PATH};
use crate::query::ResolvedFilters;

/// The two mutually exclusive presentations of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Flake rates of all tests in one environment.
    Environment,
    /// One test within one environment.
    TestAndEnvironment,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Environment => write!(f, "environment"),
            View::TestAndEnvironment => write!(f, "test and environment"),
        }
    }
}

/// Where to fetch the data for a page, and how to show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub view: View,
}

/// Decide which view the filters ask for and build the request target.
///
/// The period filter is not part of the backend contract and is not forwarded.
pub fn select_endpoint(filters: &ResolvedFilters, base_url: &str) -> Endpoint {
    let base_url = base_url.trim_end_matches('/');
    let environment = urlencoding::encode(&filters.environment);

    if !filters.period.is_empty() {
        log::debug!("Ignoring period filter '{}'", filters.period);
    }

    let endpoint = match &filters.test {
        None => Endpoint {
            url: format!(
                "{}{}?env={}",
                base_url, ENVIRONMENT_ENDPOINT_PATH, environment
            ),
            view: View::Environment,
        },
        Some(test) => Endpoint {
            url: format!(
                "{}{}?env={}&test={}",
                base_url,
                TEST_ENDPOINT_PATH,
                environment,
                urlencoding::encode(test)
            ),
            view: View::TestAndEnvironment,
        },
    };
    log::info!("Selected {} view: {}", endpoint.view, endpoint.url);
    endpoint
}
