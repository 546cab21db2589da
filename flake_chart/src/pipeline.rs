//! One dashboard page load: resolve, wait for charts, select, fetch, render.
//!
//! All stages report failures through [`DashboardError`]; [`run`] is the only
//! place that handles them.

use crate::{
    charts::ChartingCapability,
    endpoint::{select_endpoint, View},
    error::DashboardError,
    fetch::FlakeDataClient,
    page::Page,
    presenter::show_error,
    query::resolve,
    render::render,
};

/// How a page load ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Rendered(View),
    /// The page shows an error banner with this message.
    Failed(String),
}

async fn load<C: ChartingCapability>(
    query: &str,
    base_url: &str,
    charts: &C,
    client: &FlakeDataClient,
    page: &mut Page,
) -> Result<View, DashboardError> {
    let filters = resolve(query);
    charts.load_into(page).await?;

    let endpoint = select_endpoint(&filters, base_url);
    let data = client.fetch_json(&endpoint.url).await?;

    render(endpoint.view, &data, page)?;
    Ok(endpoint.view)
}

/// Load the dashboard for `query` into `page`.
///
/// On failure the page content is replaced by a single error message.
pub async fn run<C: ChartingCapability>(
    query: &str,
    base_url: &str,
    charts: &C,
    client: &FlakeDataClient,
    page: &mut Page,
) -> Outcome {
    match load(query, base_url, charts, client, page).await {
        Ok(view) => Outcome::Rendered(view),
        Err(err) => {
            if err.is_network() {
                log::warn!("Is the flake backend at {} up and reachable?", base_url);
            }
            let message = err.to_string();
            show_error(page, &message);
            Outcome::Failed(message)
        }
    }
}
