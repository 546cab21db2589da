use plotly::Plot;

use crate::error::DashboardError;
use crate::page::Page;

/// A charting library that has to be ready before anything is drawn.
///
/// `ready` resolves to the markup the page needs in its head to load the
/// library.
#[allow(async_fn_in_trait)]
pub trait ChartingCapability {
    async fn ready(&self) -> Result<String, DashboardError>;

    /// Wait for the library and register it with the page.
    async fn load_into(&self, page: &mut Page) -> Result<(), DashboardError> {
        let assets = self.ready().await?;
        page.add_head_asset(&assets);
        Ok(())
    }
}

/// Plotly.js served from its CDN.
///
/// Every page waits for it and embeds its script, error pages included, even
/// though the views drawn today are plain tables. The wait is the readiness
/// point the page load is sequenced on.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlotlyCharts;

impl ChartingCapability for PlotlyCharts {
    async fn ready(&self) -> Result<String, DashboardError> {
        let assets = Plot::online_cdn_js();
        if assets.trim().is_empty() {
            return Err(DashboardError::ChartsUnavailable(
                "no Plotly.js script available".to_string(),
            ));
        }
        log::debug!("Charting library ready");
        Ok(assets)
    }
}
