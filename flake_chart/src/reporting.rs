use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Result};

use crate::{
    charts::PlotlyCharts,
    config,
    fetch::FlakeDataClient,
    page::{Page, PageMetadata},
    pipeline::{self, Outcome},
    query::query_of,
};

/// Appearance settings of the generated page
#[derive(Debug, Clone, Default)]
pub struct PageConfig {
    pub title: Option<String>,
    pub custom_css_path: Option<PathBuf>,
}

/// Load custom CSS content from file
fn load_custom_css(custom_css_path: Option<&PathBuf>) -> Result<String> {
    let css_path = match custom_css_path {
        Some(path) => path.clone(),
        None => {
            // Try config
            if let Some(config_path) = config::report_custom_css_path() {
                config_path
            } else {
                // No custom CSS
                return Ok(String::new());
            }
        }
    };

    if !css_path.exists() {
        bail!("Custom CSS file not found: {}", css_path.display());
    }

    fs::read_to_string(&css_path).map_err(|e| {
        anyhow!(
            "Failed to read custom CSS file {}: {}",
            css_path.display(),
            e
        )
    })
}

/// Load the dashboard for `location` and write it as HTML to `output`.
///
/// `location` is a page query or a full page URL. A failed page load still
/// produces a page, showing the error.
pub async fn report(
    location: &str,
    base_url: &str,
    client: &FlakeDataClient,
    output: &Path,
    page_config: PageConfig,
) -> Result<Outcome> {
    // Resolve appearance first so that a bad CSS path fails before any request
    let title = page_config.title.or_else(config::report_title);
    let custom_css = load_custom_css(page_config.custom_css_path.as_ref())?;
    let metadata = PageMetadata::new(title, custom_css);

    let mut page = Page::new();
    let outcome = pipeline::run(&query_of(location), base_url, &PlotlyCharts, client, &mut page).await;

    match &outcome {
        Outcome::Rendered(view) => log::info!("Rendered {} view", view),
        Outcome::Failed(message) => log::warn!("Page shows an error: {}", message),
    }

    fs::write(output, page.to_html(&metadata))
        .with_context(|| format!("Failed to write page to {}", output.display()))?;
    log::info!("Wrote {}", output.display());

    Ok(outcome)
}
