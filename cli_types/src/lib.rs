use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, name = "flake-chart")]
pub struct Cli {
    /// Increase verbosity level (can be specified multiple times.) The first level sets level
    /// "info", second sets level "debug", and third sets level "trace" for the logger.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct CliPageAppearance {
    /// Title of the generated page. Falls back to `report.title` in the config.
    #[arg(long)]
    pub title: Option<String>,

    /// CSS file whose content is inlined into the page.
    /// Falls back to `report.custom_css` in the config.
    #[arg(long, value_parser=parse_existing_path)]
    pub custom_css: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the flake statistics selected by a page query and write them as an HTML page.
    ///
    /// The query is interpreted the way the dashboard page interprets its own URL:
    ///
    /// - `env`: environment whose statistics are shown (default: empty)
    ///
    /// - `test`: when present, the combined test and environment view is selected
    ///
    /// - `period`: accepted but not forwarded to the backend
    ///
    /// Any failure while fetching or rendering replaces the page content with a
    /// single error message. The page is still written in that case.
    Render {
        /// Page query string, e.g. `?env=Docker_Linux`. A full page URL is accepted
        /// as well, in which case only its query part is used.
        #[arg(short, long, default_value = "")]
        query: String,

        /// Base URL of the flake statistics backend.
        /// Falls back to `backend.base_url` in the config, then to http://localhost:8080.
        #[arg(short, long)]
        base_url: Option<String>,

        /// HTML output file
        #[arg(short, long, default_value = "flake_chart.html")]
        output: PathBuf,

        #[command(flatten)]
        appearance: CliPageAppearance,
    },

    /// Show the resolved configuration and where it was read from
    Config {},
}

fn parse_existing_path(s: &str) -> Result<PathBuf> {
    let path = PathBuf::from(s);
    if path.is_file() {
        Ok(path)
    } else {
        Err(anyhow!("file not found: '{}'", s))
    }
}
