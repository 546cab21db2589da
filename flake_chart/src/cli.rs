use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::Level;

use crate::config;
use crate::fetch::FlakeDataClient;
use crate::reporting::{report, PageConfig};
use flake_chart_cli_types::{Cli, Commands};

pub fn handle_calls() -> Result<()> {
    let cli = Cli::parse();
    let logger_level = match cli.verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(logger_level.as_str())).init();

    match cli.command {
        Commands::Render {
            query,
            base_url,
            output,
            appearance,
        } => {
            let base_url = base_url.unwrap_or_else(config::backend_base_url);
            let client = FlakeDataClient::new(config::backend_timeout())?;
            let page_config = PageConfig {
                title: appearance.title,
                custom_css_path: appearance.custom_css,
            };

            // A page load is a single sequential task
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?;
            runtime
                .block_on(report(&query, &base_url, &client, &output, page_config))
                .map(|_| ())
        }
        Commands::Config {} => show_config_info(),
    }
}

/// Show configuration information including resolved values and config paths
fn show_config_info() -> Result<()> {
    println!("Flake Chart Configuration Information");
    println!("=====================================");

    match config::system_config_path() {
        Some(path) if path.is_file() => println!("System config: {} (exists)", path.display()),
        Some(path) => println!("System config: {} (not found)", path.display()),
        None => println!("System config: unavailable (no home directory)"),
    }

    match config::find_local_config_path() {
        Some(path) => println!("Local config: {}", path.display()),
        None => println!("Local config: {} (not found)", config::LOCAL_CONFIG_FILE),
    }

    if let Err(e) = config::read_hierarchical_config() {
        println!("\nConfiguration: Error loading - {}", e);
        return Ok(());
    }

    println!("\nResolved settings");
    println!("  backend.base_url: {}", config::backend_base_url());
    match config::backend_timeout() {
        Some(timeout) => println!("  backend.timeout_seconds: {}", timeout.as_secs()),
        None => println!("  backend.timeout_seconds: none"),
    }
    println!(
        "  report.title: {}",
        config::report_title().unwrap_or_else(|| crate::defaults::DEFAULT_PAGE_TITLE.to_string())
    );
    if let Some(css) = config::report_custom_css_path() {
        println!("  report.custom_css: {}", css.display());
    }

    Ok(())
}
