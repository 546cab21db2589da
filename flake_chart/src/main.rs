use anyhow::Result;
use flake_chart::cli;

// Main entry point
fn main() -> Result<()> {
    cli::handle_calls()
}
