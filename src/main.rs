#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use corenlp_models::cli::Cli;
use corenlp_models::config::Config;
use corenlp_models::error::{DataManagerError, Result};
use corenlp_models::models::manager::banner;
use corenlp_models::models::{ExistingEntries, HttpFetcher, ModelManager};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides -v
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli).await {
        eprintln!("Error: {e}");
        let code = if matches!(e, DataManagerError::Usage(_)) { 2 } else { 1 };
        std::process::exit(code);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let request = cli.download_request();
    request.validate()?;

    let config = Config::load(cli.config.as_deref())?;
    let existing = ExistingEntries::load(cli.data_table.as_deref())?;
    tracing::info!("{} models already registered", existing.len());

    let fetcher = HttpFetcher::new(&config.download)?;
    let manager = ModelManager::new(fetcher, existing);

    let report = manager.run(&request).await?;
    let output = report.into_output();
    output.save(&cli.output)?;

    banner(&format!(
        "Summary: Successfully registered {} model(s)",
        output.entries().len()
    ));

    Ok(())
}
