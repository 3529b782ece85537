use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use hv_api::HarvestClient;
use hv_core::Reports;
use tracing_subscriber::EnvFilter;

use hv_cli::commands::{clients, entries, projects, tasks, timers, users};
use hv_cli::{Cli, Commands, Config};

/// Load config and build the report layer over the configured account.
fn open_reports(config_path: Option<&Path>) -> Result<Reports<HarvestClient>> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let settings = config
        .report_settings()
        .context("invalid report settings")?;
    let client = config.client()?;
    tracing::debug!(base_url = client.base_url(), "connecting");
    Ok(Reports::new(client, settings))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support; stdout carries report output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let reports = open_reports(cli.config.as_deref())?;
    let mut out = std::io::stdout().lock();

    match command {
        Commands::Clients { inactive, json } => clients::run(&mut out, &reports, inactive, json)?,
        Commands::Projects {
            client,
            inactive,
            json,
        } => projects::run(&mut out, &reports, client, inactive, json)?,
        Commands::Users { filter, json } => users::run(&mut out, &reports, filter.into(), json)?,
        Commands::Timers { user, json } => timers::run(&mut out, &reports, user, json)?,
        Commands::Tasks { project, json } => tasks::run(&mut out, &reports, project, json)?,
        Commands::Entries { user, period, json } => entries::run(
            &mut out,
            &reports,
            user,
            period.into(),
            chrono::Utc::now(),
            json,
        )?,
    }

    out.flush()?;
    Ok(())
}
