//! groupstats CLI - meetup group growth analytics
//!
//! This binary runs the analytics queries against Neo4j and prints the
//! results as JSON.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use groupstats::{render_json, QueryCommand, QueryPreview};
use groupstats_core::config::Config;
use groupstats_core::entities::{LookupFilter, QueryOptions};
use groupstats_storage::analytics::{
    preview, CITIES, COUNTRIES, MONTHLY_GROWTH, WEEKLY_GROWTH,
};
use groupstats_storage::{create_analytics_service, CypherQuery};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "groupstats")]
#[command(about = "Growth analytics for meetup groups stored in Neo4j")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Abort queries running longer than this (overrides query_timeout_ms)
    #[arg(long, value_name = "MS", global = true)]
    timeout_ms: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Query(QueryCommand),
    /// Print the Cypher text and parameters of a query without running it
    ShowQuery {
        #[command(subcommand)]
        query: QueryCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    let options = QueryOptions {
        timeout: cli.timeout_ms.map(Duration::from_millis),
    };

    match cli.command {
        Commands::Query(query) => run_query(query, cli.config.as_deref(), &options).await,
        Commands::ShowQuery { query } => show_query(&query),
    }
}

/// Initialize logging system
///
/// Logs go to stderr so stdout carries only the JSON result.
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "groupstats_core={level},groupstats_storage={level},{}={level}",
            env!("CARGO_PKG_NAME")
        ))
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn built_query(command: &QueryCommand) -> CypherQuery {
    match command {
        QueryCommand::Cities => preview(&CITIES, &LookupFilter::default()),
        QueryCommand::Countries => preview(&COUNTRIES, &LookupFilter::default()),
        QueryCommand::WeeklyGrowth(args) => preview(&WEEKLY_GROWTH, &args.to_filter()),
        QueryCommand::MonthlyGrowth(args) => preview(&MONTHLY_GROWTH, &args.to_filter()),
    }
}

/// Print a query without connecting to Neo4j
fn show_query(command: &QueryCommand) -> Result<()> {
    let query = built_query(command);
    let output = render_json(&QueryPreview {
        endpoint: command.kind(),
        query: &query,
    })?;
    println!("{output}");
    Ok(())
}

/// Run a query against Neo4j and print the records
async fn run_query(
    command: QueryCommand,
    config_path: Option<&Path>,
    options: &QueryOptions,
) -> Result<()> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    debug!("Loaded configuration: {:?}", config.storage);

    let service = create_analytics_service(&config.storage)
        .await
        .context("Failed to connect to Neo4j")?;

    info!("Running {} query", command.kind());

    let output = match &command {
        QueryCommand::Cities => render_json(
            &service
                .get_cities(&LookupFilter::default(), options)
                .await
                .context("Failed to fetch cities")?,
        )?,
        QueryCommand::Countries => render_json(
            &service
                .get_countries(&LookupFilter::default(), options)
                .await
                .context("Failed to fetch countries")?,
        )?,
        QueryCommand::WeeklyGrowth(args) => render_json(
            &service
                .get_weekly_growth_percent(&args.to_filter(), options)
                .await
                .context("Failed to fetch weekly growth")?,
        )?,
        QueryCommand::MonthlyGrowth(args) => render_json(
            &service
                .get_monthly_growth_percent(&args.to_filter(), options)
                .await
                .context("Failed to fetch monthly growth")?,
        )?,
    };

    println!("{output}");
    Ok(())
}
