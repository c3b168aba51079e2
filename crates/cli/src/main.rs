//! orgmatch CLI - organisation identity resolution and indexing
//!
//! This binary provides the command-line interface for running the
//! full-refresh indexing pipeline.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::Result;
use clap::{Parser, Subcommand};
use orgmatch::report;
use orgmatch_core::config::{ConfigOverrides, PipelineConfig};
use orgmatch_indexer::Pipeline;
use orgmatch_storage::{create_search_index, create_source_store};
use tracing::info;

#[derive(Parser)]
#[command(name = "orgmatch")]
#[command(about = "Resolve organisation identities across registries and publish them to a search index")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full-refresh pipeline: load, resolve, publish, sweep
    Index {
        /// Source store connection string (falls back to ORGMATCH_DB_URL)
        #[arg(long)]
        db_url: Option<String>,

        /// Search index base URL (falls back to ORGMATCH_INDEX_URL)
        #[arg(long)]
        index_url: Option<String>,

        /// Search index name (falls back to ORGMATCH_INDEX)
        #[arg(long)]
        index: Option<String>,

        /// Documents per bulk request (falls back to ORGMATCH_BATCH_SIZE)
        #[arg(long)]
        batch_size: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Index {
            db_url,
            index_url,
            index,
            batch_size,
        }) => {
            index_data(ConfigOverrides {
                db_url,
                index_url,
                index_name: index,
                batch_size,
            })
            .await
        }
        None => {
            println!("Run 'orgmatch index' to run the pipeline, or --help for more options");
            Ok(())
        }
    }
}

/// Initialize logging system
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("orgmatch={level}"))),
        )
        .init();
}

/// Run one full pipeline pass and print the summary
async fn index_data(overrides: ConfigOverrides) -> Result<()> {
    let config = PipelineConfig::load(overrides)?;

    info!("Connecting to source store");
    let store = create_source_store(&config.db_url).await?;

    info!("Connecting to search index at {}", config.index_url);
    let index = create_search_index(&config.index_url, &config.index_name)?;

    let pipeline = Pipeline::new(store, index, config.batch_size);
    let summary = pipeline.run().await?;

    for line in report::summary_lines(&summary) {
        println!("{line}");
    }

    Ok(())
}
