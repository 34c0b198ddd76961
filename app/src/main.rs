#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    CommandStrategy, InfoStrategy, InitStrategy, MockInput, MockStrategy, SearchInput,
    SearchStrategy, TemplateStrategy, VersionStrategy,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::fmt::time::LocalTime;

#[derive(Parser)]
#[command(name = "yisu")]
#[command(about = "医溯: free-text cohort search with survival curves", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a corpus against a clinical query and compare survival
    Search {
        /// Free-text query, e.g. "80岁 房颤 华法林 消化道出血"
        #[arg(short = 'q', long)]
        query: String,

        /// CSV, JSON or Excel corpus (defaults to config, then the mock corpus)
        #[arg(short = 'c', long)]
        corpus: Option<PathBuf>,

        /// Seed for the mock corpus
        #[arg(long)]
        seed: Option<u64>,

        /// Number of ranked records to show
        #[arg(long)]
        top: Option<usize>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export the mock corpus as CSV
    Mock {
        /// Output file (stdout when omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        #[arg(long)]
        seed: Option<u64>,
    },
    /// Write the upload template CSV
    Template {
        /// Output file (stdout when omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Initialize configuration
    Init,
    /// Show effective configuration and capability notes
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_timer(LocalTime::rfc_3339())
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            query,
            corpus,
            seed,
            top,
            json,
        } => {
            SearchStrategy
                .execute(SearchInput {
                    query,
                    corpus,
                    seed,
                    top,
                    json,
                })
                .await?;
        }
        Commands::Mock { output, seed } => {
            MockStrategy.execute(MockInput { output, seed }).await?;
        }
        Commands::Template { output } => {
            TemplateStrategy.execute(output).await?;
        }
        Commands::Init => InitStrategy.execute(()).await?,
        Commands::Info => InfoStrategy.execute(()).await?,
        Commands::Version => VersionStrategy.execute(()).await?,
    }

    Ok(())
}
