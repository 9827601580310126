use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pythia_query::{Config, QueryScope};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "pythia-query")]
#[command(about = "Pythia query builder - build and check search queries")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.pythia/query.toml)
    #[arg(short, long, global = true, env = "PYTHIA_QUERY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the query text from a JSON/YAML entry list
    Build {
        /// Entry list file
        #[arg(short, long)]
        input: PathBuf,

        /// Target document attributes instead of text
        #[arg(short, long)]
        document: bool,

        /// Corpus ids to restrict the search to (comma-separated)
        #[arg(long, value_delimiter = ',')]
        corpora: Vec<String>,
    },

    /// Validate an entry list and print its errors
    Validate {
        /// Entry list file
        #[arg(short, long)]
        input: PathBuf,

        /// Target document attributes instead of text
        #[arg(short, long)]
        document: bool,
    },

    /// List available attributes and operators
    Terms {
        #[arg(short, long, value_enum)]
        kind: Option<commands::TermKind>,
    },
}

fn resolve_scope(document: bool, config: &Config) -> QueryScope {
    if document {
        QueryScope::Document
    } else {
        config.query.scope
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::load().context("Failed to load config")?,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Build {
            input,
            document,
            corpora,
        } => {
            let corpora = if corpora.is_empty() {
                config.query.corpora.clone()
            } else {
                corpora
            };
            commands::run_build(&input, resolve_scope(document, &config), &corpora)?;
        }
        Commands::Validate { input, document } => {
            commands::run_validate(&input, resolve_scope(document, &config))?;
        }
        Commands::Terms { kind } => {
            commands::run_terms(kind)?;
        }
    }

    Ok(())
}
