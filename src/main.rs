//! covtree: browse coverage report trees from the command line
//!
//! Loads the coverage payload an HTML coverage report embeds, reshapes it
//! (flatten, scope, filter, sort) and writes the resulting table as HTML.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use covtree::{
    cli,
    config::{AppConfig, ConfigOverrides, RenderConfig},
    model::{Dimension, QualityBucket},
    pipeline::exit_codes,
    view::{SortOrder, SummarizerMode},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "covtree")]
#[command(version)]
#[command(about = "Flatten, scope, filter and sort coverage report trees", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Rows rendered
    1  No rows matched the view
    3  Error occurred

EXAMPLES:
    # Files with the weakest statement coverage first
    covtree render coverage/report.json --summarizer flat --sort statements.pct -O worst.html

    # Only low and medium files under src/utils
    covtree render coverage/report.json --path src/utils --buckets low,medium

    # Read the payload from stdin
    cat report.json | covtree render - --summarizer nested")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Arguments for the `render` subcommand
#[derive(Parser)]
struct RenderArgs {
    /// Path to the coverage payload JSON (`-` for stdin)
    payload: PathBuf,

    /// How rows are summarized
    #[arg(short, long, value_enum)]
    summarizer: Option<SummarizerMode>,

    /// Sort key: `file`, a dimension, or `<dimension>.<field>`
    #[arg(long)]
    sort: Option<String>,

    /// Sort order
    #[arg(long, value_enum)]
    order: Option<SortOrder>,

    /// Only show the subtree under this path
    #[arg(short, long)]
    path: Option<String>,

    /// Quality buckets to show
    #[arg(long, value_enum, value_delimiter = ',')]
    buckets: Option<Vec<QualityBucket>>,

    /// Dimensions to show
    #[arg(long, value_enum, value_delimiter = ',')]
    metrics: Option<Vec<Dimension>>,

    /// Page title
    #[arg(long)]
    title: Option<String>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a coverage payload as an HTML table
    Render(RenderArgs),

    /// Generate JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration (defaults merged with the config file)
    ShowConfig,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Render(args) => {
            let overrides = ConfigOverrides {
                summarizer: args.summarizer,
                sort: args.sort,
                order: args.order,
                path: args.path,
                buckets: args.buckets,
                metrics: args.metrics,
                output_file: args.output_file,
                title: args.title,
            };
            let (app, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            if let Some(path) = &loaded_from {
                tracing::debug!("Using config file {}", path.display());
            }

            let mut config = RenderConfig::new(args.payload, app);
            config.quiet = cli.quiet;
            cli::run_render(config)
        }

        Commands::Schema { output } => {
            let schema =
                covtree::config::generate_json_schema().context("failed to serialize schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::ShowConfig => {
            let (config, loaded_from) = covtree::config::load_or_default(cli.config.as_deref());
            match &loaded_from {
                Some(path) => eprintln!("# Loaded from: {}", path.display()),
                None => eprintln!("# No config file found; showing defaults"),
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
            Ok(exit_codes::SUCCESS)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "covtree", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
    }
}
