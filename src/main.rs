//! Command-line interface for graph-populate
//!
//! # Usage Examples
//!
//! ## Populate
//! ```bash
//! # One Person as JSON on stdout
//! graph-populate populate --schema schema.yaml --type Person --seed 42
//!
//! # 100 orders as YAML, with overrides from a config file
//! graph-populate populate \
//!   --schema schema.yaml \
//!   --config populate.yaml \
//!   --type Order --count 100 \
//!   --format yaml --output orders.yaml
//! ```
//!
//! ## Check
//! ```bash
//! graph-populate check --schema schema.yaml --config populate.yaml
//! ```
//!
//! Logging is controlled with `RUST_LOG` (e.g. `RUST_LOG=populate_engine=debug`).

use clap::{Parser, Subcommand};
use graph_populate::commands::{run_check, run_populate};
use graph_populate::{CheckOpts, PopulateOpts};

#[derive(Parser)]
#[command(name = "graph-populate")]
#[command(about = "Populate object graphs with random fixture data")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate populated instances of a schema type
    Populate {
        #[command(flatten)]
        opts: PopulateOpts,
    },

    /// Validate a schema and config without generating data
    Check {
        #[command(flatten)]
        opts: CheckOpts,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Populate { opts } => {
            run_populate(&opts)?;
        }
        Commands::Check { opts } => {
            let report = run_check(&opts)?;
            println!(
                "OK: {} types, {} unbound interface(s)",
                report.type_count,
                report.unbound_interfaces.len()
            );
        }
    }

    Ok(())
}
