//! catdiff CLI
//!
//! Command-line interface for diffing two catalog snapshots

use catdiff_core_types::RequestId;
use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "catdiff")]
#[command(about = "catdiff - CREATE/UPDATE/DELETE operations between two catalog snapshots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Emit the operation stream that turns BEFORE into AFTER
    Diff(commands::diff::DiffArgs),
    /// Print operation counts and snapshot digests only
    Summary(commands::summary::SummaryArgs),
}

fn main() {
    let cli = Cli::parse();
    let request_id = RequestId::new();

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args, &request_id),
        Commands::Summary(args) => commands::summary::execute(args, &request_id),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e.with_request_id(request_id));
        std::process::exit(1);
    }
}
