//! CLI entry point for the connector puzzle solver

use clap::Parser;
use looptile::io::cli::{Cli, FileProcessor};
use tracing_subscriber::EnvFilter;

fn main() -> looptile::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
