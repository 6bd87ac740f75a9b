mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{clean, scan};
use tracing_subscriber::EnvFilter;

/// Map `-v` occurrences to a default log level; `RUST_LOG` takes precedence when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);
    match &cli.command {
        Commands::Scan(args) => scan::run(&cli, args),
        Commands::Clean(args) => clean::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
