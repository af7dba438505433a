//! u-roster command-line interface
//!
//! Usage:
//!   u-roster solve --workers workers.csv --night 2 --day 3 --evening 2 -o schedule.txt
//!   u-roster score --workers workers.csv --schedule schedule.txt
//!   u-roster report --workers workers.csv --schedule schedule.txt --out-dir reports/
//!   u-roster generate-workers --names names.txt --count 400 -o workers.csv

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    cli.command.execute()
}
