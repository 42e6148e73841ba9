//! apibdd - behavior-driven HTTP/JSON API test harness
//!
//! The scenarios themselves run through `cargo test --test cucumber`; this
//! binary covers the tooling around them: environments, one-off requests,
//! report summaries and the step catalog.

use apibdd::common::logging;
use apibdd::{cli, commands};
use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "apibdd", about = "Behavior-driven API test harness")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    logging::init_cli();

    let cli = Cli::parse();

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
