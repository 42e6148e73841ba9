//! CLI command definitions
//!
//! Defines the clap commands for the apibdd CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// List configured environments
    Envs,

    /// Send a single request through the step dispatcher
    Request {
        /// HTTP method: get, post, put or delete
        method: String,

        /// Endpoint path, relative to the environment's base URL
        endpoint: String,

        /// JSON request body
        #[arg(long)]
        body: Option<String>,

        /// Environment to target (default: $API_ENV or development)
        #[arg(long)]
        env: Option<String>,

        /// Extra header, "Name: value". Can be specified multiple times
        #[arg(long = "header", short = 'H')]
        headers: Vec<String>,

        /// Query parameter, "key=value". Can be specified multiple times
        #[arg(long = "query", short = 'q')]
        query: Vec<String>,

        /// Bearer token to send
        #[arg(long)]
        token: Option<String>,
    },

    /// Summarize a Cucumber JSON report
    Report {
        /// Report file (default: <reports_dir>/cucumber-report.json)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Generate the Markdown step catalog
    Steps {
        /// Directory containing step definition sources
        #[arg(long, default_value = "tests/steps")]
        source: PathBuf,

        /// Output file (default: <docs_dir>/steps.md)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}
