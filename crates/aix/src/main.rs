// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AIX - compute pricing and token minting for agent chain-of-thought logs.
//!
//! This is the binary entry point for the `aix` command line tool.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;
mod pipeline;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::error;

/// AIX - price agent reasoning across compute providers and mint AIX tokens.
#[derive(Parser, Debug)]
#[command(name = "aix", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a JSONL log file into a JSON array with CPU/GPU estimates.
    Convert {
        /// Input JSONL file, one `{"log": ...}` record per line.
        input: PathBuf,
        /// Output file. Defaults to the input path with `.jsonl` replaced by `.json`.
        output: Option<PathBuf>,
        /// Refine estimates with the Prime Intellect analysis API.
        #[arg(long)]
        enhanced: bool,
    },
    /// Estimate and price every entry; writes `<in>.json` and `<in>-with-pricing.json`.
    Process {
        input: PathBuf,
        #[arg(long)]
        enhanced: bool,
    },
    /// Process a file, then mint AIX tokens for its first entry.
    Workflow {
        input: PathBuf,
        /// Provider key to pay against (e.g. `aws`, `render`).
        provider: Option<String>,
        /// Pick the cheapest available quote instead of the first.
        #[arg(long, conflicts_with = "provider")]
        cheapest: bool,
        #[arg(long)]
        enhanced: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; usage errors exit 1.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let config = match aix_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            aix_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.general.log_level);

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            enhanced,
        } => commands::run_convert(&config, &input, output.as_deref(), enhanced).await,
        Commands::Process { input, enhanced } => {
            commands::run_process(&config, &input, enhanced).await
        }
        Commands::Workflow {
            input,
            provider,
            cheapest,
            enhanced,
        } => {
            commands::run_workflow(&config, &input, provider.as_deref(), cheapest, enhanced).await
        }
    };

    if let Err(e) = result {
        error!(error = %e, "command failed");
        eprintln!("aix: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("aix={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
