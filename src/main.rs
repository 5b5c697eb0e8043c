// src/main.rs
// =============================================================================
// Entry point.
//
// What happens here:
// 1. Initialize structured logging (RUST_LOG controls verbosity).
// 2. Parse the CLI and fold it into a validated, read-only Config — any
//    configuration error is fatal before a single document is touched.
// 3. Wire Ctrl-C to the run-level cancellation token.
// 4. Run the coordinator, render the report, hand it to the sink.
// 5. Exit 0 on a clean run, 1 when unresolvable links or unwritten fixes
//    remain, 2 on error.
// =============================================================================

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use linkrot::cli::Cli;
use linkrot::config::Config;
use linkrot::coordinator::{self, RunContext};
use linkrot::notify;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            2
        }
    };
    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = Config::from_cli(cli)?;
    let ctx = Arc::new(RunContext::new(config)?);

    // Ctrl-C stops new probes and skips unstarted documents; documents that
    // are already dirty still persist their confirmed rewrites.
    let cancel = ctx.cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("cancellation requested, finishing in-flight documents");
            cancel.cancel();
        }
    });

    coordinator::run(Arc::clone(&ctx)).await?;

    // The report is always produced, even when nothing was found.
    let report_text = ctx.report.render();
    if let Err(err) = notify::deliver(&ctx.client, &ctx.config, &report_text).await {
        error!(error = %err, "report delivery failed");
        eprintln!("{report_text}");
    }

    Ok(ctx.report.exit_code())
}
