// src/cli.rs
// =============================================================================
// Command-line surface, defined with clap's derive API.
//
// The pipeline itself never reads arguments or the environment; everything
// here is folded into a validated `Config` at startup.
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "linkrot",
    version,
    about = "Finds rotten links in Markdown/HTML content and heals them with Wayback Machine snapshots",
    long_about = "linkrot scans a content tree for outgoing links, probes them for 404s, looks up \
                  archived replacements on the Wayback Machine, rewrites the documents in place, \
                  and reports what it changed."
)]
pub struct Cli {
    /// Root of the content tree to scan
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Site domain that site-relative links resolve against (e.g. example.com)
    #[arg(long)]
    pub domain: String,

    /// Extra directory name to add to the allow-list (repeatable)
    #[arg(long = "include-dir", value_name = "DIR")]
    pub include_dir: Vec<String>,

    /// Maximum number of documents processed in parallel (1 = sequential)
    #[arg(long, default_value_t = 8)]
    pub concurrency: usize,

    /// Resolve and report rewrites without writing any file back
    #[arg(long)]
    pub dry_run: bool,

    /// Endpoint that receives the final report as {"message": ...}
    #[arg(long, value_name = "URL")]
    pub webhook_url: Option<String>,

    /// Token sent as Basic authorization to the webhook endpoint
    #[arg(long, value_name = "TOKEN")]
    pub webhook_token: Option<String>,
}
