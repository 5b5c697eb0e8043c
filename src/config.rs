// src/config.rs
// =============================================================================
// Run configuration, built once from the CLI and read-only afterwards.
//
// Nothing here is global: the coordinator hands a reference to each task.
// Validation is fatal at startup — a run never begins with a broken config.
// =============================================================================

use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::LinkRotError;
use crate::resolver::archive::WAYBACK_API;

/// Directories whose documents are eligible by default. Only files whose
/// immediate parent directory carries one of these names are processed.
pub const DEFAULT_DIRECTORIES: &[&str] = &[
    "_posts",
    "_likes",
    "_watches",
    "_bookmarks",
    "_reposts",
    "templates",
];

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the content tree to scan.
    pub root: PathBuf,
    /// Base URL that site-relative links resolve against, e.g.
    /// `https://example.com`.
    pub site_base: String,
    /// Allow-list of immediate parent directory names.
    pub allowed_dirs: Vec<String>,
    /// Maximum number of documents processed in parallel. 1 reproduces a
    /// fully sequential run.
    pub concurrency: usize,
    /// Report and log rewrites without writing any file back.
    pub dry_run: bool,
    /// Wayback availability endpoint. Overridable so tests can point it at
    /// a local server.
    pub wayback_api: String,
    /// Optional notification endpoint; the report goes to stdout when unset.
    pub webhook_url: Option<String>,
    pub webhook_token: Option<String>,
}

impl Config {
    /// Builds and validates the configuration from parsed CLI arguments.
    pub fn from_cli(cli: Cli) -> Result<Self, LinkRotError> {
        let domain = cli.domain.trim().trim_end_matches('/').to_string();
        if domain.is_empty() {
            return Err(LinkRotError::Configuration(
                "site domain must not be empty".to_string(),
            ));
        }
        if domain.contains("://") {
            return Err(LinkRotError::Configuration(format!(
                "site domain should be a bare host, not a URL: {domain}"
            )));
        }
        if !cli.root.is_dir() {
            return Err(LinkRotError::Configuration(format!(
                "target directory does not exist: {}",
                cli.root.display()
            )));
        }
        if cli.webhook_url.is_some() && cli.webhook_token.is_none() {
            return Err(LinkRotError::Configuration(
                "a webhook URL requires a webhook token".to_string(),
            ));
        }

        let mut allowed_dirs: Vec<String> =
            DEFAULT_DIRECTORIES.iter().map(|d| d.to_string()).collect();
        allowed_dirs.extend(cli.include_dir);

        Ok(Config {
            root: cli.root,
            site_base: format!("https://{domain}"),
            allowed_dirs,
            concurrency: cli.concurrency.max(1),
            dry_run: cli.dry_run,
            wayback_api: WAYBACK_API.to_string(),
            webhook_url: cli.webhook_url,
            webhook_token: cli.webhook_token,
        })
    }
}
