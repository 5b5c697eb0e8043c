// src/coordinator.rs
// =============================================================================
// This module drives the whole run.
//
// Responsibilities:
// 1. Discover eligible documents: *.md / *.html anywhere under the root
//    whose immediate parent directory name is on the allow-list.
// 2. Fan out one task per document, bounded by a semaphore (bound = 1 gives
//    a fully sequential run).
// 3. Per document: extract references, resolve each through the liveness
//    checker and archive resolver, apply rewrites, persist if dirty.
// 4. Aggregate every outcome into the shared RunReport.
//
// No failure inside a reference or document may take down the run: every
// document is attempted, and the report is always produced.
// =============================================================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use reqwest::Client;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::report::RunReport;
use crate::resolver::{self, liveness, ResolutionOutcome};
use crate::rewrite::DocumentState;
use crate::scanner;

/// Everything a document task needs, passed by reference — no process-wide
/// singletons. The report is the only member tasks mutate.
pub struct RunContext {
    pub config: Config,
    pub client: Client,
    pub report: RunReport,
    pub cancel: CancellationToken,
}

impl RunContext {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(liveness::HTTP_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(liveness::USER_AGENT)
            .build()?;
        Ok(RunContext {
            config,
            client,
            report: RunReport::new(),
            cancel: CancellationToken::new(),
        })
    }
}

/// Walks the content tree and returns the documents to process, sorted for
/// a deterministic order when concurrency is 1.
pub fn discover_documents(config: &Config) -> Vec<PathBuf> {
    let mut documents = Vec::new();
    for entry in jwalk::WalkDir::new(&config.root).sort(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_document = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("md") | Some("html")
        );
        if !is_document {
            continue;
        }
        let allowed = path
            .parent()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
            .map(|name| config.allowed_dirs.iter().any(|dir| dir == name))
            .unwrap_or(false);
        if allowed {
            documents.push(path);
        } else {
            debug!(document = %path.display(), "parent directory not on the allow-list");
        }
    }
    documents
}

/// Processes every discovered document with bounded parallelism, then
/// returns once all tasks have joined. The report lives in `ctx`.
pub async fn run(ctx: Arc<RunContext>) -> Result<()> {
    let documents = discover_documents(&ctx.config);
    info!(count = documents.len(), "discovered eligible documents");

    let semaphore = Arc::new(Semaphore::new(ctx.config.concurrency));
    let mut handles = Vec::with_capacity(documents.len());
    for path in documents {
        let ctx = Arc::clone(&ctx);
        let semaphore = Arc::clone(&semaphore);
        handles.push(tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return;
            };
            if ctx.cancel.is_cancelled() {
                info!(document = %path.display(), "run cancelled, skipping document");
                return;
            }
            process_document(&ctx, &path).await;
        }));
    }

    // A panicking task must not take its siblings down with it.
    for result in futures::future::join_all(handles).await {
        if let Err(err) = result {
            error!(error = %err, "document task failed");
        }
    }
    Ok(())
}

/// Runs the full extract → check → resolve → rewrite chain for one document.
/// Outcomes are applied only to this document's own working text.
async fn process_document(ctx: &RunContext, path: &Path) {
    let mut doc = match DocumentState::load(path).await {
        Ok(doc) => doc,
        Err(err) => {
            warn!(document = %path.display(), error = %err, "could not read document");
            return;
        }
    };

    info!(document = %path.display(), "processing");
    let references = scanner::extract_links(&doc.original_text, path);

    for reference in &references {
        // Cancellation stops new probes; rewrites already applied below
        // still persist because the document is dirty.
        if ctx.cancel.is_cancelled() {
            break;
        }
        match resolver::resolve_reference(&ctx.client, &ctx.config, &reference.target).await {
            ResolutionOutcome::Alive => {}
            ResolutionOutcome::Unresolvable { original } => {
                ctx.report.record_failure(original);
            }
            ResolutionOutcome::Resolved { original, archived } => {
                if doc.apply(reference, &archived) {
                    info!(document = %path.display(), %original, %archived, "substituted link");
                    ctx.report.record_substitution(original, archived);
                }
            }
        }
    }

    if !doc.dirty {
        // Byte-identical to what is on disk; no write happens at all.
        return;
    }
    if ctx.config.dry_run {
        info!(document = %path.display(), "dry run, not persisting rewrites");
        return;
    }
    match doc.persist().await {
        Ok(()) => info!(document = %path.display(), "fixed links and rewrote document"),
        Err(err) => {
            error!(document = %path.display(), error = %err, "persistence failed");
            ctx.report.record_persistence_failure();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_rooted_at(root: &Path) -> Config {
        Config {
            root: root.to_path_buf(),
            site_base: "https://example.com".to_string(),
            allowed_dirs: vec!["_posts".to_string(), "templates".to_string()],
            concurrency: 4,
            dry_run: false,
            wayback_api: String::new(),
            webhook_url: None,
            webhook_token: None,
        }
    }

    #[test]
    fn test_discovery_honors_extension_and_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("_posts/nested")).unwrap();
        std::fs::create_dir_all(root.join("drafts")).unwrap();
        std::fs::create_dir_all(root.join("templates")).unwrap();

        std::fs::write(root.join("_posts/a.md"), "").unwrap();
        std::fs::write(root.join("_posts/b.html"), "").unwrap();
        std::fs::write(root.join("_posts/c.txt"), "").unwrap();
        std::fs::write(root.join("_posts/nested/d.md"), "").unwrap();
        std::fs::write(root.join("drafts/e.md"), "").unwrap();
        std::fs::write(root.join("templates/f.html"), "").unwrap();
        std::fs::write(root.join("top.md"), "").unwrap();

        let config = config_rooted_at(root);
        let found = discover_documents(&config);
        let names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        // Only md/html directly inside an allow-listed directory survive;
        // "nested" is the immediate parent of d.md and is not listed.
        assert_eq!(names, vec!["a.md", "b.html", "f.html"]);
    }

    #[test]
    fn test_discovery_of_empty_tree_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_rooted_at(dir.path());
        assert!(discover_documents(&config).is_empty());
    }
}
