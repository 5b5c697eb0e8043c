// src/resolver/mod.rs
// =============================================================================
// This module turns a raw link target into a terminal resolution outcome.
//
// Submodules:
// - liveness: normalization policy + the 404-only death probe
// - archive: Wayback availability lookup
//
// The one rule that lives here: a dead *internal* link is a content bug the
// Wayback Machine cannot fix, so it goes straight to the failure list and
// never reaches the archive lookup.
// =============================================================================

pub mod archive;
pub mod liveness;

use reqwest::Client;
use tracing::info;

use crate::config::Config;
use archive::ArchiveOutcome;
use liveness::LinkStatus;

/// Terminal outcome for one link reference. Consumed exactly once: `Alive`
/// is discarded, the other two feed the rewriter or the failure list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Alive,
    Unresolvable { original: String },
    Resolved { original: String, archived: String },
}

/// Runs one target through the liveness check and, when warranted, the
/// archive lookup.
pub async fn resolve_reference(client: &Client, config: &Config, target: &str) -> ResolutionOutcome {
    match liveness::check(client, &config.site_base, target).await {
        LinkStatus::Alive | LinkStatus::Skip => ResolutionOutcome::Alive,
        LinkStatus::Dead { url, internal: true } => {
            info!(%url, "dead internal link, nothing to archive");
            ResolutionOutcome::Unresolvable { original: url }
        }
        LinkStatus::Dead { url, internal: false } => {
            match archive::resolve(client, &config.wayback_api, &url).await {
                ArchiveOutcome::Resolved { archived } => ResolutionOutcome::Resolved {
                    original: url,
                    archived,
                },
                ArchiveOutcome::Unresolvable => ResolutionOutcome::Unresolvable { original: url },
            }
        }
    }
}
