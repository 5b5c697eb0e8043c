// src/resolver/archive.rs
// =============================================================================
// This module asks the Wayback Machine for an archived replacement.
//
// One GET against the availability API per confirmed-dead external link.
// This is the pipeline's only external dependency boundary: if the API is
// down, answers non-200, or has no snapshot, the reference degrades to
// "unresolvable" and the run carries on.
// =============================================================================

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::info;

use crate::error::LinkRotError;

/// Availability endpoint, `?url=<target>` appended per lookup. Overridable
/// through the config so tests can stand in a local server.
pub const WAYBACK_API: &str = "https://archive.org/wayback/available";

/// Result of an archive lookup for one dead external URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    Resolved { archived: String },
    Unresolvable,
}

// Response shape: `archived_snapshots` is `{}` when nothing is archived,
// otherwise it carries a `closest` snapshot.
#[derive(Debug, Deserialize)]
struct WaybackAvailability {
    #[serde(default)]
    archived_snapshots: ArchivedSnapshots,
}

#[derive(Debug, Default, Deserialize)]
struct ArchivedSnapshots {
    closest: Option<ClosestSnapshot>,
}

#[derive(Debug, Deserialize)]
struct ClosestSnapshot {
    url: String,
}

/// Looks up the closest archived snapshot for `url`.
///
/// Every failure path collapses to `Unresolvable` after logging; a lookup
/// never aborts the run.
pub async fn resolve(client: &Client, api_base: &str, url: &str) -> ArchiveOutcome {
    match lookup(client, api_base, url).await {
        Ok(Some(archived)) => {
            info!(original = url, %archived, "found archived replacement");
            ArchiveOutcome::Resolved { archived }
        }
        Ok(None) => {
            info!(url, "could not be retrieved from the Wayback Machine");
            ArchiveOutcome::Unresolvable
        }
        Err(err) => {
            info!(url, error = %err, "archive lookup failed");
            ArchiveOutcome::Unresolvable
        }
    }
}

async fn lookup(client: &Client, api_base: &str, url: &str) -> Result<Option<String>, LinkRotError> {
    let response = client
        .get(api_base)
        .query(&[("url", url)])
        .send()
        .await
        .map_err(|source| LinkRotError::Network {
            url: url.to_string(),
            source,
        })?;

    if response.status() != StatusCode::OK {
        return Err(LinkRotError::ArchiveUnavailable {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status().as_u16()),
        });
    }

    let body: WaybackAvailability =
        response
            .json()
            .await
            .map_err(|err| LinkRotError::ArchiveUnavailable {
                url: url.to_string(),
                reason: format!("malformed response body: {err}"),
            })?;

    Ok(body.archived_snapshots.closest.map(|closest| closest.url))
}
