// src/error.rs
// =============================================================================
// Typed errors for the resolution pipeline.
//
// The taxonomy matters because the failure modes have very different blast
// radii: a network error abandons one reference, a persistence error
// abandons one document's write, and a configuration error aborts the whole
// run before any work starts. A confirmed 404 is a signal, not an error —
// it never appears here.
// =============================================================================

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkRotError {
    /// Timeout, connection failure, DNS failure. Non-fatal: the reference
    /// is abandoned for this run.
    #[error("network error for {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The Wayback availability endpoint answered with a non-200 status or
    /// a body we could not read. Non-fatal: the reference is recorded as
    /// unresolvable.
    #[error("archive lookup unavailable for {url}: {reason}")]
    ArchiveUnavailable { url: String, reason: String },

    /// Writing a rewritten document back to disk failed. Aborts that
    /// document's persistence only; sibling tasks keep running.
    #[error("failed to persist {path}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid startup configuration. Fatal before any work begins.
    #[error("configuration error: {0}")]
    Configuration(String),
}
