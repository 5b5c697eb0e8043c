// src/rewrite.rs
// =============================================================================
// This module applies resolved replacements to a document and persists it.
//
// Key behaviors:
// - Each replacement targets one occurrence of the reference's exact matched
//   text, never a document-wide replace-all. Repeated identical links are
//   healed one occurrence per reference, so nothing else gets corrupted.
// - The archived URL takes the original's place inside the original syntax,
//   with an " (archived)" marker appended so a human reviewer can see which
//   links were auto-healed.
// - A document is persisted at most once per run, only if dirty, as a full
//   UTF-8 overwrite via a same-directory temp file + rename.
// =============================================================================

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::LinkRotError;
use crate::scanner::{LinkReference, LinkSyntax};

/// Marker appended after every healed link.
const ARCHIVED_MARKER: &str = " (archived)";

/// One document's in-flight state. Exclusively owned by the task processing
/// it; no synchronization needed.
#[derive(Debug)]
pub struct DocumentState {
    pub path: PathBuf,
    pub original_text: String,
    pub working_text: String,
    pub dirty: bool,
}

impl DocumentState {
    /// Reads the document from disk.
    pub async fn load(path: &Path) -> std::io::Result<Self> {
        let text = tokio::fs::read_to_string(path).await?;
        Ok(DocumentState {
            path: path.to_path_buf(),
            working_text: text.clone(),
            original_text: text,
            dirty: false,
        })
    }

    /// Replaces one occurrence of `reference` in the working text with its
    /// archived rendition. Returns whether a rewrite actually happened.
    ///
    /// Later substitutions operate on the already-partially-rewritten text;
    /// keying on the full matched text keeps each application pinned to a
    /// single occurrence even when spans have shifted.
    pub fn apply(&mut self, reference: &LinkReference, archived: &str) -> bool {
        let replacement = match reference.syntax {
            LinkSyntax::Markdown => {
                format!("[{}]({archived}){ARCHIVED_MARKER}", reference.label)
            }
            LinkSyntax::Html => {
                format!(
                    "<a href=\"{archived}\">{}</a>{ARCHIVED_MARKER}",
                    reference.label
                )
            }
        };

        if !self.working_text.contains(&reference.raw_text) {
            debug!(
                document = %self.path.display(),
                raw = %reference.raw_text,
                "matched text no longer present, leaving document as-is"
            );
            return false;
        }

        self.working_text = self.working_text.replacen(&reference.raw_text, &replacement, 1);
        self.dirty = true;
        true
    }

    /// Writes the working text back to the document's path.
    ///
    /// Goes through a temp file in the same directory and renames over the
    /// original, so a crash mid-write never leaves a truncated document.
    pub async fn persist(&self) -> Result<(), LinkRotError> {
        let tmp = self.path.with_extension("linkrot-tmp");
        let write = async {
            tokio::fs::write(&tmp, &self.working_text).await?;
            tokio::fs::rename(&tmp, &self.path).await
        };
        write.await.map_err(|source| LinkRotError::Persistence {
            path: self.path.clone(),
            source,
        })
    }
}
