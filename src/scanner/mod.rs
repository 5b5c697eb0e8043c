// src/scanner/mod.rs
// =============================================================================
// This module extracts link references from document text.
//
// Submodules:
// - markdown: inline markdown link syntax `[label](target)`
// - html: anchor elements `<a ... href="target">label</a>`
//
// Both syntaxes may co-occur in one document (a markdown post can embed raw
// HTML), so every document goes through both passes regardless of its file
// extension. No validation happens here: malformed, relative, or
// fragment-only targets are passed through and classified downstream.
// =============================================================================

mod html;
mod markdown;

use std::path::{Path, PathBuf};

pub use html::extract_html_links;
pub use markdown::extract_markdown_links;

/// Which link syntax a reference was written in.
///
/// The rewriter needs this to reconstruct the link around the replacement
/// URL without disturbing the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSyntax {
    Markdown,
    Html,
}

/// One outgoing link found in a document.
///
/// `raw_text` is the full matched text (`[label](target)` or the whole
/// anchor element). The rewriter replaces that exact occurrence, so a
/// reference carries everything needed to heal itself later. Immutable after
/// creation; `target` is never modified (normalization works on copies).
#[derive(Debug, Clone)]
pub struct LinkReference {
    pub raw_text: String,
    pub target: String,
    pub label: String,
    pub syntax: LinkSyntax,
    pub document: PathBuf,
}

/// Runs both extraction passes over `text` and returns every reference found.
///
/// Each pass is a single non-greedy scan; the function is restartable and
/// returns the same references when re-invoked on the same text.
pub fn extract_links(text: &str, document: &Path) -> Vec<LinkReference> {
    let mut references = extract_markdown_links(text, document);
    references.extend(extract_html_links(text, document));
    references
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_syntaxes_enumerated_independently() {
        let text = r#"A [post](https://example.com/a) and
<a href="https://example.com/b">another</a> reference."#;
        let refs = extract_links(text, Path::new("doc.md"));
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].syntax, LinkSyntax::Markdown);
        assert_eq!(refs[0].target, "https://example.com/a");
        assert_eq!(refs[1].syntax, LinkSyntax::Html);
        assert_eq!(refs[1].target, "https://example.com/b");
    }

    #[test]
    fn test_extraction_is_restartable() {
        let text = "See [one](https://example.com/1) and [two](/2).";
        let doc = Path::new("doc.md");
        let first = extract_links(text, doc);
        let second = extract_links(text, doc);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.raw_text, b.raw_text);
            assert_eq!(a.target, b.target);
        }
    }

    #[test]
    fn test_no_links_means_no_references() {
        let refs = extract_links("Just plain prose, nothing else.", Path::new("doc.md"));
        assert!(refs.is_empty());
    }
}
