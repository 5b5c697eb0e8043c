// src/scanner/markdown.rs
// =============================================================================
// This module extracts inline markdown links from document text.
//
// We scan with a non-greedy pattern rather than a full CommonMark parser:
// the rewriter later replaces the exact matched text of each link, so we
// need the raw match, and we deliberately pass malformed or relative
// targets through untouched (the liveness checker decides what to skip).
// =============================================================================

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{LinkReference, LinkSyntax};

// `[label](target)`, non-greedy so adjacent links don't merge into one match.
static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("markdown link pattern is valid"));

/// Extracts all inline markdown links from `text`, in document order.
pub fn extract_markdown_links(text: &str, document: &Path) -> Vec<LinkReference> {
    MARKDOWN_LINK
        .captures_iter(text)
        .map(|caps| LinkReference {
            raw_text: caps[0].to_string(),
            label: caps[1].to_string(),
            target: caps[2].to_string(),
            syntax: LinkSyntax::Markdown,
            document: document.to_path_buf(),
        })
        .collect()
}
