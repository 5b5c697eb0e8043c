// src/scanner/html.rs
// =============================================================================
// This module extracts HTML anchor links from document text.
//
// Like the markdown pass, this is a non-greedy pattern scan over the raw
// text, not a DOM parse. The whole anchor element is captured as the raw
// match so the rewriter can reconstruct it around a replacement href.
// =============================================================================

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{LinkReference, LinkSyntax};

// `<a ... href="target" ...>label</a>`; `.` does not match newlines, so a
// match never spans lines.
static HTML_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a.*?href="(.*?)".*?>(.*?)</a>"#).expect("anchor pattern is valid")
});

/// Extracts all anchor-element links from `text`, in document order.
pub fn extract_html_links(text: &str, document: &Path) -> Vec<LinkReference> {
    HTML_ANCHOR
        .captures_iter(text)
        .map(|caps| LinkReference {
            raw_text: caps[0].to_string(),
            target: caps[1].to_string(),
            label: caps[2].to_string(),
            syntax: LinkSyntax::Html,
            document: document.to_path_buf(),
        })
        .collect()
}
