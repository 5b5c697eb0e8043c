// src/resolver/liveness.rs
// =============================================================================
// This module decides whether a link target is dead.
//
// Two steps:
// 1. Normalize: absolute http(s) targets are probed as-is; site-relative
//    targets (leading '/') are resolved against the configured site base and
//    marked internal; everything else (mailto:, #fragment, bare relative
//    paths) is skipped without any HTTP call.
// 2. Probe: one GET with a bounded timeout and redirect following. Only a
//    confirmed 404 counts as dead. 5xx, timeouts, and transport errors are
//    treated as not-dead so a transient outage never gets "archived".
// =============================================================================

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::error::LinkRotError;

/// Identifying user-agent sent with every probe, so site operators can see
/// who is knocking.
pub const USER_AGENT: &str =
    "link-rot-detector (https://github.com/capjamesg/markdown-html-link-rot)";

/// Per-request timeout for probes and archive lookups.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of normalizing a raw link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// An absolute URL worth probing. `internal` is true when the target was
    /// site-relative.
    Candidate { url: String, internal: bool },
    /// Not a checkable absolute reference; no HTTP call is made.
    Skip,
}

/// Result of a liveness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    Alive,
    Dead { url: String, internal: bool },
    Skip,
}

/// Applies the normalization policy to a raw target.
///
/// The original reference is never mutated; this produces a derived copy.
pub fn normalize(target: &str, site_base: &str) -> Normalized {
    let target = target.trim_end();
    if target.starts_with("http") {
        // External-form. It may still point at our own domain, but only
        // site-relative links count as internal.
        Normalized::Candidate {
            url: target.to_string(),
            internal: false,
        }
    } else if target.starts_with('/') {
        Normalized::Candidate {
            url: format!("{}{}", site_base.trim_end_matches('/'), target),
            internal: true,
        }
    } else {
        Normalized::Skip
    }
}

/// Checks whether `target` is dead.
///
/// Returns `Skip` without touching the network for non-checkable targets.
pub async fn check(client: &Client, site_base: &str, target: &str) -> LinkStatus {
    let (url, internal) = match normalize(target, site_base) {
        Normalized::Candidate { url, internal } => (url, internal),
        Normalized::Skip => {
            debug!(link = target, "not a checkable absolute reference, skipping");
            return LinkStatus::Skip;
        }
    };

    match probe(client, &url).await {
        Ok(status) if status == StatusCode::NOT_FOUND => LinkStatus::Dead { url, internal },
        Ok(status) => {
            debug!(%url, status = status.as_u16(), "link answered, leaving it alone");
            LinkStatus::Alive
        }
        Err(err) => {
            // A failed probe is not proof of death. Abandon the reference
            // for this run rather than archiving a transient failure.
            warn!(%url, error = %err, "liveness probe failed, treating as not dead");
            LinkStatus::Alive
        }
    }
}

async fn probe(client: &Client, url: &str) -> Result<StatusCode, LinkRotError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| LinkRotError::Network {
            url: url.to_string(),
            source,
        })?;
    Ok(response.status())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = "https://example.com";

    #[test]
    fn test_absolute_url_is_external_candidate() {
        assert_eq!(
            normalize("https://other.com/page", SITE),
            Normalized::Candidate {
                url: "https://other.com/page".to_string(),
                internal: false,
            }
        );
    }

    #[test]
    fn test_site_relative_is_internal_candidate() {
        assert_eq!(
            normalize("/posts/2020", SITE),
            Normalized::Candidate {
                url: "https://example.com/posts/2020".to_string(),
                internal: true,
            }
        );
    }

    #[test]
    fn test_trailing_whitespace_is_trimmed_from_the_copy() {
        assert_eq!(
            normalize("/posts/2020 ", SITE),
            Normalized::Candidate {
                url: "https://example.com/posts/2020".to_string(),
                internal: true,
            }
        );
    }

    #[test]
    fn test_bare_relative_fragment_and_mailto_are_skipped() {
        assert_eq!(normalize("about.html", SITE), Normalized::Skip);
        assert_eq!(normalize("#section", SITE), Normalized::Skip);
        assert_eq!(normalize("mailto:hi@example.com", SITE), Normalized::Skip);
        assert_eq!(normalize("", SITE), Normalized::Skip);
    }

    #[tokio::test]
    async fn test_skip_makes_no_http_call() {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let base = format!("http://{}", server.server_addr().to_ip().unwrap());
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen_by_server = std::sync::Arc::clone(&seen);
        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                seen_by_server.lock().unwrap().push(request.url().to_string());
                let _ = request.respond(tiny_http::Response::from_string("ok"));
            }
        });

        // Even the site base points at the recording server, so a probe of
        // any of these targets would land in the log.
        let client = Client::new();
        for target in ["about.html", "#section", "mailto:hi@example.com"] {
            assert_eq!(check(&client, &base, target).await, LinkStatus::Skip);
        }
        assert!(seen.lock().unwrap().is_empty());

        // The log does record when a probe actually happens.
        assert_eq!(
            check(&client, &base, &format!("{base}/ok")).await,
            LinkStatus::Alive
        );
        assert_eq!(seen.lock().unwrap().as_slice(), ["/ok".to_string()]);
    }

    #[tokio::test]
    async fn test_only_404_is_dead() {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let base = format!("http://{}", server.server_addr().to_ip().unwrap());
        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                let code = match request.url() {
                    "/missing" => 404,
                    "/error" => 500,
                    _ => 200,
                };
                let _ = request.respond(tiny_http::Response::empty(code));
            }
        });

        let client = Client::builder().timeout(HTTP_TIMEOUT).build().unwrap();
        assert_eq!(
            check(&client, SITE, &format!("{base}/missing")).await,
            LinkStatus::Dead {
                url: format!("{base}/missing"),
                internal: false,
            }
        );
        assert_eq!(check(&client, SITE, &format!("{base}/ok")).await, LinkStatus::Alive);
        // 5xx is not proof of death.
        assert_eq!(
            check(&client, SITE, &format!("{base}/error")).await,
            LinkStatus::Alive
        );
    }

    #[tokio::test]
    async fn test_connection_failure_is_not_dead() {
        let client = Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        // Nothing listens on port 1.
        let status = check(&client, SITE, "http://127.0.0.1:1/gone").await;
        assert_eq!(status, LinkStatus::Alive);
    }
}
