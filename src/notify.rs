// src/notify.rs
// =============================================================================
// Delivers the final report text.
//
// When a webhook endpoint and token are configured, the report is POSTed as
// `{"message": "<report text>"}` with Basic authorization. Otherwise the
// report goes to stdout. Delivery failure never un-produces the report: the
// text is already rendered and the caller decides the exit code from the
// run's own results.
// =============================================================================

use anyhow::{bail, Result};
use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::config::Config;

/// Sends the report to the configured sink.
pub async fn deliver(client: &Client, config: &Config, report_text: &str) -> Result<()> {
    let (url, token) = match (&config.webhook_url, &config.webhook_token) {
        (Some(url), Some(token)) => (url, token),
        _ => {
            println!("{report_text}");
            return Ok(());
        }
    };

    let response = client
        .post(url)
        .header("Authorization", format!("Basic {token}"))
        .json(&json!({ "message": report_text }))
        .send()
        .await?;

    if !response.status().is_success() {
        bail!("notification endpoint answered HTTP {}", response.status().as_u16());
    }
    info!(url, "report delivered");
    Ok(())
}
