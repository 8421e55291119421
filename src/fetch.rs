use anyhow::{Context, Result, ensure};
use tracing::{debug, instrument};

use crate::sources::Source;

/// Downloads a source's playlist text
///
/// Invalid UTF-8 is replaced rather than rejected.
///
/// # Errors
/// Errors on network failure, timeout or a non-success HTTP status
#[instrument(skip(client, source), fields(source = %source.label))]
pub async fn fetch_playlist(client: &reqwest::Client, source: &Source) -> Result<String> {
    let res = client
        .get(&source.url)
        .send()
        .await
        .with_context(|| format!("Fetching {} ({})", source.label, source.url))?;

    ensure!(
        res.status().is_success(),
        "Fetching {} ({}) failed with status {}",
        source.label,
        source.url,
        res.status()
    );

    let body = res
        .bytes()
        .await
        .with_context(|| format!("Reading {} ({})", source.label, source.url))?;
    debug!("Received {} bytes", body.len());

    Ok(String::from_utf8_lossy(&body).into_owned())
}
