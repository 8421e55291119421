use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

/// Some playlist hosts reject unknown clients, so pretend to be a browser by default
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const USER_AGENT_ENV: &str = "M3U_MERGE_USER_AGENT";

/// User-Agent from the environment (or `.env`), falling back to [`DEFAULT_USER_AGENT`]
#[must_use]
pub fn user_agent_from_env() -> String {
    std::env::var(USER_AGENT_ENV)
        .ok()
        .filter(|ua| !ua.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
}

/// Builds the HTTP client shared by every fetch
///
/// `timeout` bounds each read on the connection rather than the whole transfer, so a
/// large playlist trickling in slowly is not cut off.
///
/// # Errors
/// Errors when the user agent is not a valid header value or the TLS backend fails to initialise
pub fn init_http_client(user_agent: &str, timeout: Duration) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent).context("Invalid User-Agent header value")?,
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(10).min(timeout))
        .read_timeout(timeout)
        .build()
        .context("Building HTTP client")
}
