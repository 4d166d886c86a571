//! Shared HTTP client construction and the single-shot fetch operation.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::types::{FetchConfig, FetchError};

const TCP_KEEPALIVE_SECS: u64 = 60;

/// Build the one shared client for a batch run.
///
/// Connection pooling and keep-alive live inside the client; callers clone
/// the handle into tasks (clones share the pool).
pub fn build_client(config: &FetchConfig) -> Result<Client, FetchError> {
    Client::builder()
        .user_agent(config.user_agent())
        .timeout(Duration::from_secs(u64::from(config.timeout_seconds())))
        .connect_timeout(Duration::from_secs(u64::from(
            config.connect_timeout_seconds(),
        )))
        .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
        .build()
        .map_err(FetchError::Client)
}

/// Perform one GET and return the response body as text.
///
/// Single-shot with two terminal outcomes: the full body on success, a
/// [`FetchError`] on any network failure or non-2xx status. No retries.
pub async fn fetch_one(client: &Client, url: &Url) -> Result<String, FetchError> {
    tracing::debug!(%url, "fetch started");

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.clone(),
            status,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;

    tracing::debug!(%url, bytes = body.len(), "fetch finished");
    Ok(body)
}
