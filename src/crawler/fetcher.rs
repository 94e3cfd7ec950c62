//! HTTP fetcher implementation
//!
//! Builds the shared HTTP client and fetches catalog pages with bounded
//! retries. Any transport error or non-success status is retryable; the
//! delay between attempts grows linearly with the attempt number. When all
//! attempts are exhausted the last underlying error propagates to the
//! caller.

use crate::config::{Config, HarvesterConfig};
use crate::{ConfigError, HarvestError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use tokio::time::sleep;

/// Builds the HTTP client used for every request in a run
///
/// The configured user-agent string and Accept-Language header are attached
/// to every request the client sends.
///
/// # Arguments
///
/// * `config` - The harvester configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(HarvestError)` - Header value was malformed or the client failed to build
pub fn build_http_client(config: &Config) -> Result<Client> {
    let mut headers = HeaderMap::new();
    let accept_language = HeaderValue::from_str(&config.user_agent.accept_language)
        .map_err(|e| ConfigError::Validation(format!("Invalid accept-language value: {}", e)))?;
    headers.insert(ACCEPT_LANGUAGE, accept_language);

    let client = Client::builder()
        .user_agent(config.user_agent.agent.clone())
        .default_headers(headers)
        .timeout(config.harvester.request_timeout())
        .connect_timeout(config.harvester.connect_timeout())
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetches a page body with retry
///
/// Performs up to `retry_cap` attempts. A non-2xx status counts as a failed
/// attempt just like a transport error. Between attempts the fetcher sleeps
/// `attempt × retry-base-delay`; after the final failure the last error is
/// returned as [`HarvestError::Fetch`].
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The URL to fetch
/// * `harvester` - Retry and delay settings
pub async fn fetch_page(client: &Client, url: &str, harvester: &HarvesterConfig) -> Result<String> {
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;

        match try_fetch(client, url).await {
            Ok(body) => return Ok(body),
            Err(source) => {
                if attempt >= harvester.retry_cap {
                    return Err(HarvestError::Fetch {
                        url: url.to_string(),
                        attempts: attempt,
                        source,
                    });
                }

                tracing::debug!(url, attempt, error = %source, "fetch failed, retrying");
                sleep(harvester.retry_base_delay() * attempt).await;
            }
        }
    }
}

/// One fetch attempt: GET, status check, body
async fn try_fetch(client: &Client, url: &str) -> std::result::Result<String, reqwest::Error> {
    let response = client.get(url).send().await?;
    let response = response.error_for_status()?;
    response.text().await
}
