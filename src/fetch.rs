//! Outbound fetch of the source page.
//!
//! Plain HTTP, not a browser. Retries on 5xx and connection errors with
//! exponential backoff and honors `Retry-After` on 429. This boundary is
//! the only place retry lives — the extraction layer never retries.

use std::time::Duration;

use crate::error::RateError;

const MAX_RETRIES: u32 = 2;

/// HTTP client for fetching the source page.
#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl PageFetcher {
    /// Create a fetcher with a browser user-agent and bounded redirects.
    ///
    /// `accept_invalid_certs` exists because the BCV site's certificate
    /// chain is frequently broken; callers opt in explicitly.
    pub fn new(timeout_ms: u64, accept_invalid_certs: bool) -> Self {
        let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                  AppleWebKit/537.36 (KHTML, like Gecko) \
                  Chrome/131.0.0.0 Safari/537.36";

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(ua)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .unwrap_or_default();

        Self {
            client,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// GET the page and return its body as text.
    ///
    /// A non-success final status after retries is a fetch error; the body
    /// of an error page is never handed to the extractor.
    pub async fn fetch(&self, url: &str) -> Result<String, RateError> {
        let mut retries = 0u32;

        loop {
            let resp = self.client.get(url).timeout(self.timeout).send().await;

            match resp {
                Ok(r) => {
                    let status = r.status();

                    if status.as_u16() >= 500 && retries < MAX_RETRIES {
                        retries += 1;
                        let delay = Duration::from_millis(500 * 2u64.pow(retries - 1));
                        tracing::warn!(%url, %status, retry = retries, "upstream 5xx, retrying");
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    if status.as_u16() == 429 && retries < MAX_RETRIES {
                        retries += 1;
                        let retry_after = r
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|s| s.parse::<u64>().ok())
                            .unwrap_or(2);
                        tracing::warn!(%url, retry_after, "rate limited, backing off");
                        tokio::time::sleep(Duration::from_secs(retry_after.min(10))).await;
                        continue;
                    }

                    if !status.is_success() {
                        return Err(RateError::Fetch(format!(
                            "source returned status {status} for {url}"
                        )));
                    }

                    let body = r.text().await?;
                    tracing::debug!(%url, bytes = body.len(), "fetched source page");
                    return Ok(body);
                }
                Err(e) => {
                    if retries < MAX_RETRIES {
                        retries += 1;
                        let delay = Duration::from_millis(500 * 2u64.pow(retries - 1));
                        tracing::warn!(%url, error = %e, retry = retries, "fetch failed, retrying");
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }
    }
}
