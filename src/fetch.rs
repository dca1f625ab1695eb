//! Single-page GET with status retries.
//!
//! Anything other than a `200` (after retries) or a timeout comes back as a
//! [`FetchFailure`] value; whether that ends the crawl is the caller's call.

use scraper::Html;
use url::Url;

use crate::error::FetchFailure;
use crate::session::Session;

/// Raw HTML of one fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: Url,
    pub body: String,
}

impl FetchedPage {
    /// Parse the body into a traversable document.
    ///
    /// `Html` is not `Send`, so callers parse inside a synchronous scope and
    /// drop the document before the next `.await`.
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// GET `url`, retrying on the policy's statuses with exponential backoff.
pub async fn fetch(session: &Session<'_>, url: &Url) -> Result<FetchedPage, FetchFailure> {
    let policy = &session.config.retry;
    let mut failed: u32 = 0;

    loop {
        let resp = match session.client.get(url.clone()).send().await {
            Ok(resp) => resp,
            Err(e) => {
                let failure = classify(&e);
                tracing::warn!(url = %url, error = %failure, "fetch failed");
                return Err(failure);
            }
        };

        let status = resp.status().as_u16();
        if status == 200 {
            return match resp.text().await {
                Ok(body) => {
                    tracing::debug!(url = %url, bytes = body.len(), "fetched page");
                    Ok(FetchedPage {
                        url: url.clone(),
                        body,
                    })
                }
                Err(e) => {
                    let failure = classify(&e);
                    tracing::warn!(url = %url, error = %failure, "failed to read body");
                    Err(failure)
                }
            };
        }

        failed += 1;
        if policy.should_retry(status) && failed < policy.max_attempts {
            let delay = policy.backoff(failed);
            tracing::debug!(url = %url, status, attempt = failed, ?delay, "retrying");
            tokio::time::sleep(delay).await;
            continue;
        }

        tracing::warn!(url = %url, status, attempts = failed, "giving up on page");
        return Err(FetchFailure::Status(status));
    }
}

fn classify(e: &reqwest::Error) -> FetchFailure {
    if e.is_timeout() {
        FetchFailure::Timeout
    } else {
        FetchFailure::Transport(e.to_string())
    }
}
