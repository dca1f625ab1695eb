//! Limit-aware listing traversal shared by the catalog and game crawls.
//!
//! The root page is fetched first and doubles as page 1. Only a failure on
//! that fetch is an error; a failed later page or detail fetch ends the
//! crawl early with whatever was already collected.
//!
//! Records come out in encounter order: page order, then position on the
//! page. Detail fetches may overlap (`detail_concurrency`) but results are
//! consumed in order, and the window is dropped, cancelling anything still
//! in flight, as soon as the limit is hit.

use futures::stream::{self, StreamExt};
use url::Url;

use crate::error::{CrawlError, FetchFailure, Result};
use crate::fetch::{fetch, FetchedPage};
use crate::pagination;
use crate::session::Session;

/// One unit of work found on a listing page.
pub(crate) enum Entry<R> {
    /// Fully extracted from the listing page itself.
    Record(R),
    /// Needs one more fetch of a detail page.
    Detail(Url),
}

/// What a crawl collects and how it reads each page.
pub(crate) trait Target: Sync {
    type Record: Send;

    /// Entries of one listing page, in page order.
    fn harvest(&self, page: &FetchedPage) -> Vec<Entry<Self::Record>>;

    /// Parse a fetched detail page. `None` drops the entry.
    fn detail(&self, page: &FetchedPage) -> Option<Self::Record>;

    fn accept(&self, record: &Self::Record) -> bool;
}

enum Outcome<R> {
    Record(Option<R>),
    Degraded(Url, FetchFailure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Crawl every page of the listing at `root` until `limit` records pass the
/// target's filter.
pub(crate) async fn crawl<T: Target>(
    session: &Session<'_>,
    target: &T,
    root: Url,
    limit: usize,
) -> Result<Vec<T::Record>> {
    let root_page = fetch(session, &root).await.map_err(|reason| {
        tracing::error!(url = %root, error = %reason, "root page unavailable");
        CrawlError::UpstreamUnavailable {
            url: root.to_string(),
            reason,
        }
    })?;

    let total_pages = pagination::discover(&root_page.document());
    tracing::debug!(url = %root, total_pages, "discovered pagination");

    let mut records = Vec::new();
    let mut pages_visited = 0;
    let mut pending = Some(root_page);

    for number in 1..=total_pages {
        let page = match pending.take() {
            Some(page) => page,
            None => {
                let url = page_url(&root, number);
                match fetch(session, &url).await {
                    Ok(page) => page,
                    Err(reason) => {
                        tracing::warn!(url = %url, error = %reason, "listing page degraded; stopping early");
                        break;
                    }
                }
            }
        };
        pages_visited += 1;

        let entries = target.harvest(&page);
        tracing::debug!(page = number, entries = entries.len(), "harvested listing page");

        let flow = drain(session, target, entries, &mut records, limit).await;
        if flow == Flow::Stop {
            break;
        }
    }

    tracing::info!(
        url = %root,
        records = records.len(),
        pages_visited,
        total_pages,
        "crawl finished"
    );
    Ok(records)
}

/// Filter and accumulate one page's entries, fetching detail pages through
/// an ordered window.
async fn drain<T: Target>(
    session: &Session<'_>,
    target: &T,
    entries: Vec<Entry<T::Record>>,
    records: &mut Vec<T::Record>,
    limit: usize,
) -> Flow {
    if records.len() >= limit {
        return Flow::Stop;
    }

    let window = session.config().detail_concurrency.max(1);
    let mut outcomes = stream::iter(entries)
        .map(move |entry| async move {
            match entry {
                Entry::Record(record) => Outcome::Record(Some(record)),
                Entry::Detail(url) => match fetch(session, &url).await {
                    Ok(page) => Outcome::Record(target.detail(&page)),
                    Err(reason) => Outcome::Degraded(url, reason),
                },
            }
        })
        .buffered(window);

    while let Some(outcome) = outcomes.next().await {
        match outcome {
            Outcome::Record(Some(record)) => {
                if !target.accept(&record) {
                    continue;
                }
                records.push(record);
                if records.len() >= limit {
                    tracing::debug!(limit, "limit reached");
                    return Flow::Stop;
                }
            }
            Outcome::Record(None) => {}
            Outcome::Degraded(url, reason) => {
                tracing::warn!(url = %url, error = %reason, "detail page degraded; stopping early");
                return Flow::Stop;
            }
        }
    }
    Flow::Continue
}

/// URL of listing page `number`, keeping the root's query string.
pub(crate) fn page_url(root: &Url, number: u32) -> Url {
    let mut url = root.clone();
    url.query_pairs_mut().append_pair("page", &number.to_string());
    url
}
