//! Catalog item search across every page of a listing.

use url::Url;

use crate::classify;
use crate::config::{CrawlConfig, DEFAULT_LIMIT};
use crate::crawl::{crawl, Entry, Target};
use crate::error::{CrawlError, Result};
use crate::extract::{extract_item, item_cards};
use crate::fetch::FetchedPage;
use crate::models::{CatalogItem, CatalogListing, ItemType};
use crate::session::{Credentials, Session};

// ---------------------------------------------------------------------------
// SearchCatalogParams
// ---------------------------------------------------------------------------

/// Parameters for [`CatalogQuery::list`].
#[derive(Debug, Clone)]
pub struct SearchCatalogParams {
    pub query: Option<String>,
    pub category: i64,
    pub sort: i64,
    pub item_type: ItemType,
    /// Maximum items returned; must be at least 1.
    pub limit: usize,
}

impl Default for SearchCatalogParams {
    fn default() -> Self {
        Self {
            query: None,
            category: 0,
            sort: 0,
            item_type: ItemType::All,
            limit: DEFAULT_LIMIT,
        }
    }
}

// ---------------------------------------------------------------------------
// CatalogQuery
// ---------------------------------------------------------------------------

/// Query interface for the item catalog.
pub struct CatalogQuery<'a> {
    config: &'a CrawlConfig,
}

impl<'a> CatalogQuery<'a> {
    /// Create a new `CatalogQuery` bound to the given configuration.
    pub fn new(config: &'a CrawlConfig) -> Self {
        Self { config }
    }

    /// The first listing page URL for `params`.
    pub fn search_url(&self, params: &SearchCatalogParams) -> Result<Url> {
        let mut url = self.config.catalog_url()?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(q) = &params.query {
                pairs.append_pair("q", q);
            }
            pairs
                .append_pair("category", &params.category.to_string())
                .append_pair("sort", &params.sort.to_string())
                .append_pair("limit", &params.limit.to_string())
                .append_pair("item_type", params.item_type.as_str());
        }
        Ok(url)
    }

    /// List catalog items matching `params`, page by page, up to `params.limit`.
    ///
    /// Unknown category and sort codes only affect the returned labels. The
    /// call fails only when the first listing page cannot be fetched.
    pub async fn list(
        &self,
        params: &SearchCatalogParams,
        credentials: &Credentials,
    ) -> Result<CatalogListing> {
        if params.limit == 0 {
            return Err(CrawlError::InvalidArgument("limit must be at least 1".into()));
        }

        let category_label = classify::category_label(params.category);
        let sort_label = classify::sort_label(params.sort);
        let root = self.search_url(params)?;

        let session = Session::acquire(self.config, credentials)?;
        let target = CatalogTarget {
            config: self.config,
            item_type: params.item_type,
        };
        let items = crawl(&session, &target, root, params.limit).await?;

        Ok(CatalogListing {
            items,
            category_label: category_label.to_string(),
            sort_label: sort_label.to_string(),
            item_type: params.item_type,
        })
    }
}

// ---------------------------------------------------------------------------
// CatalogTarget
// ---------------------------------------------------------------------------

struct CatalogTarget<'a> {
    config: &'a CrawlConfig,
    item_type: ItemType,
}

impl Target for CatalogTarget<'_> {
    type Record = CatalogItem;

    fn harvest(&self, page: &FetchedPage) -> Vec<Entry<CatalogItem>> {
        let document = page.document();
        let cards = item_cards(&document);
        cards
            .into_iter()
            .enumerate()
            .filter_map(|(position, card)| match extract_item(card, self.config) {
                Ok(item) => Some(Entry::Record(item)),
                Err(e) => {
                    tracing::warn!(url = %page.url, position, error = %e, "dropping catalog item");
                    None
                }
            })
            .collect()
    }

    fn detail(&self, _page: &FetchedPage) -> Option<CatalogItem> {
        None
    }

    fn accept(&self, item: &CatalogItem) -> bool {
        classify::matches(item, self.item_type)
    }
}
