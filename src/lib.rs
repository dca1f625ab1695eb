//! Crawler SDK for the syntax.eco catalog and game listings.
//!
//! The site has no API, so listings are fetched page by page as HTML and
//! parsed into typed records: catalog items with their prices and limited
//! tiers, and games with their stats and game passes. Results are truncated
//! to a caller-supplied limit without fetching pages past it.
//!
//! # Quick start
//!
//! ```no_run
//! use syntax_crawler::{Credentials, ItemType, SearchCatalogParams, SyntaxClient};
//!
//! # async fn example() -> syntax_crawler::Result<()> {
//! let client = SyntaxClient::builder().build()?;
//! let creds = Credentials::new("<session cookie>", "<security cookie>");
//!
//! // Limited hats, first five
//! let params = SearchCatalogParams {
//!     category: 5,
//!     item_type: ItemType::Limited,
//!     limit: 5,
//!     ..Default::default()
//! };
//! let listing = client.catalog().list(&params, &creds).await?;
//!
//! // Popular games with details
//! let games = client.games().list(Some("obby"), 3, &creds).await?;
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod config;
mod crawl;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod queries;
pub mod session;

pub use config::{CrawlConfig, RetryPolicy};
pub use error::{CrawlError, ExtractError, FetchFailure, Result};
pub use models::*;
pub use queries::{CatalogQuery, GameQuery, SearchCatalogParams};
pub use session::{Credentials, Session};

use std::fmt;
use std::time::Duration;

use url::Url;

// ---------------------------------------------------------------------------
// SyntaxClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`SyntaxClient`] instance.
///
/// Use [`SyntaxClient::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](SyntaxClientBuilder::build) to create the client.
#[derive(Default)]
pub struct SyntaxClientBuilder {
    origin: Option<String>,
    config: CrawlConfig,
}

impl SyntaxClientBuilder {
    /// Point the client at another origin (scheme + host).
    ///
    /// Defaults to [`config::SITE_ORIGIN`]. Relative links on crawled pages
    /// are resolved against it.
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set the per-request timeout. A timeout counts as a failed fetch.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Replace the retry schedule (3 attempts on 500/502/503/504, 1s base).
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    /// Always send this user agent instead of picking one from the pool.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Replace the pool of user agents picked from per crawl.
    pub fn user_agent_pool<I, S>(mut self, agents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.user_agents = agents.into_iter().map(Into::into).collect();
        self
    }

    /// How many game detail pages may be in flight at once.
    ///
    /// Defaults to 1. Results keep listing order either way.
    pub fn detail_concurrency(mut self, n: usize) -> Self {
        self.config.detail_concurrency = n;
        self
    }

    /// Validate the settings and build the client.
    pub fn build(self) -> Result<SyntaxClient> {
        let mut config = self.config;

        if let Some(origin) = self.origin {
            let url = Url::parse(&origin)?;
            if !matches!(url.scheme(), "http" | "https") || url.host().is_none() {
                return Err(CrawlError::InvalidArgument(format!(
                    "origin must be an http(s) URL with a host: {}",
                    origin
                )));
            }
            config.origin = url;
        }
        if config.user_agent.is_none() && config.user_agents.is_empty() {
            return Err(CrawlError::InvalidArgument(
                "user agent pool must not be empty".into(),
            ));
        }
        if config.detail_concurrency == 0 {
            return Err(CrawlError::InvalidArgument(
                "detail_concurrency must be at least 1".into(),
            ));
        }
        if config.retry.max_attempts == 0 {
            return Err(CrawlError::InvalidArgument(
                "retry policy needs at least one attempt".into(),
            ));
        }

        Ok(SyntaxClient { config })
    }
}

// ---------------------------------------------------------------------------
// SyntaxClient
// ---------------------------------------------------------------------------

/// The main entry point for crawling.
///
/// Holds only immutable configuration; every listing call builds its own
/// session from the credentials it is given, so one client can serve
/// concurrent calls for different users.
#[derive(Debug, Clone)]
pub struct SyntaxClient {
    config: CrawlConfig,
}

impl SyntaxClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> SyntaxClientBuilder {
        SyntaxClientBuilder::default()
    }

    /// Access the catalog query interface.
    pub fn catalog(&self) -> CatalogQuery<'_> {
        CatalogQuery::new(&self.config)
    }

    /// Access the game query interface.
    ///
    /// Each listed game costs one extra detail-page request.
    pub fn games(&self) -> GameQuery<'_> {
        GameQuery::new(&self.config)
    }

    /// List catalog items. Shorthand for `catalog().list(..)`.
    pub async fn list_catalog_items(
        &self,
        params: &SearchCatalogParams,
        credentials: &Credentials,
    ) -> Result<CatalogListing> {
        self.catalog().list(params, credentials).await
    }

    /// List games with details. Shorthand for `games().list(..)`.
    pub async fn list_games(
        &self,
        query: Option<&str>,
        limit: usize,
        credentials: &Credentials,
    ) -> Result<GameListing> {
        self.games().list(query, limit, credentials).await
    }

    /// Return the client's configuration.
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for SyntaxClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SyntaxClient(origin={}, timeout={:?}, attempts={}, detail_concurrency={})",
            self.config.origin,
            self.config.timeout,
            self.config.retry.max_attempts,
            self.config.detail_concurrency
        )
    }
}
