//! Popular game listing with one detail-page fetch per game.

use url::Url;

use crate::config::CrawlConfig;
use crate::crawl::{crawl, Entry, Target};
use crate::error::{CrawlError, Result};
use crate::extract::{extract_game_detail, game_links};
use crate::fetch::FetchedPage;
use crate::models::{GameDetail, GameListing};
use crate::session::{Credentials, Session};

/// Query interface for the popular games listing.
pub struct GameQuery<'a> {
    config: &'a CrawlConfig,
}

impl<'a> GameQuery<'a> {
    /// Create a new `GameQuery` bound to the given configuration.
    pub fn new(config: &'a CrawlConfig) -> Self {
        Self { config }
    }

    /// The first listing page URL for a search.
    pub fn search_url(&self, query: Option<&str>, limit: usize) -> Result<Url> {
        let mut url = self.config.games_url()?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(q) = query {
                pairs.append_pair("q", q);
            }
            pairs.append_pair("limit", &limit.to_string());
        }
        Ok(url)
    }

    /// List up to `limit` games with their full details and game passes.
    ///
    /// Games whose detail page cannot be parsed are skipped; a detail page
    /// that cannot be fetched ends the crawl with the games gathered so far.
    pub async fn list(
        &self,
        query: Option<&str>,
        limit: usize,
        credentials: &Credentials,
    ) -> Result<GameListing> {
        if limit == 0 {
            return Err(CrawlError::InvalidArgument("limit must be at least 1".into()));
        }

        let root = self.search_url(query, limit)?;
        let session = Session::acquire(self.config, credentials)?;
        let target = GameTarget {
            config: self.config,
        };
        let games = crawl(&session, &target, root, limit).await?;

        Ok(GameListing {
            games,
            query: query.map(str::to_string),
        })
    }
}

struct GameTarget<'a> {
    config: &'a CrawlConfig,
}

impl Target for GameTarget<'_> {
    type Record = GameDetail;

    fn harvest(&self, page: &FetchedPage) -> Vec<Entry<GameDetail>> {
        let document = page.document();
        game_links(&document, self.config)
            .into_iter()
            .map(Entry::Detail)
            .collect()
    }

    fn detail(&self, page: &FetchedPage) -> Option<GameDetail> {
        let document = page.document();
        match extract_game_detail(&document, self.config) {
            Ok(game) => Some(game),
            Err(e) => {
                tracing::warn!(url = %page.url, error = %e, "dropping game");
                None
            }
        }
    }

    fn accept(&self, _game: &GameDetail) -> bool {
        true
    }
}
