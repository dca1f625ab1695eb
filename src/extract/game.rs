//! Game listing links and game detail pages.
//!
//! Detail pages are all-or-nothing: every field below is required, so any
//! single miss discards the whole record. The only exception is the
//! Builders Club notice, which is a presence flag.

use scraper::Html;
use url::Url;

use super::{extract_fields, selector, DocumentIndex, FieldSpec, Locator, Transform};
use super::passes::extract_game_passes;
use crate::config::CrawlConfig;
use crate::error::ExtractError;
use crate::models::GameDetail;

const GAME_LINK: &str = "a.text-decoration-none.p-1[href]";
const BUILDERS_CLUB_NOTICE: &str = "A Builders Club membership is required to join this game";

/// Stat blocks are unlabelled `div.col` containers; the value is the next
/// `h2` after the n-th one.
const STAT_CONTAINER: &str = "div.col";
const STAT_VALUE: &str = "h2";

const fn stat(name: &'static str, hops: usize, transform: Transform) -> FieldSpec {
    FieldSpec::required(
        name,
        Locator::Chase {
            anchor: STAT_CONTAINER,
            hops,
            target: STAT_VALUE,
        },
        transform,
    )
}

const GAME_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", Locator::First("h1.m-0"), Transform::Text),
    FieldSpec::required(
        "creator",
        Locator::Within {
            outer: "p.m-0",
            inner: "a",
        },
        Transform::Text,
    ),
    FieldSpec::required(
        "favorites_count",
        Locator::After {
            anchor: "div.icon-favorite",
            target: "span.text-favorite",
        },
        Transform::Int,
    ),
    FieldSpec::required(
        "likes_count",
        Locator::After {
            anchor: "div.upvote",
            target: "span.vote-up-text",
        },
        Transform::Int,
    ),
    FieldSpec::required("dislikes_count", Locator::First("span.vote-down-text"), Transform::Int),
    FieldSpec::required("description", Locator::First("div.ms-2"), Transform::Text),
    FieldSpec::optional(
        "builder_club_required",
        Locator::WithText {
            selector: "p",
            text: BUILDERS_CLUB_NOTICE,
        },
        Transform::Present,
    ),
    FieldSpec::required("thumbnail", Locator::First("img.rounded"), Transform::Attr("src")),
    stat("active_players", 0, Transform::Int),
    stat("visits_count", 1, Transform::Int),
    stat("created_date", 2, Transform::Text),
    stat("updated_date", 3, Transform::Text),
    stat("server_size", 4, Transform::Int),
];

/// Detail page links of every game on a listing page, in page order.
///
/// Entries whose `href` cannot be resolved are skipped.
pub fn game_links(document: &Html, config: &CrawlConfig) -> Vec<Url> {
    document
        .select(&selector(GAME_LINK))
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| {
            let url = config.absolute(href).and_then(|s| Url::parse(&s).ok());
            if url.is_none() {
                tracing::debug!(href, "skipping unresolvable game link");
            }
            url
        })
        .collect()
}

/// Parse a game detail page, including its game passes.
pub fn extract_game_detail(document: &Html, config: &CrawlConfig) -> Result<GameDetail, ExtractError> {
    let index = DocumentIndex::new(document.root_element());
    let fields = extract_fields(&index, GAME_FIELDS)?;

    let thumbnail = fields.text("thumbnail")?;
    let thumbnail = config.absolute(&thumbnail).ok_or(ExtractError::Malformed {
        field: "thumbnail",
        value: thumbnail,
    })?;

    Ok(GameDetail {
        title: fields.text("title")?,
        creator: fields.text("creator")?,
        favorites_count: fields.int("favorites_count")?,
        likes_count: fields.int("likes_count")?,
        dislikes_count: fields.int("dislikes_count")?,
        description: fields.text("description")?,
        builder_club_required: fields.flag("builder_club_required"),
        thumbnail,
        active_players: fields.int("active_players")?,
        visits_count: fields.int("visits_count")?,
        created_date: fields.text("created_date")?,
        updated_date: fields.text("updated_date")?,
        server_size: fields.int("server_size")?,
        game_passes: extract_game_passes(document, config),
    })
}
